//! Text renditions of the action log.
//!
//! The delimited format is a header line followed by one line per record:
//!
//! ```text
//! #Action<d>StartTime<d>Duration
//! <label><d><offset><d><duration>
//! ```
//!
//! Offsets and durations carry two decimals. Instantaneous records show `-1`
//! in the duration column.

use std::fmt::Write;

use crate::error::TrackerError;
use crate::record::ActionRecord;

/// Column names of the delimited export, in order.
pub const HEADER: [&str; 3] = ["#Action", "StartTime", "Duration"];

/// Joins the header and one line per record with `delimiter`.
///
/// Lines are separated by `\n` with no trailing newline.
pub fn delimited(records: &[ActionRecord], delimiter: &str) -> Result<String, TrackerError> {
    if delimiter.is_empty() {
        return Err(TrackerError::InvalidArgument {
            reason: "export delimiter cannot be empty",
        });
    }

    let mut out = HEADER.join(delimiter);
    for record in records {
        // Writing to a String cannot fail.
        let _ = write!(
            out,
            "\n{}{delimiter}{}{delimiter}{}",
            record.label, record.offset, record.state
        );
    }
    Ok(out)
}

/// Renders each record as a JSON object on its own line.
pub fn json_lines(records: &[ActionRecord]) -> String {
    records
        .iter()
        .filter_map(|record| match serde_json::to_string(record) {
            Ok(line) => Some(line),
            Err(e) => {
                tracing::warn!(action = %record.label, error = %e, "skipping unserializable record");
                None
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
