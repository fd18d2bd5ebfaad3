//! Implementation of the `tt run` command.
//!
//! Replays a session script against an [`ActivityTracker`] and writes the
//! output of `elapsed` and `export` steps to the writer.

use std::io::Write;

use anyhow::{Context, Result};

use tt_core::{ActivityTracker, Clock, RecordOutcome};

use crate::config::ExportFormat;
use crate::script::{self, Step};

/// Export settings for a run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Field delimiter for delimited exports.
    pub delimiter: String,
    /// Export rendition.
    pub format: ExportFormat,
}

/// Run a script on `clock`, writing step output to `writer`.
///
/// The first failing step aborts the run with its line number in the error.
pub fn run<W: Write, C: Clock>(
    writer: &mut W,
    clock: C,
    script: &str,
    options: &RunOptions,
) -> Result<()> {
    let steps = script::parse(script)?;
    let mut tracker = ActivityTracker::with_clock(clock);

    for (line, step) in steps {
        execute(writer, &mut tracker, &step, options)
            .with_context(|| format!("line {line}: `{}` failed", step_name(&step)))?;
    }

    if tracker.is_started() {
        tracing::debug!(
            actions = tracker.records().len(),
            "script ended with an unstopped session"
        );
    }

    Ok(())
}

fn execute<W: Write, C: Clock>(
    writer: &mut W,
    tracker: &mut ActivityTracker<C>,
    step: &Step,
    options: &RunOptions,
) -> Result<()> {
    match step {
        Step::Start(label) => tracker.start(label)?,
        Step::Toggle(label) => {
            let transition = tracker.toggle_session(label.as_deref(), false)?;
            tracing::debug!(?transition, "toggled session");
        }
        Step::Pause => tracker.pause(),
        Step::Resume => tracker.resume(),
        Step::Record(label) => report_outcome(label, tracker.record_action(label, false)?),
        Step::Once(label) => report_outcome(label, tracker.record_action(label, true)?),
        Step::Wait(duration) => tracker.clock().sleep(*duration),
        Step::Elapsed => writeln!(writer, "{}", tracker.elapsed_time()?)?,
        Step::Export => {
            let text = match options.format {
                ExportFormat::Delimited => tracker.export_log(&options.delimiter)?,
                ExportFormat::Json => tracker.export_json_lines()?,
            };
            writeln!(writer, "{text}")?;
        }
        Step::Stop => tracker.stop(),
    }
    Ok(())
}

fn report_outcome(label: &str, outcome: RecordOutcome) {
    if outcome == RecordOutcome::Duplicate {
        tracing::debug!(action = label, "duplicate action ignored");
    }
}

const fn step_name(step: &Step) -> &'static str {
    match step {
        Step::Start(_) => "start",
        Step::Toggle(_) => "toggle",
        Step::Pause => "pause",
        Step::Resume => "resume",
        Step::Record(_) => "record",
        Step::Once(_) => "once",
        Step::Wait(_) => "wait",
        Step::Elapsed => "elapsed",
        Step::Export => "export",
        Step::Stop => "stop",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;
    use tt_core::ManualClock;

    fn options(delimiter: &str, format: ExportFormat) -> RunOptions {
        RunOptions {
            delimiter: delimiter.to_string(),
            format,
        }
    }

    fn run_script(script: &str, options: &RunOptions) -> Result<String> {
        let clock = ManualClock::new();
        let mut output = Vec::new();
        run(&mut output, &clock, script, options)?;
        Ok(String::from_utf8(output)?)
    }

    #[test]
    fn run_exports_backfilled_log() {
        let script = "\
start A
wait 100
record B
wait 100
record C
export
";
        let output = run_script(script, &options(",", ExportFormat::Delimited)).unwrap();
        assert_snapshot!(output, @r"
        #Action,StartTime,Duration
        A,0.00,0.10
        B,0.10,0.10
        C,0.20,0.00
        ");
    }

    #[test]
    fn run_pause_excludes_waiting() {
        let script = "\
start A
toggle
wait 200
toggle
elapsed
wait 50
pause
wait 1000
elapsed
";
        let output = run_script(script, &options(",", ExportFormat::Delimited)).unwrap();
        assert_eq!(output, "0.00\n0.05\n");
    }

    #[test]
    fn run_one_time_and_duplicate_steps() {
        let script = "\
# one-time actions never close the running one
start read
wait 30
once phone
record read
wait 20
record write
export
";
        let output = run_script(script, &options(";", ExportFormat::Delimited)).unwrap();
        assert_snapshot!(output, @r"
        #Action;StartTime;Duration
        read;0.00;0.05
        phone;0.03;-1
        write;0.05;0.00
        ");
    }

    #[test]
    fn run_json_export() {
        let script = "start A\nwait 250\nonce ping\nexport\n";
        let output = run_script(script, &options("\t", ExportFormat::Json)).unwrap();
        assert_snapshot!(output, @r#"
        {"label":"A","offset":0.0,"state":"closed","duration":0.25}
        {"label":"ping","offset":0.25,"state":"instantaneous"}
        "#);
    }

    #[test]
    fn run_stop_then_record_fails_with_line() {
        let script = "start A\nstop\nrecord B\n";
        let err = run_script(script, &options("\t", ExportFormat::Delimited)).unwrap_err();
        assert_eq!(err.to_string(), "line 3: `record` failed");
        assert_eq!(
            err.root_cause().to_string(),
            "invalid state: session has not been started"
        );
    }

    #[test]
    fn run_rejects_bad_script_before_executing() {
        let err = run_script("start A\nexport\nhop\n", &options("\t", ExportFormat::Delimited))
            .unwrap_err();
        assert_eq!(err.to_string(), "line 3: unknown step: hop");
    }

    #[test]
    fn run_start_without_label_via_toggle_fails() {
        let err = run_script("toggle\n", &options("\t", ExportFormat::Delimited)).unwrap_err();
        assert_eq!(err.to_string(), "line 1: `toggle` failed");
    }
}
