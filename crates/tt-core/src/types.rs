//! Core value types with validation.

use std::fmt;
use std::ops::Sub;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::TrackerError;

/// Hundredths of a second in one second.
const HUNDREDTHS_PER_SEC: i64 = 100;

/// Nanoseconds in one hundredth of a second.
const NANOS_PER_HUNDREDTH: u128 = 10_000_000;

/// A non-negative span of active time, rounded to two decimal places.
///
/// Stored as whole hundredths of a second so that rounding happens exactly
/// once, when a [`Duration`] is converted, and differences between two values
/// stay exact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Seconds(i64);

impl Seconds {
    /// Zero seconds.
    pub const ZERO: Self = Self(0);

    /// Creates a value from whole hundredths of a second.
    #[must_use]
    pub const fn from_hundredths(hundredths: i64) -> Self {
        Self(hundredths)
    }

    /// Converts a duration, rounding half up to the nearest hundredth.
    #[must_use]
    pub fn from_duration(duration: Duration) -> Self {
        let hundredths = (duration.as_nanos() + NANOS_PER_HUNDREDTH / 2) / NANOS_PER_HUNDREDTH;
        Self(i64::try_from(hundredths).unwrap_or(i64::MAX))
    }

    /// Returns the value in whole hundredths of a second.
    #[must_use]
    pub const fn hundredths(self) -> i64 {
        self.0
    }

    /// Returns the value as floating-point seconds.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "hundredths stay far below 2^52 for any realistic session"
    )]
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / HUNDREDTHS_PER_SEC as f64
    }
}

impl Sub for Seconds {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl fmt::Display for Seconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let per_sec = HUNDREDTHS_PER_SEC.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / per_sec, abs % per_sec)
    }
}

impl Serialize for Seconds {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_f64(self.as_secs_f64())
    }
}

/// A validated action label.
///
/// Labels must be non-empty. Comparison is exact; `"Run"` and `"run"` are
/// different actions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ActionLabel(String);

impl ActionLabel {
    /// Creates a new label after validation.
    pub fn new(label: impl Into<String>) -> Result<Self, TrackerError> {
        let label = label.into();
        if label.is_empty() {
            return Err(TrackerError::InvalidArgument {
                reason: "action label cannot be empty",
            });
        }
        Ok(Self(label))
    }

    /// Returns the label as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ActionLabel {
    type Error = TrackerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ActionLabel> for String {
    fn from(label: ActionLabel) -> Self {
        label.0
    }
}

impl fmt::Display for ActionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ActionLabel {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seconds_round_to_nearest_hundredth() {
        assert_eq!(
            Seconds::from_duration(Duration::from_millis(104)),
            Seconds::from_hundredths(10)
        );
        assert_eq!(
            Seconds::from_duration(Duration::from_millis(105)),
            Seconds::from_hundredths(11)
        );
        assert_eq!(
            Seconds::from_duration(Duration::from_micros(4_999)),
            Seconds::ZERO
        );
    }

    #[test]
    fn seconds_display_has_two_decimals() {
        assert_eq!(Seconds::ZERO.to_string(), "0.00");
        assert_eq!(Seconds::from_hundredths(7).to_string(), "0.07");
        assert_eq!(Seconds::from_hundredths(1234).to_string(), "12.34");
        assert_eq!(Seconds::from_hundredths(-150).to_string(), "-1.50");
    }

    #[test]
    fn seconds_subtraction_is_exact() {
        let a = Seconds::from_hundredths(30);
        let b = Seconds::from_hundredths(10);
        assert_eq!(a - b, Seconds::from_hundredths(20));
    }

    #[test]
    fn seconds_serialize_as_number() {
        let json = serde_json::to_string(&Seconds::from_hundredths(125)).unwrap();
        assert_eq!(json, "1.25");
    }

    #[test]
    fn action_label_rejects_empty() {
        assert!(ActionLabel::new("").is_err());
        assert_eq!(ActionLabel::new("read").unwrap().as_str(), "read");
    }

    #[test]
    fn action_label_serde_rejects_empty() {
        let result: Result<ActionLabel, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
        let parsed: ActionLabel = serde_json::from_str("\"write\"").unwrap();
        assert_eq!(parsed.as_ref(), "write");
    }
}
