//! Entries of the action log.

use std::fmt;

use serde::Serialize;

use crate::types::{ActionLabel, Seconds};

/// Lifecycle of a record's duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "duration", rename_all = "snake_case")]
pub enum RecordState {
    /// The action is still running; its duration is filled in when the next
    /// action starts or the log is exported.
    Open,
    /// The action has a final duration.
    Closed(Seconds),
    /// A one-time-only event. It never receives a duration.
    Instantaneous,
}

impl RecordState {
    /// Returns `true` for [`RecordState::Open`].
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

/// Renders the duration column of the delimited export.
///
/// Instantaneous records keep the `-1` marker of the text format.
impl fmt::Display for RecordState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => f.write_str("0"),
            Self::Closed(duration) => write!(f, "{duration}"),
            Self::Instantaneous => f.write_str("-1"),
        }
    }
}

/// One action in the session log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionRecord {
    /// What was being done.
    pub label: ActionLabel,
    /// Active elapsed time at which the action began.
    pub offset: Seconds,
    /// Duration state.
    #[serde(flatten)]
    pub state: RecordState,
}

impl ActionRecord {
    /// Creates a record that is still running.
    #[must_use]
    pub const fn open(label: ActionLabel, offset: Seconds) -> Self {
        Self {
            label,
            offset,
            state: RecordState::Open,
        }
    }

    /// Creates a one-time-only record.
    #[must_use]
    pub const fn instantaneous(label: ActionLabel, offset: Seconds) -> Self {
        Self {
            label,
            offset,
            state: RecordState::Instantaneous,
        }
    }

    /// Final duration, if the record has been closed.
    #[must_use]
    pub const fn duration(&self) -> Option<Seconds> {
        match self.state {
            RecordState::Closed(duration) => Some(duration),
            RecordState::Open | RecordState::Instantaneous => None,
        }
    }

    /// Closes the record at active time `now`.
    ///
    /// A closed record may be closed again; the newer time wins.
    pub(crate) fn close_at(&mut self, now: Seconds) {
        self.state = RecordState::Closed(now - self.offset);
    }
}
