//! Core domain logic for the activity tracker.
//!
//! This crate contains:
//! - [`ActivityTracker`]: the session state machine (start, pause/resume,
//!   record, export)
//! - [`Clock`]: the time source abstraction, with a manual clock for tests
//! - [`export`]: the delimited and JSON-lines renditions of the log

mod clock;
mod error;
pub mod export;
mod record;
mod tracker;
mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::TrackerError;
pub use record::{ActionRecord, RecordState};
pub use tracker::{ActivityTracker, RecordOutcome, SessionSummary, Transition};
pub use types::{ActionLabel, Seconds};
