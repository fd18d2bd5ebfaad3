//! The activity tracker state machine.
//!
//! # Timing model
//!
//! The tracker keeps a single `start_time` anchor. Active elapsed time is
//! `now - start_time`; while paused it is frozen at `pause_began_at - start_time`.
//! Resuming shifts `start_time` forward by the length of the pause, so the
//! paused interval never counts towards any offset or duration.
//!
//! # Record chain
//!
//! Regular actions form a chain: starting a new one closes the record at
//! `last_action`, and the new record becomes the open one. One-time-only
//! actions are appended beside the chain as instantaneous records and leave
//! the open record running.
//!
//! # Thread Safety
//!
//! Every mutating operation takes `&mut self`. To share a tracker between
//! threads, wrap it in a `Mutex`.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::clock::{Clock, SystemClock};
use crate::error::TrackerError;
use crate::export;
use crate::record::ActionRecord;
use crate::types::{ActionLabel, Seconds};

/// What [`ActivityTracker::toggle_session`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// A new session was started.
    Started,
    /// The running session was paused.
    Paused,
    /// The paused session was resumed.
    Resumed,
}

/// What [`ActivityTracker::record_action`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// A record was appended at `index`.
    Recorded { index: usize },
    /// The label matched the open action; nothing changed.
    Duplicate,
}

/// Point-in-time view of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    /// Wall-clock time the session was started.
    pub started_at: DateTime<Utc>,
    /// Active elapsed time.
    pub elapsed: Seconds,
    /// Whether the clock is currently paused.
    pub paused: bool,
    /// Number of records in the log.
    pub actions: usize,
    /// Label of the open action.
    pub current: Option<ActionLabel>,
}

/// Records a sequence of actions against a pausable session clock.
#[derive(Debug)]
pub struct ActivityTracker<C: Clock = SystemClock> {
    clock: C,
    log: Vec<ActionRecord>,
    started: bool,
    paused: bool,
    start_time: Option<Instant>,
    started_at: Option<DateTime<Utc>>,
    last_action: Option<usize>,
    pause_began_at: Option<Instant>,
}

impl ActivityTracker<SystemClock> {
    /// Creates an unstarted tracker on the system clock.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for ActivityTracker<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> ActivityTracker<C> {
    /// Creates an unstarted tracker on the given clock.
    pub const fn with_clock(clock: C) -> Self {
        Self {
            clock,
            log: Vec::new(),
            started: false,
            paused: false,
            start_time: None,
            started_at: None,
            last_action: None,
            pause_began_at: None,
        }
    }

    /// Returns the clock driving this tracker.
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Starts the session, or pauses/resumes it once started.
    ///
    /// Starting requires a label and cannot be one-time-only. Once started,
    /// `label` and `one_time_only` are ignored.
    pub fn toggle_session(
        &mut self,
        label: Option<&str>,
        one_time_only: bool,
    ) -> Result<Transition, TrackerError> {
        if self.started {
            return Ok(if self.paused {
                self.resume();
                Transition::Resumed
            } else {
                self.pause();
                Transition::Paused
            });
        }

        if one_time_only {
            return Err(TrackerError::InvalidArgument {
                reason: "a session cannot start with a one-time-only action",
            });
        }
        let Some(label) = label else {
            return Err(TrackerError::InvalidArgument {
                reason: "an action label is required to start a session",
            });
        };
        let label = ActionLabel::new(label)?;

        self.start_time = Some(self.clock.now());
        self.started_at = Some(Utc::now());
        self.log.push(ActionRecord::open(label, Seconds::ZERO));
        self.last_action = Some(0);
        self.started = true;
        tracing::debug!(action = %self.log[0].label, "session started");

        Ok(Transition::Started)
    }

    /// Starts a session with its first action.
    ///
    /// Unlike [`toggle_session`](Self::toggle_session) this never pauses an
    /// already running session.
    pub fn start(&mut self, label: &str) -> Result<(), TrackerError> {
        if self.started {
            return Err(TrackerError::InvalidState {
                reason: "session is already started",
            });
        }
        self.toggle_session(Some(label), false).map(|_| ())
    }

    /// Freezes the session clock. Does nothing if already paused.
    pub fn pause(&mut self) {
        if !self.paused {
            self.pause_began_at = Some(self.clock.now());
            tracing::debug!("session paused");
        }
        self.paused = true;
    }

    /// Unfreezes the session clock, excluding the paused interval.
    pub fn resume(&mut self) {
        if let (true, Some(began), Some(start)) =
            (self.paused, self.pause_began_at.take(), self.start_time)
        {
            let paused_for = self.clock.now().saturating_duration_since(began);
            self.start_time = Some(start + paused_for);
            tracing::debug!(paused_ms = paused_for.as_millis(), "session resumed");
        }
        self.pause_began_at = None;
        self.paused = false;
    }

    /// Discards the log and returns to the unstarted state.
    pub fn stop(&mut self) {
        if self.started {
            tracing::debug!(actions = self.log.len(), "session stopped");
        }
        self.log.clear();
        self.started = false;
        self.paused = false;
        self.start_time = None;
        self.started_at = None;
        self.last_action = None;
        self.pause_began_at = None;
    }

    /// Active elapsed time, rounded to hundredths of a second.
    ///
    /// While paused this stays at the value it had when the pause began.
    pub fn elapsed_time(&self) -> Result<Seconds, TrackerError> {
        Ok(Seconds::from_duration(self.elapsed_duration()?))
    }

    fn elapsed_duration(&self) -> Result<Duration, TrackerError> {
        let start = self.start_time.ok_or_else(TrackerError::not_started)?;
        let until = match self.pause_began_at {
            Some(began) if self.paused => began,
            _ => self.clock.now(),
        };
        Ok(until.saturating_duration_since(start))
    }

    /// Records that `label` began now.
    ///
    /// Repeating the open action is a no-op reported as
    /// [`RecordOutcome::Duplicate`].
    pub fn record_action(
        &mut self,
        label: &str,
        one_time_only: bool,
    ) -> Result<RecordOutcome, TrackerError> {
        let open = self.open_index()?;
        if self.log[open].label.as_str() == label {
            tracing::warn!(action = label, "already performing this action");
            return Ok(RecordOutcome::Duplicate);
        }

        let label = ActionLabel::new(label)?;
        let now = self.elapsed_time()?;
        let index = self.log.len();

        if one_time_only {
            tracing::debug!(action = %label, offset = %now, "one-time action recorded");
            self.log.push(ActionRecord::instantaneous(label, now));
        } else {
            self.log[open].close_at(now);
            self.last_action = Some(index);
            tracing::debug!(action = %label, offset = %now, "action recorded");
            self.log.push(ActionRecord::open(label, now));
        }

        Ok(RecordOutcome::Recorded { index })
    }

    /// Renders the log as delimited text.
    ///
    /// The open action is closed at the current elapsed time first, so the
    /// export always carries its running duration.
    pub fn export_log(&mut self, delimiter: &str) -> Result<String, TrackerError> {
        self.close_open()?;
        export::delimited(&self.log, delimiter)
    }

    /// Renders the log as one JSON object per line.
    ///
    /// Closes the open action the same way as [`export_log`](Self::export_log).
    pub fn export_json_lines(&mut self) -> Result<String, TrackerError> {
        self.close_open()?;
        Ok(export::json_lines(&self.log))
    }

    fn close_open(&mut self) -> Result<(), TrackerError> {
        let open = self.open_index()?;
        let now = self.elapsed_time()?;
        self.log[open].close_at(now);
        Ok(())
    }

    fn open_index(&self) -> Result<usize, TrackerError> {
        self.last_action
            .filter(|&index| index < self.log.len())
            .ok_or_else(TrackerError::not_started)
    }

    /// Whether a session is running (paused or not).
    pub const fn is_started(&self) -> bool {
        self.started
    }

    /// Whether the session clock is paused.
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// The log in insertion order.
    pub fn records(&self) -> &[ActionRecord] {
        &self.log
    }

    /// The action currently accumulating time.
    pub fn current_action(&self) -> Option<&ActionRecord> {
        self.last_action.and_then(|index| self.log.get(index))
    }

    /// Snapshot of the running session, or `None` before start.
    pub fn summary(&self) -> Option<SessionSummary> {
        let started_at = self.started_at?;
        let elapsed = self.elapsed_time().ok()?;
        Some(SessionSummary {
            started_at,
            elapsed,
            paused: self.paused,
            actions: self.log.len(),
            current: self.current_action().map(|record| record.label.clone()),
        })
    }
}
