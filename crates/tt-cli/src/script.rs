//! Session script parsing.
//!
//! A script is plain text with one step per line. Blank lines and lines
//! starting with `#` are skipped. Labels take the rest of the line, so they
//! may contain spaces.

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// A single instruction in a session script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Start the session with a first action.
    Start(String),
    /// Start, pause, or resume depending on the session state.
    Toggle(Option<String>),
    /// Pause the session clock.
    Pause,
    /// Resume the session clock.
    Resume,
    /// Record a new action.
    Record(String),
    /// Record a one-time-only action.
    Once(String),
    /// Let time pass.
    Wait(Duration),
    /// Print the active elapsed time.
    Elapsed,
    /// Print the action log.
    Export,
    /// Discard the session.
    Stop,
}

/// Why a script line could not be parsed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StepError {
    /// The keyword is not a known step.
    #[error("unknown step: {0}")]
    Unknown(String),
    /// The step needs a label but none was given.
    #[error("`{0}` requires a label")]
    MissingLabel(&'static str),
    /// The step takes no argument but one was given.
    #[error("`{0}` takes no argument")]
    UnexpectedArgument(&'static str),
    /// The wait duration is not a whole number of milliseconds.
    #[error("invalid wait duration: {0}")]
    InvalidWait(String),
}

/// A step error located at a 1-based script line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("line {line}: {source}")]
pub struct ScriptError {
    pub line: usize,
    #[source]
    pub source: StepError,
}

impl FromStr for Step {
    type Err = StepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (keyword, arg) = match s.split_once(char::is_whitespace) {
            Some((keyword, rest)) => (keyword, Some(rest.trim()).filter(|a| !a.is_empty())),
            None => (s, None),
        };

        let label = |name: &'static str| {
            arg.map(str::to_string)
                .ok_or(StepError::MissingLabel(name))
        };
        let bare = |name: &'static str, step: Self| match arg {
            Some(_) => Err(StepError::UnexpectedArgument(name)),
            None => Ok(step),
        };

        match keyword {
            "start" => label("start").map(Self::Start),
            "toggle" => Ok(Self::Toggle(arg.map(str::to_string))),
            "pause" => bare("pause", Self::Pause),
            "resume" => bare("resume", Self::Resume),
            "record" => label("record").map(Self::Record),
            "once" => label("once").map(Self::Once),
            "wait" => {
                let raw = arg.unwrap_or_default();
                raw.parse::<u64>()
                    .map(|ms| Self::Wait(Duration::from_millis(ms)))
                    .map_err(|_| StepError::InvalidWait(raw.to_string()))
            }
            "elapsed" => bare("elapsed", Self::Elapsed),
            "export" => bare("export", Self::Export),
            "stop" => bare("stop", Self::Stop),
            other => Err(StepError::Unknown(other.to_string())),
        }
    }
}

/// Parses a whole script into `(line, step)` pairs.
///
/// Stops at the first malformed line.
pub fn parse(script: &str) -> Result<Vec<(usize, Step)>, ScriptError> {
    script
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line, text)| {
            text.parse::<Step>()
                .map(|step| (line, step))
                .map_err(|source| ScriptError { line, source })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_step() {
        assert_eq!("start read".parse::<Step>(), Ok(Step::Start("read".into())));
        assert_eq!("toggle".parse::<Step>(), Ok(Step::Toggle(None)));
        assert_eq!("toggle A".parse::<Step>(), Ok(Step::Toggle(Some("A".into()))));
        assert_eq!("pause".parse::<Step>(), Ok(Step::Pause));
        assert_eq!("resume".parse::<Step>(), Ok(Step::Resume));
        assert_eq!("record write".parse::<Step>(), Ok(Step::Record("write".into())));
        assert_eq!("once sneeze".parse::<Step>(), Ok(Step::Once("sneeze".into())));
        assert_eq!(
            "wait 150".parse::<Step>(),
            Ok(Step::Wait(Duration::from_millis(150)))
        );
        assert_eq!("elapsed".parse::<Step>(), Ok(Step::Elapsed));
        assert_eq!("export".parse::<Step>(), Ok(Step::Export));
        assert_eq!("stop".parse::<Step>(), Ok(Step::Stop));
    }

    #[test]
    fn labels_keep_inner_spaces() {
        assert_eq!(
            "record  make   coffee ".parse::<Step>(),
            Ok(Step::Record("make   coffee".into()))
        );
    }

    #[test]
    fn rejects_malformed_steps() {
        assert_eq!(
            "record".parse::<Step>(),
            Err(StepError::MissingLabel("record"))
        );
        assert_eq!(
            "pause now".parse::<Step>(),
            Err(StepError::UnexpectedArgument("pause"))
        );
        assert_eq!(
            "wait soon".parse::<Step>(),
            Err(StepError::InvalidWait("soon".into()))
        );
        assert_eq!("wait".parse::<Step>(), Err(StepError::InvalidWait(String::new())));
        assert_eq!(
            "jump".parse::<Step>(),
            Err(StepError::Unknown("jump".into()))
        );
    }

    #[test]
    fn parse_skips_comments_and_blanks() {
        let steps = parse("# warmup\n\nstart A\n  # indented comment\nwait 10\n").unwrap();
        assert_eq!(
            steps,
            vec![
                (3, Step::Start("A".into())),
                (5, Step::Wait(Duration::from_millis(10))),
            ]
        );
    }

    #[test]
    fn parse_reports_line_number() {
        let err = parse("start A\n\nfly away\n").unwrap_err();
        assert_eq!(err.line, 3);
        assert_eq!(err.to_string(), "line 3: unknown step: fly");
    }
}
