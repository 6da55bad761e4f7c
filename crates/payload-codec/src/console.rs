//! The transform widget controller: input buffer, journal, and the staged
//! display queue for each action.
//!
//! Actions do not mutate state directly.  Each one yields an ordered queue of
//! [`ScheduledUpdate`] steps; the embedding surface plays the queue (honouring
//! each step's delay) and feeds every step back through
//! [`TransformConsole::apply`], which records the journal line and updates the
//! input buffer.  Pacing is plain data: a zero [`Pacing`] is valid and the
//! delays are informational only, never a correctness requirement.

use std::time::Duration;

use tracing::debug;

use session_journal::{Journal, LogEntry, LogStatus};

use crate::codec::EncodeError;
use crate::stages;

/// Display delays between the steps of a staged sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Delay between the analyzing announcement and the encode banner.
    pub encode_lead: Duration,
    /// Delay between the analyzing announcement and the decode banner.
    pub decode_lead: Duration,
    /// Delay before each subsequent step.
    pub step: Duration,
}

impl Pacing {
    /// No delays at all: every step is due immediately.
    pub const ZERO: Pacing = Pacing {
        encode_lead: Duration::ZERO,
        decode_lead: Duration::ZERO,
        step: Duration::ZERO,
    };
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            encode_lead: Duration::from_millis(300),
            decode_lead: Duration::from_millis(500),
            step: Duration::from_millis(400),
        }
    }
}

/// One pending display update: a journal line due `after` the previous step,
/// optionally carrying a new value for the input buffer.
#[derive(Debug, Clone)]
pub struct ScheduledUpdate {
    pub after: Duration,
    pub status: LogStatus,
    pub message: String,
    pub buffer: Option<String>,
}

impl ScheduledUpdate {
    fn line(after: Duration, status: LogStatus, message: impl Into<String>) -> Self {
        Self {
            after,
            status,
            message: message.into(),
            buffer: None,
        }
    }
}

/// Controller for the payload transform widget.
///
/// Owns the input buffer and the session journal; constructed per widget
/// instance so tests never share state.
#[derive(Debug)]
pub struct TransformConsole {
    buffer: String,
    journal: Journal,
    pacing: Pacing,
}

/// Code points of the payload echoed in the analyzing announcement.
const ECHO_LIMIT: usize = 20;

impl TransformConsole {
    pub fn new(pacing: Pacing) -> Self {
        Self {
            buffer: String::new(),
            journal: Journal::new(),
            pacing,
        }
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn set_buffer(&mut self, value: impl Into<String>) {
        self.buffer = value.into();
    }

    /// Append a character to the input buffer (interactive editing).
    pub fn push_char(&mut self, c: char) {
        self.buffer.push(c);
    }

    /// Remove the last character from the input buffer, if any.
    pub fn pop_char(&mut self) {
        self.buffer.pop();
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// Build the staged queue for the encode action against the current
    /// buffer.  Does not mutate; play the queue through [`Self::apply`].
    pub fn encode_sequence(&self) -> Vec<ScheduledUpdate> {
        let input = self.buffer.trim();
        if input.is_empty() {
            return vec![Self::empty_input_step()];
        }

        let mut steps = vec![Self::announce_step(input)];
        match stages::encode_stages(input) {
            Ok(pipeline) => {
                steps.push(ScheduledUpdate::line(
                    self.pacing.encode_lead,
                    LogStatus::Info,
                    "Executing multi-layer obfuscation...",
                ));
                let result = pipeline
                    .last()
                    .map(|s| s.value.clone())
                    .unwrap_or_default();
                for stage in pipeline {
                    steps.push(ScheduledUpdate::line(
                        self.pacing.step,
                        LogStatus::Info,
                        format!("Layer {} ({}): {}", stage.stage, stage.label, stage.value),
                    ));
                }
                steps.push(ScheduledUpdate {
                    after: self.pacing.step,
                    status: LogStatus::Success,
                    message: "Obfuscation complete. Result moved to input buffer.".to_string(),
                    buffer: Some(result),
                });
            }
            Err(EncodeError::UnencodableChar(c)) => {
                debug!(character = %c, "encode rejected out-of-range character");
                steps.push(ScheduledUpdate::line(
                    self.pacing.encode_lead,
                    LogStatus::Error,
                    format!("Error: Encoding failed. Character '{c}' is outside the supported range."),
                ));
            }
        }
        steps
    }

    /// Build the staged queue for the decode action against the current
    /// buffer.  Does not mutate; play the queue through [`Self::apply`].
    pub fn decode_sequence(&self) -> Vec<ScheduledUpdate> {
        let input = self.buffer.trim();
        if input.is_empty() {
            return vec![Self::empty_input_step()];
        }

        let mut steps = vec![Self::announce_step(input)];
        match stages::decode_stages(input) {
            Ok(pipeline) => {
                steps.push(ScheduledUpdate::line(
                    self.pacing.decode_lead,
                    LogStatus::Info,
                    "Attempting defensive analysis / decoding...",
                ));
                let result = pipeline
                    .last()
                    .map(|s| s.value.clone())
                    .unwrap_or_default();
                for stage in pipeline {
                    steps.push(ScheduledUpdate::line(
                        self.pacing.step,
                        LogStatus::Info,
                        format!("Layer {} ({}): {}", stage.stage, stage.label, stage.value),
                    ));
                }
                steps.push(ScheduledUpdate {
                    after: self.pacing.step,
                    status: LogStatus::Success,
                    message: "De-obfuscation successful. Payload recovered.".to_string(),
                    buffer: Some(result),
                });
            }
            Err(err) => {
                debug!(%err, "decode rejected input");
                steps.push(ScheduledUpdate::line(
                    self.pacing.decode_lead,
                    LogStatus::Error,
                    "Error: Decoding failed. String is not valid Base64.",
                ));
            }
        }
        steps
    }

    /// Empty the buffer and the journal, leaving a single reset line.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.journal.clear();
        self.journal
            .record(LogEntry::info("Workspace cleared. Framework reset."));
    }

    /// Apply one step: record its journal line and, when present, move its
    /// result into the input buffer.
    pub fn apply(&mut self, step: ScheduledUpdate) {
        self.journal.record(LogEntry::new(step.status, step.message));
        if let Some(buffer) = step.buffer {
            self.buffer = buffer;
        }
    }

    /// Apply a whole queue immediately, ignoring pacing.  Used by tests and
    /// the zero-delay CLI path.
    pub fn apply_all(&mut self, steps: Vec<ScheduledUpdate>) {
        for step in steps {
            self.apply(step);
        }
    }

    fn announce_step(input: &str) -> ScheduledUpdate {
        ScheduledUpdate::line(
            Duration::ZERO,
            LogStatus::Info,
            format!("Analyzing payload: \"{}\"", ellipsize(input, ECHO_LIMIT)),
        )
    }

    fn empty_input_step() -> ScheduledUpdate {
        ScheduledUpdate::line(Duration::ZERO, LogStatus::Error, "Error: Input is empty.")
    }
}

/// Truncate `s` to at most `max_chars` code points, appending `...` when
/// anything was cut.
fn ellipsize(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let prefix: String = s.chars().take(max_chars).collect();
        format!("{prefix}...")
    } else {
        s.to_string()
    }
}
