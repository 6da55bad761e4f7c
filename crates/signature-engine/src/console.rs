//! The inspector widget controller: journal, monotonic counters, and the
//! submit/record operations.

use serde::Serialize;

use session_journal::{Journal, LogEntry, RequestRecord};

use crate::inspector::{InspectorError, RequestInspector};
use crate::verdict::Verdict;

/// Code points of the payload shown in the log's target column.
const TARGET_PAYLOAD_LIMIT: usize = 30;

/// Point-in-time view of the session counters.
///
/// Both values are monotonically non-decreasing for the lifetime of the
/// console; there is no reset operation.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CounterSnapshot {
    pub total_requests: u64,
    pub blocked_requests: u64,
}

/// Controller for the mock traffic inspector widget.
///
/// Owns the journal, the counters, and a compiled [`RequestInspector`];
/// constructed per widget instance so tests never share state.
pub struct InspectorConsole {
    journal: Journal,
    inspector: RequestInspector,
    total_requests: u64,
    blocked_requests: u64,
}

impl InspectorConsole {
    pub fn new() -> Result<Self, InspectorError> {
        Ok(Self {
            journal: Journal::new(),
            inspector: RequestInspector::new()?,
            total_requests: 0,
            blocked_requests: 0,
        })
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    pub fn counters(&self) -> CounterSnapshot {
        CounterSnapshot {
            total_requests: self.total_requests,
            blocked_requests: self.blocked_requests,
        }
    }

    /// Inspect one simulated request and record the outcome.
    ///
    /// An empty payload is rejected before recording: no log row, no counter
    /// change, and the returned verdict is allowed.
    pub fn submit(&mut self, method: &str, path: &str, payload: &str) -> Verdict {
        if payload.is_empty() {
            return Verdict::allow();
        }
        let verdict = self.inspector.inspect(payload);
        self.record_request(method, path, payload, &verdict);
        verdict
    }

    /// Prepend one log row for an inspected request and bump the counters:
    /// `total_requests` always, `blocked_requests` iff the verdict blocked.
    pub fn record_request(&mut self, method: &str, path: &str, payload: &str, verdict: &Verdict) {
        let target = if payload.is_empty() {
            path.to_string()
        } else {
            format!("{path}?{}", ellipsize(payload, TARGET_PAYLOAD_LIMIT))
        };

        let message = verdict
            .reason
            .clone()
            .unwrap_or_else(|| "Request allowed".to_string());

        let record = RequestRecord {
            method: method.to_string(),
            target,
            allowed: verdict.allowed,
            reason: verdict.reason.clone(),
            severity: verdict.severity.map(|s| s.to_string()),
        };

        let entry = if verdict.allowed {
            LogEntry::success(message)
        } else {
            LogEntry::error(message)
        };
        self.journal.record(entry.with_request(record));

        self.total_requests += 1;
        if !verdict.allowed {
            self.blocked_requests += 1;
        }
    }

    /// Record the synthetic "system online" boot row.
    ///
    /// The row passes through [`Self::record_request`] and therefore counts
    /// toward `total_requests`.  The embedding surface owns the startup delay
    /// before calling this.
    pub fn boot_record(&mut self) {
        let verdict = Verdict {
            allowed: true,
            reason: Some(format!(
                "Sentinel shield v{} online",
                env!("CARGO_PKG_VERSION")
            )),
            severity: None,
        };
        self.record_request("SYSTEM", "/boot", "", &verdict);
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

#[cfg(test)]
mod tests {
    use super::*;

    fn console() -> InspectorConsole {
        InspectorConsole::new().expect("rule table should compile")
    }

    #[test]
    fn empty_submission_changes_nothing() {
        let mut c = console();
        let v = c.submit("GET", "/search", "");
        assert!(v.allowed);
        assert!(c.journal().is_empty());
        assert_eq!(c.counters().total_requests, 0);
        assert_eq!(c.counters().blocked_requests, 0);
    }

    #[test]
    fn allowed_submission_records_a_row() {
        let mut c = console();
        let v = c.submit("GET", "/search", "hello");
        assert!(v.allowed);
        assert_eq!(c.counters().total_requests, 1);
        assert_eq!(c.counters().blocked_requests, 0);

        let entry = c.journal().latest().unwrap();
        let record = entry.request.as_ref().unwrap();
        assert!(record.allowed);
        assert_eq!(record.method, "GET");
        assert_eq!(record.target, "/search?hello");
    }

    #[test]
    fn blocked_submission_bumps_both_counters() {
        let mut c = console();
        let v = c.submit("POST", "/login", "' OR 1=1 --");
        assert!(!v.allowed);
        assert_eq!(c.counters().total_requests, 1);
        assert_eq!(c.counters().blocked_requests, 1);

        let record = c.journal().latest().unwrap().request.as_ref().unwrap();
        assert!(!record.allowed);
        assert_eq!(record.reason.as_deref(), Some("Pattern match: SQL Injection"));
        assert_eq!(record.severity.as_deref(), Some("High"));
    }

    #[test]
    fn counters_track_interleaved_submissions() {
        let mut c = console();
        c.submit("GET", "/", "hello");
        c.submit("GET", "/", "<script>alert(1)</script>");
        c.submit("GET", "/", "plain text");
        c.submit("GET", "/", "../../etc/passwd");
        c.submit("GET", "/", "more text");
        assert_eq!(c.counters().total_requests, 5);
        assert_eq!(c.counters().blocked_requests, 2);
    }

    #[test]
    fn rows_are_newest_first() {
        let mut c = console();
        c.submit("GET", "/a", "first");
        c.submit("GET", "/b", "second");
        let targets: Vec<String> = c
            .journal()
            .iter()
            .map(|e| e.request.as_ref().unwrap().target.clone())
            .collect();
        assert_eq!(targets, ["/b?second", "/a?first"]);
    }

    #[test]
    fn long_payload_is_truncated_in_target() {
        let mut c = console();
        c.submit("GET", "/q", &"x".repeat(40));
        let record = c.journal().latest().unwrap().request.as_ref().unwrap();
        assert_eq!(record.target, format!("/q?{}...", "x".repeat(30)));
    }

    #[test]
    fn boot_record_is_an_allowed_system_row() {
        let mut c = console();
        c.boot_record();
        assert_eq!(c.counters().total_requests, 1);
        assert_eq!(c.counters().blocked_requests, 0);

        let record = c.journal().latest().unwrap().request.as_ref().unwrap();
        assert!(record.allowed);
        assert_eq!(record.method, "SYSTEM");
        assert_eq!(record.target, "/boot");
        assert!(record
            .reason
            .as_deref()
            .unwrap()
            .starts_with("Sentinel shield v"));
    }

    #[test]
    fn whitespace_payload_is_recorded_not_skipped() {
        let mut c = console();
        let v = c.submit("GET", "/", "   ");
        assert!(v.allowed);
        assert_eq!(c.counters().total_requests, 1);
    }
}
