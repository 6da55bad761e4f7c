use serde::{Deserialize, Serialize};

/// A single journal entry representing one rendered line in a widget's
/// session history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: uuid::Uuid,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub status: LogStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<RequestRecord>,
}

impl LogEntry {
    /// Create a new `LogEntry` with an auto-generated UUID v4 and the current
    /// UTC timestamp. `request` defaults to `None`.
    pub fn new(status: LogStatus, message: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            timestamp: chrono::Utc::now(),
            status,
            message: message.into(),
            request: None,
        }
    }

    /// Shorthand for an [`LogStatus::Info`] entry.
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(LogStatus::Info, message)
    }

    /// Shorthand for a [`LogStatus::Success`] entry.
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(LogStatus::Success, message)
    }

    /// Shorthand for a [`LogStatus::Error`] entry.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(LogStatus::Error, message)
    }

    /// Attach a request record to this entry, consuming and returning `self`
    /// for builder-style usage.
    pub fn with_request(mut self, record: RequestRecord) -> Self {
        self.request = Some(record);
        self
    }
}

/// Display status of a journal line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogStatus {
    Info,
    Success,
    Error,
}

/// Structured detail attached to inspector rows: the inspected request and
/// the rendered form of its verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestRecord {
    pub method: String,
    pub target: String,
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_entry_has_no_request_record() {
        let entry = LogEntry::info("hello");
        assert_eq!(entry.status, LogStatus::Info);
        assert_eq!(entry.message, "hello");
        assert!(entry.request.is_none());
    }

    #[test]
    fn with_request_attaches_record() {
        let entry = LogEntry::error("blocked").with_request(RequestRecord {
            method: "POST".to_string(),
            target: "/login?user=admin".to_string(),
            allowed: false,
            reason: Some("Pattern match: SQL Injection".to_string()),
            severity: Some("High".to_string()),
        });
        let record = entry.request.expect("record should be attached");
        assert!(!record.allowed);
        assert_eq!(record.method, "POST");
    }

    #[test]
    fn serializes_without_absent_fields() {
        let entry = LogEntry::success("ok");
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("request").is_none());
        assert_eq!(json["status"], "success");
    }

    #[test]
    fn entries_get_distinct_ids() {
        let a = LogEntry::info("a");
        let b = LogEntry::info("b");
        assert_ne!(a.id, b.id);
    }
}
