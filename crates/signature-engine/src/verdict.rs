use serde::Serialize;

use crate::signatures::Severity;

/// The allow/block classification for one inspected payload.
#[derive(Debug, Clone, Serialize)]
pub struct Verdict {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
}

impl Verdict {
    /// Convenience constructor for an allowed verdict with no reason.
    pub fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
            severity: None,
        }
    }

    /// Convenience constructor for a blocked verdict.
    pub fn block(reason: impl Into<String>, severity: Severity) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.into()),
            severity: Some(severity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_has_no_reason_or_severity() {
        let v = Verdict::allow();
        assert!(v.allowed);
        assert!(v.reason.is_none());
        assert!(v.severity.is_none());
    }

    #[test]
    fn block_carries_reason_and_severity() {
        let v = Verdict::block("Pattern match: SQL Injection", Severity::High);
        assert!(!v.allowed);
        assert_eq!(v.reason.as_deref(), Some("Pattern match: SQL Injection"));
        assert_eq!(v.severity, Some(Severity::High));
    }
}
