//! Signature rule table.
//!
//! Contains the static catalogue of regex patterns the inspector scans
//! payloads against.  Each rule carries a display name, an ordered pattern
//! list, and a [`Severity`] reported when one of its patterns fires.  The
//! declaration order of rules, and of patterns within a rule, is an
//! observable contract: evaluation walks both in order and the first match
//! wins.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Reported weight of a blocked verdict.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Medium => write!(f, "Medium"),
            Self::High => write!(f, "High"),
            Self::Critical => write!(f, "Critical"),
        }
    }
}

// ---------------------------------------------------------------------------
// Rule definition
// ---------------------------------------------------------------------------

/// A named group of patterns sharing a severity.
pub struct SignatureRule {
    /// Display name used in blocked-verdict reasons.
    pub name: &'static str,
    pub severity: Severity,
    /// Regex strings, tried in declared order (compiled by
    /// [`crate::inspector::RequestInspector`]).
    pub patterns: &'static [&'static str],
}

// ---------------------------------------------------------------------------
// Rule catalogue
// ---------------------------------------------------------------------------

/// The built-in rule table, scanned in this exact order.
pub static RULES: &[SignatureRule] = &[
    SignatureRule {
        name: "SQL Injection",
        severity: Severity::High,
        patterns: &[
            r"(?i)SELECT",
            r"(?i)UNION",
            r"(?i)DROP",
            r"(?i)SLEEP\(",
            r#"(?i)['"]\s*OR\s*['"]?\d+"#,
            r"--",
        ],
    },
    SignatureRule {
        name: "Cross-Site Scripting (XSS)",
        severity: Severity::High,
        patterns: &[
            r"(?i)<script",
            r"(?i)alert\(",
            r"(?i)onerror=",
            r"(?i)javascript:",
        ],
    },
    SignatureRule {
        name: "Directory Traversal",
        severity: Severity::Critical,
        patterns: &[r"\.\./", r"(?i)/etc/passwd", r"(?i)C:\\Windows"],
    },
];
