//! Payload inspection against the signature rule table.

use regex::Regex;
use tracing::debug;

use crate::signatures::{Severity, SignatureRule, RULES};
use crate::verdict::Verdict;

/// Payloads longer than this (in code points) are blocked before any
/// signature matching runs.
pub const MAX_PAYLOAD_CHARS: usize = 256;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur while constructing a [`RequestInspector`].
#[derive(Debug, thiserror::Error)]
pub enum InspectorError {
    #[error("failed to compile signature pattern: {0}")]
    RegexCompile(#[from] regex::Error),
}

// ---------------------------------------------------------------------------
// Inspector
// ---------------------------------------------------------------------------

/// One rule with its patterns compiled, in declared order.
struct CompiledRule {
    rule: &'static SignatureRule,
    regexes: Vec<Regex>,
}

/// Compiled inspector over the built-in rule table.
///
/// Rules are scanned in declared order, patterns within a rule in declared
/// order, and the first matching pattern anywhere in the scan decides the
/// verdict.  Individual [`Regex`] values are kept per pattern (rather than a
/// `RegexSet`) because that ordering is part of the contract.
pub struct RequestInspector {
    compiled: Vec<CompiledRule>,
}

impl RequestInspector {
    /// Compile every pattern in the rule table and return a ready-to-use
    /// inspector.
    pub fn new() -> Result<Self, InspectorError> {
        let compiled = RULES
            .iter()
            .map(|rule| {
                let regexes = rule
                    .patterns
                    .iter()
                    .map(|p| Regex::new(p))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(CompiledRule { rule, regexes })
            })
            .collect::<Result<Vec<_>, InspectorError>>()?;
        Ok(Self { compiled })
    }

    /// Classify a payload.
    ///
    /// An empty payload is always allowed.  The length gate runs before the
    /// signature scan and short-circuits it.  Each call is stateless and
    /// independent.
    pub fn inspect(&self, payload: &str) -> Verdict {
        if payload.is_empty() {
            return Verdict::allow();
        }

        if payload.chars().count() > MAX_PAYLOAD_CHARS {
            debug!(length = payload.chars().count(), "payload blocked by length gate");
            return Verdict::block(
                format!("Payload length exceeded (Max {MAX_PAYLOAD_CHARS})"),
                Severity::Medium,
            );
        }

        for cr in &self.compiled {
            for re in &cr.regexes {
                if re.is_match(payload) {
                    debug!(
                        rule = cr.rule.name,
                        pattern = re.as_str(),
                        "payload blocked by signature match"
                    );
                    return Verdict::block(
                        format!("Pattern match: {}", cr.rule.name),
                        cr.rule.severity,
                    );
                }
            }
        }

        Verdict::allow()
    }

    /// Number of rules in the compiled table.
    pub fn rule_count(&self) -> usize {
        self.compiled.len()
    }

    /// Total number of compiled patterns across all rules.
    pub fn pattern_count(&self) -> usize {
        self.compiled.iter().map(|cr| cr.regexes.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inspector() -> RequestInspector {
        RequestInspector::new().expect("rule table should compile")
    }

    #[test]
    fn empty_payload_is_allowed() {
        let v = inspector().inspect("");
        assert!(v.allowed);
        assert!(v.reason.is_none());
    }

    #[test]
    fn benign_payload_is_allowed() {
        let v = inspector().inspect("hello");
        assert!(v.allowed);
        assert!(v.reason.is_none());
        assert!(v.severity.is_none());
    }

    #[test]
    fn sql_injection_is_blocked() {
        let v = inspector().inspect("' OR 1=1 --");
        assert!(!v.allowed);
        assert_eq!(v.reason.as_deref(), Some("Pattern match: SQL Injection"));
        assert_eq!(v.severity, Some(Severity::High));
    }

    #[test]
    fn xss_is_blocked() {
        let v = inspector().inspect("<script>alert(1)</script>");
        assert!(!v.allowed);
        assert_eq!(
            v.reason.as_deref(),
            Some("Pattern match: Cross-Site Scripting (XSS)")
        );
        assert_eq!(v.severity, Some(Severity::High));
    }

    #[test]
    fn traversal_is_blocked_as_critical() {
        let v = inspector().inspect("../../etc/passwd");
        assert!(!v.allowed);
        assert_eq!(v.reason.as_deref(), Some("Pattern match: Directory Traversal"));
        assert_eq!(v.severity, Some(Severity::Critical));
    }

    #[test]
    fn length_gate_precedes_signature_scan() {
        // 300 benign characters: no pattern would match, yet the payload is
        // blocked by length alone.
        let payload = "a".repeat(300);
        let v = inspector().inspect(&payload);
        assert!(!v.allowed);
        assert_eq!(v.reason.as_deref(), Some("Payload length exceeded (Max 256)"));
        assert_eq!(v.severity, Some(Severity::Medium));

        // A long payload containing a signature still reports the length
        // reason, proving the gate short-circuits the scan.
        let payload = format!("<script>{}", "a".repeat(300));
        let v = inspector().inspect(&payload);
        assert_eq!(v.reason.as_deref(), Some("Payload length exceeded (Max 256)"));
    }

    #[test]
    fn exactly_256_chars_passes_the_length_gate() {
        let payload = "a".repeat(256);
        assert!(inspector().inspect(&payload).allowed);
    }

    #[test]
    fn first_match_wins_across_rules() {
        // Matches both the SQL rule and the XSS rule; the SQL rule is
        // declared first and must win.
        let v = inspector().inspect("SELECT <script>");
        assert_eq!(v.reason.as_deref(), Some("Pattern match: SQL Injection"));
    }

    #[test]
    fn rule_order_beats_severity() {
        // Traversal is Critical but declared last; the High SQL rule still
        // wins when both match.
        let v = inspector().inspect("UNION ../");
        assert_eq!(v.reason.as_deref(), Some("Pattern match: SQL Injection"));
        assert_eq!(v.severity, Some(Severity::High));
    }

    #[test]
    fn matching_is_case_insensitive_where_declared() {
        let v = inspector().inspect("select * from users");
        assert_eq!(v.reason.as_deref(), Some("Pattern match: SQL Injection"));

        let v = inspector().inspect("JaVaScRiPt:void(0)");
        assert_eq!(
            v.reason.as_deref(),
            Some("Pattern match: Cross-Site Scripting (XSS)")
        );
    }

    #[test]
    fn whitespace_payload_is_inspected_and_allowed() {
        assert!(inspector().inspect("   ").allowed);
    }

    #[test]
    fn counts_match_the_catalogue() {
        let i = inspector();
        assert_eq!(i.rule_count(), RULES.len());
        assert_eq!(
            i.pattern_count(),
            RULES.iter().map(|r| r.patterns.len()).sum::<usize>()
        );
    }
}
