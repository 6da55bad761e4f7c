//! Mock traffic inspector for the sentinel-lab demo.
//!
//! A fixed, declared-order table of signature rules is scanned against a
//! submitted payload; the first matching pattern anywhere in the scan decides
//! the verdict.  A length gate runs before any signature matching.  This is
//! a simulation for display purposes — there is no real request model, no
//! evasion handling, and no state beyond the session counters.
//!
//! # Quick start
//!
//! ```rust
//! use signature_engine::{RequestInspector, Severity};
//!
//! let inspector = RequestInspector::new()?;
//!
//! let verdict = inspector.inspect("' OR 1=1 --");
//! assert!(!verdict.allowed);
//! assert_eq!(verdict.reason.as_deref(), Some("Pattern match: SQL Injection"));
//! assert_eq!(verdict.severity, Some(Severity::High));
//!
//! assert!(inspector.inspect("hello").allowed);
//! # Ok::<(), signature_engine::InspectorError>(())
//! ```

pub mod console;
pub mod inspector;
pub mod signatures;
pub mod verdict;

// Re-export primary public types at the crate root for convenience.
pub use console::{CounterSnapshot, InspectorConsole};
pub use inspector::{InspectorError, RequestInspector, MAX_PAYLOAD_CHARS};
pub use signatures::{Severity, SignatureRule, RULES};
pub use verdict::Verdict;
