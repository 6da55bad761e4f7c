//! In-memory, newest-first session journal for the sentinel-lab widgets.
//!
//! Each widget owns its own [`Journal`]: an append-only sequence of
//! [`LogEntry`] values with insertion always at the head, so iteration yields
//! the most recent entry first.  Entries are never edited or evicted; the only
//! removal is an explicit full [`Journal::clear`].  Nothing is persisted —
//! the journal lives exactly as long as the console that owns it.
//!
//! # Quick start
//!
//! ```rust
//! use session_journal::{Journal, LogEntry, LogStatus};
//!
//! let mut journal = Journal::new();
//! journal.record(LogEntry::info("first"));
//! journal.record(LogEntry::success("second"));
//!
//! // Newest first.
//! let messages: Vec<&str> = journal.iter().map(|e| e.message.as_str()).collect();
//! assert_eq!(messages, ["second", "first"]);
//! assert_eq!(journal.iter().next().unwrap().status, LogStatus::Success);
//! ```

pub mod entry;
pub mod journal;

// Re-export primary public types at the crate root for convenience.
pub use entry::{LogEntry, LogStatus, RequestRecord};
pub use journal::Journal;
