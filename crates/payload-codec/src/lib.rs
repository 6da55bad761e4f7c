//! Payload transform simulator: a two-stage reversible "obfuscation" toy.
//!
//! The transform reverses the code-point order of the input and then
//! base64-encodes the reversed text's single-byte representation.  Running
//! the stages in the opposite order recovers the original payload.  This is
//! a demonstration, not cryptography: the point is the staged, log-style
//! presentation, which [`console::TransformConsole`] models as a queue of
//! discretely scheduled display updates with the pacing carried as data.
//!
//! # Quick start
//!
//! ```rust
//! use payload_codec::codec;
//!
//! let encoded = codec::encode("abc")?;
//! assert_eq!(encoded, "Y2Jh");
//! assert_eq!(codec::decode(&encoded)?, "abc");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod codec;
pub mod console;
pub mod stages;

// Re-export primary public types at the crate root for convenience.
pub use codec::{DecodeError, EncodeError};
pub use console::{Pacing, ScheduledUpdate, TransformConsole};
pub use stages::TransformStage;
