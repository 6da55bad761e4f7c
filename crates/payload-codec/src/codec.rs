//! The pure two-stage codec: code-point reversal plus base64 transcoding.
//!
//! Encoding only supports payloads whose code points fit in a single byte
//! (the Latin-1 range).  That restriction is inherited from the reference
//! encoding and is enforced explicitly: an out-of-range character fails with
//! [`EncodeError::UnencodableChar`] rather than silently corrupting the text.

use base64::{engine::general_purpose::STANDARD, Engine};
use tracing::debug;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors produced by [`encode`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EncodeError {
    #[error("character '{0}' is outside the single-byte range")]
    UnencodableChar(char),
}

/// Errors produced by [`decode`].
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("input is not valid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Reverse the code-point sequence of `input`.
pub fn reverse(input: &str) -> String {
    input.chars().rev().collect()
}

/// Reverse `input`, then base64-encode the reversed text's byte
/// representation (standard alphabet, padded).
pub fn encode(input: &str) -> Result<String, EncodeError> {
    let reversed = reverse(input);
    let bytes = latin1_bytes(&reversed)?;
    Ok(STANDARD.encode(bytes))
}

/// Inverse of [`encode`]: base64-decode `input`, then reverse the decoded
/// code-point sequence.
pub fn decode(input: &str) -> Result<String, DecodeError> {
    Ok(reverse(&decode_base64(input)?))
}

/// Base64-decode `input` and interpret the bytes as Latin-1 code points.
///
/// The result is still in reversed order; [`decode`] applies the final
/// reversal. Exposed separately so the staged pipeline can surface the
/// intermediate value.
pub(crate) fn decode_base64(input: &str) -> Result<String, DecodeError> {
    let bytes = STANDARD.decode(input).inspect_err(|err| {
        debug!(%err, "base64 decode rejected input");
    })?;
    Ok(bytes.into_iter().map(char::from).collect())
}

fn latin1_bytes(text: &str) -> Result<Vec<u8>, EncodeError> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).map_err(|_| EncodeError::UnencodableChar(c)))
        .collect()
}
