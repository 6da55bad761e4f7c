//! Staged view of the codec: one [`TransformStage`] per pipeline layer, in
//! display order.

use serde::Serialize;

use crate::codec::{self, DecodeError, EncodeError};

/// The intermediate output of one transform layer, produced for display and
/// discarded afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct TransformStage {
    /// 1-based display position.
    pub stage: usize,
    pub label: &'static str,
    pub value: String,
}

/// The ordered stages of the encode direction: reversal, then base64.
///
/// The last stage's value is the final encoded payload.
pub fn encode_stages(input: &str) -> Result<Vec<TransformStage>, EncodeError> {
    let reversed = codec::reverse(input);
    let encoded = codec::encode(input)?;
    Ok(vec![
        TransformStage {
            stage: 1,
            label: "String Reversal",
            value: reversed,
        },
        TransformStage {
            stage: 2,
            label: "Base64 Encoding",
            value: encoded,
        },
    ])
}

/// The ordered stages of the decode direction: base64 decode, then reversal.
///
/// The last stage's value is the recovered payload.
pub fn decode_stages(input: &str) -> Result<Vec<TransformStage>, DecodeError> {
    let decoded = codec::decode_base64(input)?;
    let recovered = codec::reverse(&decoded);
    Ok(vec![
        TransformStage {
            stage: 1,
            label: "Base64 Decoding",
            value: decoded,
        },
        TransformStage {
            stage: 2,
            label: "Reversal Recovery",
            value: recovered,
        },
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_stages_are_ordered() {
        let stages = encode_stages("abc").unwrap();
        assert_eq!(stages.len(), 2);
        assert_eq!(stages[0].stage, 1);
        assert_eq!(stages[0].label, "String Reversal");
        assert_eq!(stages[0].value, "cba");
        assert_eq!(stages[1].stage, 2);
        assert_eq!(stages[1].label, "Base64 Encoding");
        assert_eq!(stages[1].value, "Y2Jh");
    }

    #[test]
    fn decode_stages_recover_the_original() {
        let stages = decode_stages("Y2Jh").unwrap();
        assert_eq!(stages[0].label, "Base64 Decoding");
        assert_eq!(stages[0].value, "cba");
        assert_eq!(stages[1].label, "Reversal Recovery");
        assert_eq!(stages[1].value, "abc");
    }

    #[test]
    fn encode_stages_propagate_codec_errors() {
        assert!(encode_stages("héllo☃").is_err());
    }

    #[test]
    fn decode_stages_propagate_codec_errors() {
        assert!(decode_stages("%%%").is_err());
    }
}
