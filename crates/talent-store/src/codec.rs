//! Text encoding of embeddings for the `embedding` column.
//!
//! Vectors are stored as JSON arrays. serde_json writes the shortest
//! representation that parses back to the same `f32`, so the round trip
//! is exact.

use crate::error::Result;

/// Encode an embedding as a JSON array.
pub fn encode_embedding(embedding: &[f32]) -> String {
    // Serializing a slice of finite floats cannot fail; non-finite values
    // become `null` and are rejected by `decode_embedding`.
    serde_json::to_string(embedding).unwrap_or_else(|_| "[]".to_string())
}

/// Decode an embedding previously written by [`encode_embedding`].
pub fn decode_embedding(text: &str) -> Result<Vec<f32>> {
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_round_trip() {
        let values = vec![
            0.1f32,
            -0.333_333_34,
            1.0e-30,
            f32::MAX,
            f32::MIN_POSITIVE,
            0.0,
            123_456.79,
        ];
        let decoded = decode_embedding(&encode_embedding(&values)).unwrap();
        assert_eq!(
            values.iter().map(|v| v.to_bits()).collect::<Vec<_>>(),
            decoded.iter().map(|v| v.to_bits()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_format_is_json_array() {
        assert_eq!(encode_embedding(&[1.0, 0.5]), "[1.0,0.5]");
        assert_eq!(decode_embedding("[1, 2.5]").unwrap(), vec![1.0, 2.5]);
    }

    #[test]
    fn test_garbage_fails() {
        assert!(decode_embedding("not json").is_err());
        assert!(decode_embedding("[null]").is_err());
    }
}
