//! Base64 helpers shared by the handlers

use base64::{DecodeError, Engine, engine::general_purpose::STANDARD};

/// Encode bytes with the standard, padded alphabet
pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode a base64 payload
///
/// A `data:<mime>;base64,` prefix is stripped and ASCII whitespace is
/// ignored, so payloads lifted from a download link or wrapped by a mail
/// client decode as well.
pub fn decode(payload: &str) -> Result<Vec<u8>, DecodeError> {
    let payload = strip_data_uri(payload.trim());
    if payload.bytes().any(|b| b.is_ascii_whitespace()) {
        let compact: String = payload
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        return STANDARD.decode(compact);
    }
    STANDARD.decode(payload)
}

fn strip_data_uri(payload: &str) -> &str {
    if payload.starts_with("data:") {
        if let Some(pos) = payload.find(";base64,") {
            return &payload[pos + ";base64,".len()..];
        }
    }
    payload
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode() {
        assert_eq!(encode(b"hello"), "aGVsbG8=");
        assert_eq!(encode(b""), "");
    }

    #[test]
    fn test_decode_plain_and_wrapped() {
        assert_eq!(decode("aGVsbG8=").unwrap(), b"hello");
        assert_eq!(decode("aGVs\nbG8=\n").unwrap(), b"hello");
        assert_eq!(
            decode("data:application/octet-stream;base64,aGVsbG8=").unwrap(),
            b"hello"
        );
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode("not base64!").is_err());
    }
}
