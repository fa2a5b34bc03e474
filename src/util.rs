//! Encoding helpers shared by the condition and fulfillment types.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};

/// Length of a 32-byte value encoded as unpadded base64url.
pub const BASE64URL_32_BYTES_LEN: usize = 43;

/// Encode bytes as unpadded URL-safe base64.
pub fn base64url(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// True when `value` has the shape of 32 bytes encoded as unpadded base64url,
/// i.e. exactly 43 characters from `[A-Za-z0-9_-]`.
pub fn is_32_bytes_base64url(value: &str) -> bool {
    value.len() == BASE64URL_32_BYTES_LEN
        && value
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base64url_has_no_padding_or_std_alphabet() {
        let encoded = base64url(&[0xfb, 0xff, 0xfe]);
        assert_eq!(encoded, "-__-");

        let encoded = base64url(&[0u8; 32]);
        assert_eq!(encoded.len(), BASE64URL_32_BYTES_LEN);
        assert!(!encoded.contains('='));
    }

    #[test]
    fn test_shape_check() {
        assert!(is_32_bytes_base64url(&base64url(&[7u8; 32])));
        assert!(!is_32_bytes_base64url(&base64url(&[7u8; 31])));
        assert!(!is_32_bytes_base64url(&"A".repeat(44)));
        assert!(!is_32_bytes_base64url(&format!("{}+", "A".repeat(42))));
        assert!(!is_32_bytes_base64url(&format!("{}=", "A".repeat(42))));
        assert!(!is_32_bytes_base64url(""));
    }
}
