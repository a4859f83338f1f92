//! HMAC-SHA1 signing and base64 payload encoding shared by both token layers.

use base64::{engine::general_purpose, Engine as _};
use hmac::{Hmac, Mac};
use sha1::Sha1;
use subtle::ConstantTimeEq;

type HmacSha1 = Hmac<Sha1>;

/// Compute the lowercase hex HMAC-SHA1 of `message` under `key`.
pub fn mac(key: &str, message: &str) -> String {
    let mut mac =
        HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC can take key of any size");
    mac.update(message.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Check a provided hex MAC against the one computed for `message`.
///
/// The comparison runs in constant time with respect to the contents of the
/// two digests.
pub fn mac_matches(key: &str, message: &str, provided: &str) -> bool {
    let expected = mac(key, message);
    expected.as_bytes().ct_eq(provided.as_bytes()).into()
}

/// Encode a payload with the standard, padded base64 alphabet.
pub fn encode(payload: &str) -> String {
    general_purpose::STANDARD.encode(payload.as_bytes())
}

/// Decode standard, padded base64.
pub fn decode(text: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::STANDARD.decode(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mac_known_vector() {
        // RFC 2202 test case 2
        assert_eq!(
            mac("Jefe", "what do ya want for nothing?"),
            "effcdf6ae5eb2fa2d27416d5f184df9c259a7c79"
        );
    }

    #[test]
    fn test_mac_is_40_hex_chars() {
        let digest = mac("key", "AUTH|payload");
        assert_eq!(digest.len(), 40);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_mac_matches() {
        let digest = mac("key", "APP|payload");
        assert!(mac_matches("key", "APP|payload", &digest));
        assert!(!mac_matches("other", "APP|payload", &digest));
        assert!(!mac_matches("key", "APP|payloae", &digest));
    }

    #[test]
    fn test_mac_matches_rejects_truncated_and_uppercase() {
        let digest = mac("key", "APP|payload");
        assert!(!mac_matches("key", "APP|payload", &digest[..39]));
        assert!(!mac_matches("key", "APP|payload", ""));
        assert!(!mac_matches("key", "APP|payload", &digest.to_uppercase()));
    }

    #[test]
    fn test_encode_decode() {
        let encoded = encode("testuser|DIXXXXXXXXXXXXXXXXXX|1615727243");
        assert_eq!(
            encoded,
            "dGVzdHVzZXJ8RElYWFhYWFhYWFhYWFhYWFhYWFh8MTYxNTcyNzI0Mw=="
        );
        assert_eq!(
            decode(&encoded).unwrap(),
            b"testuser|DIXXXXXXXXXXXXXXXXXX|1615727243"
        );
    }

    #[test]
    fn test_decode_invalid() {
        assert!(decode("not-base64!").is_err());
        // Padding is required
        assert!(decode("dGVzdA").is_err());
    }
}
