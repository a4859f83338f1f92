//! Signing and verification errors.

/// A precondition of `sign` that the caller violated.
///
/// Checked in declaration order; the first violation is reported. The
/// expiration check only fails for a `Protocol` with an absurd lifetime.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignError {
    #[error("The username passed to sign() is invalid.")]
    InvalidSubject,

    #[error("The Duo integration key passed to sign() is invalid.")]
    InvalidIntegrationKey,

    #[error("The Duo secret key passed to sign() is invalid.")]
    InvalidServerKey,

    #[error("The application secret key passed to sign() must be at least {min_len} characters.")]
    InvalidApplicationKey { min_len: usize },

    #[error("The expiration computed by sign() is out of range.")]
    ExpirationOutOfRange,
}

/// Rejection of a signed response.
///
/// Structural, signature, prefix, identifier, expiry and cross-layer
/// failures all collapse into `Invalid`, so a caller cannot tell which
/// check tripped.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error("The response could not be parsed.")]
    Invalid,

    #[error("The response payload is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("The response expiration is not a number: {0}")]
    NumberFormat(#[from] std::num::ParseIntError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_error_messages() {
        assert_eq!(
            SignError::InvalidSubject.to_string(),
            "The username passed to sign() is invalid."
        );
        assert_eq!(
            SignError::InvalidApplicationKey { min_len: 40 }.to_string(),
            "The application secret key passed to sign() must be at least 40 characters."
        );
    }

    #[test]
    fn test_invalid_hides_reason() {
        assert_eq!(
            VerifyError::Invalid.to_string(),
            "The response could not be parsed."
        );
    }

    #[test]
    fn test_from_parse_int_error() {
        let err = "abc".parse::<i64>().unwrap_err();
        assert!(matches!(VerifyError::from(err), VerifyError::NumberFormat(_)));
    }
}
