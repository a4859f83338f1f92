//! Signed response verification.
//!
//! Every structural or cryptographic rejection is reported as
//! [`VerifyError::Invalid`]. Only the two lower-level parse failures
//! (base64 and integer) surface with their own variant.

use super::codec;
use super::error::VerifyError;
use super::protocol::{unix_now, Credentials, Protocol};

/// Verify a `sig_response` returned by the Duo widget, using the system clock.
///
/// Returns the username both segments agree on.
pub fn verify(
    protocol: &Protocol,
    credentials: &Credentials,
    response: &str,
) -> Result<String, VerifyError> {
    verify_at(protocol, credentials, response, unix_now())
}

/// Verify a `sig_response` as of `now` (Unix seconds).
pub fn verify_at(
    protocol: &Protocol,
    credentials: &Credentials,
    response: &str,
    now: i64,
) -> Result<String, VerifyError> {
    if response.matches(protocol.signature_separator).count() != 1 {
        return Err(VerifyError::Invalid);
    }
    let (auth_signature, app_signature) = response
        .split_once(protocol.signature_separator)
        .ok_or(VerifyError::Invalid)?;

    let auth_user = parse_values(
        protocol,
        &credentials.skey,
        auth_signature,
        &protocol.auth_prefix,
        &credentials.ikey,
        now,
    )?;
    let app_user = parse_values(
        protocol,
        &credentials.akey,
        app_signature,
        &protocol.app_prefix,
        &credentials.ikey,
        now,
    )?;

    if auth_user != app_user {
        return Err(VerifyError::Invalid);
    }

    Ok(auth_user)
}

/// Validate one `prefix|b64|mac` segment and return its username.
///
/// The MAC is checked before anything in the segment is trusted.
fn parse_values(
    protocol: &Protocol,
    key: &str,
    segment: &str,
    expected_prefix: &str,
    ikey: &str,
    now: i64,
) -> Result<String, VerifyError> {
    let sep = protocol.value_separator;

    let [prefix, b64_value, signature] = split3(segment, sep).ok_or(VerifyError::Invalid)?;

    let message = format!("{}{}{}", prefix, sep, b64_value);
    if !codec::mac_matches(key, &message, signature) {
        return Err(VerifyError::Invalid);
    }

    if prefix != expected_prefix {
        return Err(VerifyError::Invalid);
    }

    let decoded = codec::decode(b64_value)?;
    let decoded = String::from_utf8(decoded).map_err(|_| VerifyError::Invalid)?;

    let [username, token_ikey, expiration] =
        split3(&decoded, sep).ok_or(VerifyError::Invalid)?;

    if token_ikey != ikey {
        return Err(VerifyError::Invalid);
    }

    let expires: i64 = expiration.parse()?;
    if now >= expires {
        return Err(VerifyError::Invalid);
    }

    Ok(username.to_string())
}

/// Split `value` into exactly three fields, or `None` if the separator count
/// is anything other than two.
fn split3(value: &str, sep: char) -> Option<[&str; 3]> {
    if value.matches(sep).count() != 2 {
        return None;
    }
    let mut parts = value.splitn(3, sep);
    Some([parts.next()?, parts.next()?, parts.next()?])
}
