//! Outbound challenge signing.

use super::codec;
use super::error::SignError;
use super::protocol::{unix_now, Credentials, Protocol};

/// Sign a two-factor request for `username`, using the system clock.
///
/// The result is handed to the Duo widget as `data-sig-request`.
pub fn sign(
    protocol: &Protocol,
    credentials: &Credentials,
    username: &str,
) -> Result<String, SignError> {
    sign_at(protocol, credentials, username, unix_now())
}

/// Sign a two-factor request as of `now` (Unix seconds).
///
/// Produces `TX|<b64>|<mac>:APP|<b64>|<mac>` where the transport segment is
/// keyed with `skey` and the application segment with `akey`.
pub fn sign_at(
    protocol: &Protocol,
    credentials: &Credentials,
    username: &str,
    now: i64,
) -> Result<String, SignError> {
    validate(protocol, credentials, username)?;

    let duo_expires = now
        .checked_add(protocol.duo_expire_secs)
        .ok_or(SignError::ExpirationOutOfRange)?;
    let app_expires = now
        .checked_add(protocol.app_expire_secs)
        .ok_or(SignError::ExpirationOutOfRange)?;

    let values = format!("{}{}{}", username, protocol.value_separator, credentials.ikey);

    let duo_signature = sign_values(
        protocol,
        &credentials.skey,
        &values,
        &protocol.duo_prefix,
        duo_expires,
    );
    let app_signature = sign_values(
        protocol,
        &credentials.akey,
        &values,
        &protocol.app_prefix,
        app_expires,
    );

    Ok(format!(
        "{}{}{}",
        duo_signature, protocol.signature_separator, app_signature
    ))
}

/// Check the signing preconditions, in order, before touching any key.
pub fn validate(
    protocol: &Protocol,
    credentials: &Credentials,
    username: &str,
) -> Result<(), SignError> {
    if username.is_empty() || username.contains(protocol.value_separator) {
        return Err(SignError::InvalidSubject);
    }
    validate_credentials(protocol, credentials)
}

/// Check the key lengths of `credentials`.
pub fn validate_credentials(
    protocol: &Protocol,
    credentials: &Credentials,
) -> Result<(), SignError> {
    if credentials.ikey.len() != protocol.ikey_len {
        return Err(SignError::InvalidIntegrationKey);
    }
    if credentials.skey.len() != protocol.skey_len {
        return Err(SignError::InvalidServerKey);
    }
    if credentials.akey.len() < protocol.akey_min_len {
        return Err(SignError::InvalidApplicationKey {
            min_len: protocol.akey_min_len,
        });
    }
    Ok(())
}

/// Build one `prefix|b64(values|expires)|mac` segment.
fn sign_values(protocol: &Protocol, key: &str, values: &str, prefix: &str, expires: i64) -> String {
    let sep = protocol.value_separator;
    let payload = codec::encode(&format!("{}{}{}", values, sep, expires));
    let cookie = format!("{}{}{}", prefix, sep, payload);
    let signature = codec::mac(key, &cookie);
    format!("{}{}{}", cookie, sep, signature)
}
