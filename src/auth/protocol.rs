//! Credentials and the fixed protocol constants.

/// Separator between the two signed segments of a token.
pub const SIGNATURE_SEPARATOR: char = ':';
/// Separator between fields inside a segment and inside a decoded payload.
pub const VALUE_SEPARATOR: char = '|';

pub const DUO_PREFIX: &str = "TX";
pub const APP_PREFIX: &str = "APP";
pub const AUTH_PREFIX: &str = "AUTH";

pub const DUO_EXPIRE_SECS: i64 = 300;
pub const APP_EXPIRE_SECS: i64 = 3600;

pub const IKEY_LEN: usize = 20;
pub const SKEY_LEN: usize = 40;
pub const AKEY_MIN_LEN: usize = 40;

/// Protocol settings shared by signing and verification.
///
/// `Protocol::default()` carries the constants the Duo service expects.
/// Separators must differ from each other and must not appear in
/// identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Protocol {
    pub signature_separator: char,
    pub value_separator: char,

    /// Prefix of the transport segment in an outbound request.
    pub duo_prefix: String,
    /// Prefix of the application segment, in both directions.
    pub app_prefix: String,
    /// Prefix the service puts on the transport segment of its response.
    pub auth_prefix: String,

    pub duo_expire_secs: i64,
    pub app_expire_secs: i64,

    pub ikey_len: usize,
    pub skey_len: usize,
    pub akey_min_len: usize,
}

impl Default for Protocol {
    fn default() -> Self {
        Self {
            signature_separator: SIGNATURE_SEPARATOR,
            value_separator: VALUE_SEPARATOR,
            duo_prefix: DUO_PREFIX.to_string(),
            app_prefix: APP_PREFIX.to_string(),
            auth_prefix: AUTH_PREFIX.to_string(),
            duo_expire_secs: DUO_EXPIRE_SECS,
            app_expire_secs: APP_EXPIRE_SECS,
            ikey_len: IKEY_LEN,
            skey_len: SKEY_LEN,
            akey_min_len: AKEY_MIN_LEN,
        }
    }
}

/// The three secrets of one Duo Web integration.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Integration key, identifies the relying party.
    pub ikey: String,
    /// Secret key shared with the Duo service.
    pub skey: String,
    /// Application secret key, never leaves this server.
    pub akey: String,
}

impl Credentials {
    pub fn new(ikey: impl Into<String>, skey: impl Into<String>, akey: impl Into<String>) -> Self {
        Self {
            ikey: ikey.into(),
            skey: skey.into(),
            akey: akey.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("ikey", &self.ikey)
            .field("skey", &"[REDACTED]")
            .field("akey", &"[REDACTED]")
            .finish()
    }
}

/// Current Unix time in whole seconds.
pub fn unix_now() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
