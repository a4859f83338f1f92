//! Duo Web two-factor token signing and verification.
//!
//! A request is two HMAC-signed segments joined by `:`, each
//! `prefix|base64(username|ikey|expires)|hexmac`. The transport segment is
//! keyed with the Duo secret key and the application segment with the
//! application secret key. Everything here is pure and synchronous.

pub mod codec;
pub mod error;
pub mod protocol;
pub mod sign;
pub mod verify;

pub use error::{SignError, VerifyError};
pub use protocol::{Credentials, Protocol};
pub use sign::{sign, sign_at};
pub use verify::{verify, verify_at};
