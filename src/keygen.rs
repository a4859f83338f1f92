//! Application secret key generation.

use crate::auth::protocol::AKEY_MIN_LEN;
use rand::Rng;

/// Generate a cryptographically random application secret key.
///
/// Returns a hex string of `AKEY_MIN_LEN` characters.
pub fn generate_application_key() -> String {
    let mut rng = rand::rng();
    let mut bytes = [0u8; AKEY_MIN_LEN / 2];
    rng.fill(&mut bytes);
    hex::encode(bytes)
}
