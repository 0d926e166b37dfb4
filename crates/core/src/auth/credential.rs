//! Opaque identity credentials.
//!
//! A credential is the standard base64 encoding of the user's email. It is a
//! reversible encoding, not a signature: anything that decodes to an
//! email-shaped string is accepted.

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::user::Identity;

const BEARER_PREFIX: &str = "Bearer ";

/// Encodes an identity into the credential handed out by `login`.
///
/// # Examples
///
/// ```
/// use eventbook_core::auth::encode_credential;
/// use eventbook_core::user::Identity;
///
/// let identity = Identity::parse("a@b.com").unwrap();
/// assert_eq!(encode_credential(&identity), "YUBiLmNvbQ==");
/// ```
pub fn encode_credential(identity: &Identity) -> String {
    STANDARD.encode(identity.as_str())
}

/// Decodes a raw credential, optionally prefixed with the `Bearer` scheme.
///
/// Returns `None` for anything that does not decode to an email-shaped
/// identity; an absent identity is a normal request state.
pub fn decode_credential(raw: &str) -> Option<Identity> {
    let token = raw.trim();
    let token = token.strip_prefix(BEARER_PREFIX).unwrap_or(token).trim();
    if token.is_empty() {
        return None;
    }

    let bytes = STANDARD.decode(token).ok()?;
    let decoded = String::from_utf8(bytes).ok()?;
    Identity::parse(decoded).ok()
}
