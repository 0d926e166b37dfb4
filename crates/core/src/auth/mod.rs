mod credential;

pub use credential::{decode_credential, encode_credential};
