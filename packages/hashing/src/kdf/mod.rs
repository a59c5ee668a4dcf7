//! Key derivation functions

mod pbkdf2;

pub use pbkdf2::Pbkdf2Hmac;
