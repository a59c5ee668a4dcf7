//! Message authentication codes

mod hmac;

pub use hmac::Hmac;
