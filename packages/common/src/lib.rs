//! Common infrastructure shared by the hashkit crates
//!
//! This crate provides:
//! - The error taxonomy every hashkit error maps onto ([`ErrorKind`])
//! - `env_logger` based logging setup with key-safe helpers ([`LoggingTransformer`])
//! - Error reporting hooks used at contract-violation sites ([`on_error`])

pub mod error;
pub mod handlers;
pub mod logging;

pub use error::{Classified, ErrorKind};
pub use handlers::on_error;
pub use logging::LoggingTransformer;
