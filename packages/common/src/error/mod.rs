//! Error taxonomy shared across hashkit
//!
//! Every hashkit error is a programmer/contract error rather than a recoverable
//! runtime fault. Crates define their own `thiserror` enums and classify each
//! variant with [`ErrorKind`] through the [`Classified`] trait.

pub mod types;

pub use types::{Classified, ErrorKind};
