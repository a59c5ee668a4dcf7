//! Streaming hash engines with a uniform contract
//!
//! Every algorithm implements [`HashFunction`]: absorb input in any number of
//! pieces, finalize once, get a [`HashResult`]. The digest never depends on how
//! the input was split. Three engines carry the algorithms:
//!
//! - [`BlockHash`] for block-compression algorithms (SHA-2, SHA-3, Keccak, BLAKE2b)
//! - [`NonBlockHash`] for mixing functions that need the whole input
//!   (Jenkins lookup3, SuperFastHash, MurmurHash2)
//! - [`Xof`] for extendable-output functions (SHAKE)
//!
//! ```
//! use hashkit_hashing::{HashFactory, HashFunction};
//!
//! let mut sha = HashFactory::create("SHA2-256")?;
//! sha.transform_bytes(b"ab")?;
//! sha.transform_bytes(b"c")?;
//! assert_eq!(
//!     sha.transform_final()?.to_hex(),
//!     "BA7816BF8F01CFEA414140DE5DAE2223B00361A396177A9CB410FF61F20015AD"
//! );
//! # Ok::<(), hashkit_hashing::HashError>(())
//! ```

#![forbid(unsafe_code)]

pub mod algorithms;
pub mod buffer;
pub mod config;
pub mod convenience;
pub mod engine;
pub mod error;
pub mod factory;
pub mod hash;
pub mod hash_result;
pub mod kdf;
pub mod mac;

pub use config::HashConfig;
pub use convenience::{compute_async_reader, compute_file_async, HashSource};
pub use engine::{BlockHash, NonBlockHash, Xof, XofPhase};
pub use error::{HashError, Result};
pub use factory::{HashAlgorithm, HashFactory};
pub use hash::{ExtendableOutput, HashFunction, KeyLength, KeyedHash};
pub use hash_result::HashResult;
pub use kdf::Pbkdf2Hmac;
pub use mac::Hmac;

pub use hashkit_common::LoggingTransformer;
