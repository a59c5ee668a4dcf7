//! Streaming engines
//!
//! - [`block`]: block-incremental strategy shared by the SHA-2, Keccak and
//!   BLAKE2b families
//! - [`non_block`]: whole-input strategy for mixing functions that need the
//!   total length up front
//! - [`xof`]: absorb/squeeze state machine layered on the block engine

pub mod block;
pub mod non_block;
pub mod xof;

pub use block::{BlockCore, BlockHash};
pub use non_block::{NonBlockHash, WholeInputCore};
pub use xof::{SqueezeCore, Xof, XofPhase};
