//! Algorithm cores and ready-to-use constructors
//!
//! Each constructor returns a freshly initialized engine. Use
//! [`HashFactory`](crate::HashFactory) to pick an algorithm by name.

pub mod blake2b;
pub mod jenkins3;
pub mod keccak;
pub mod murmur2;
mod padding;
pub mod sha2;
pub mod super_fast;

use crate::engine::{BlockHash, NonBlockHash, Xof};
use crate::Result;

pub use blake2b::Blake2bCore;
pub use jenkins3::Jenkins3Core;
pub use keccak::KeccakCore;
pub use murmur2::Murmur2Core;
pub use sha2::{Sha256Core, Sha512Core};
pub use super_fast::SuperFastCore;

/// SHA-224 / SHA-256 engine
pub type Sha256 = BlockHash<Sha256Core>;
/// SHA-384 / SHA-512 / SHA-512/t engine
pub type Sha512 = BlockHash<Sha512Core>;
/// SHA-3 or Keccak engine
pub type Keccak = BlockHash<KeccakCore>;
/// SHAKE engine
pub type Shake = Xof<KeccakCore>;
/// BLAKE2b engine
pub type Blake2b = BlockHash<Blake2bCore>;
/// Jenkins lookup3 engine
pub type Jenkins3 = NonBlockHash<Jenkins3Core>;
/// SuperFastHash engine
pub type SuperFast = NonBlockHash<SuperFastCore>;
/// MurmurHash2 engine
pub type Murmur2 = NonBlockHash<Murmur2Core>;

/// SHA2-224
#[must_use]
pub fn sha2_224() -> Sha256 {
    BlockHash::new(Sha256Core::sha224())
}

/// SHA2-256
#[must_use]
pub fn sha2_256() -> Sha256 {
    BlockHash::new(Sha256Core::sha256())
}

/// SHA2-384
#[must_use]
pub fn sha2_384() -> Sha512 {
    BlockHash::new(Sha512Core::sha384())
}

/// SHA2-512
#[must_use]
pub fn sha2_512() -> Sha512 {
    BlockHash::new(Sha512Core::sha512())
}

/// SHA2-512/224
#[must_use]
pub fn sha2_512_224() -> Sha512 {
    BlockHash::new(Sha512Core::sha512_224())
}

/// SHA2-512/256
#[must_use]
pub fn sha2_512_256() -> Sha512 {
    BlockHash::new(Sha512Core::sha512_256())
}

/// SHA3-224
#[must_use]
pub fn sha3_224() -> Keccak {
    BlockHash::new(KeccakCore::sha3(224))
}

/// SHA3-256
#[must_use]
pub fn sha3_256() -> Keccak {
    BlockHash::new(KeccakCore::sha3(256))
}

/// SHA3-384
#[must_use]
pub fn sha3_384() -> Keccak {
    BlockHash::new(KeccakCore::sha3(384))
}

/// SHA3-512
#[must_use]
pub fn sha3_512() -> Keccak {
    BlockHash::new(KeccakCore::sha3(512))
}

/// Keccak-224
#[must_use]
pub fn keccak_224() -> Keccak {
    BlockHash::new(KeccakCore::keccak(224))
}

/// Keccak-256, as used by Ethereum
#[must_use]
pub fn keccak_256() -> Keccak {
    BlockHash::new(KeccakCore::keccak(256))
}

/// Keccak-288
#[must_use]
pub fn keccak_288() -> Keccak {
    BlockHash::new(KeccakCore::keccak(288))
}

/// Keccak-384
#[must_use]
pub fn keccak_384() -> Keccak {
    BlockHash::new(KeccakCore::keccak(384))
}

/// Keccak-512
#[must_use]
pub fn keccak_512() -> Keccak {
    BlockHash::new(KeccakCore::keccak(512))
}

/// SHAKE128 producing `xof_size_bits` bits per `transform_final` (default 256)
///
/// # Errors
///
/// Returns `HashError::InvalidArgument` unless the size is a positive multiple of 8.
pub fn shake128(xof_size_bits: Option<u64>) -> Result<Shake> {
    Xof::new(KeccakCore::shake(128), xof_size_bits.unwrap_or(256))
}

/// SHAKE256 producing `xof_size_bits` bits per `transform_final` (default 512)
///
/// # Errors
///
/// Returns `HashError::InvalidArgument` unless the size is a positive multiple of 8.
pub fn shake256(xof_size_bits: Option<u64>) -> Result<Shake> {
    Xof::new(KeccakCore::shake(256), xof_size_bits.unwrap_or(512))
}

/// BLAKE2b with an `out_len`-byte digest and an optional key of up to 64 bytes
///
/// # Errors
///
/// Returns `HashError::InvalidArgument` for a digest length outside 1..=64
/// and `HashError::InvalidKeyLength` for an oversized key.
pub fn blake2b(out_len: usize, key: Option<&[u8]>) -> Result<Blake2b> {
    let core = match key {
        Some(key) => Blake2bCore::with_key(out_len, key)?,
        None => Blake2bCore::new(out_len)?,
    };
    Ok(BlockHash::new(core))
}

/// Jenkins lookup3 `hashlittle`
#[must_use]
pub fn jenkins3() -> Jenkins3 {
    NonBlockHash::new(Jenkins3Core::new())
}

/// SuperFastHash
#[must_use]
pub fn super_fast() -> SuperFast {
    NonBlockHash::new(SuperFastCore)
}

/// MurmurHash2 with the default seed
#[must_use]
pub fn murmur2() -> Murmur2 {
    NonBlockHash::new(Murmur2Core::new())
}
