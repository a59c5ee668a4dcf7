//! Austin Appleby's MurmurHash2 (32-bit), keyed by its seed

use crate::engine::{NonBlockHash, WholeInputCore};
use crate::hash::{KeyLength, KeyedHash};
use crate::{HashError, HashFunction, Result};
use hashkit_common::{on_error, LoggingTransformer};

const M: u32 = 0x5bd1_e995;
const R: u32 = 24;

/// Seed used while no key is set
pub const DEFAULT_SEED: u32 = 0xc58f_1a7b;

/// Key length: the seed as 4 little-endian bytes
const KEY_LEN: usize = 4;

/// MurmurHash2 mixing function
#[derive(Clone, Default)]
pub struct Murmur2Core {
    seed: Option<u32>,
}

impl Murmur2Core {
    /// MurmurHash2 with the default seed
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// MurmurHash2 with an explicit seed
    #[must_use]
    pub fn with_seed(seed: u32) -> Self {
        Self { seed: Some(seed) }
    }

    /// Seed in effect
    #[must_use]
    pub fn seed(&self) -> u32 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }

    fn hash(&self, data: &[u8]) -> u32 {
        let mut h = self.seed() ^ data.len() as u32;

        let mut chunks = data.chunks_exact(4);
        for chunk in &mut chunks {
            let mut k = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
            k = k.wrapping_mul(M);
            k ^= k >> R;
            k = k.wrapping_mul(M);
            h = h.wrapping_mul(M);
            h ^= k;
        }

        let rem = chunks.remainder();
        if rem.len() >= 3 {
            h ^= u32::from(rem[2]) << 16;
        }
        if rem.len() >= 2 {
            h ^= u32::from(rem[1]) << 8;
        }
        if !rem.is_empty() {
            h ^= u32::from(rem[0]);
            h = h.wrapping_mul(M);
        }

        h ^= h >> 13;
        h = h.wrapping_mul(M);
        h ^ (h >> 15)
    }
}

impl WholeInputCore for Murmur2Core {
    fn name(&self) -> String {
        "MURMUR2".to_string()
    }

    fn block_size(&self) -> usize {
        4
    }

    fn hash_size(&self) -> usize {
        4
    }

    fn compute(&self, data: &[u8]) -> Vec<u8> {
        self.hash(data).to_be_bytes().to_vec()
    }
}

impl KeyedHash for NonBlockHash<Murmur2Core> {
    fn key(&self) -> Option<Vec<u8>> {
        self.core().seed.map(|seed| seed.to_le_bytes().to_vec())
    }

    fn set_key(&mut self, key: Option<&[u8]>) -> Result<()> {
        let seed = match key {
            None | Some([]) => None,
            Some(&[b0, b1, b2, b3]) => Some(u32::from_le_bytes([b0, b1, b2, b3])),
            Some(other) => {
                return Err(on_error(
                    "set_key",
                    HashError::InvalidKeyLength {
                        algorithm: "MURMUR2",
                        expected: KeyLength::Exact(KEY_LEN).to_string(),
                        actual: other.len(),
                    },
                ));
            }
        };
        self.core_mut().seed = seed;
        LoggingTransformer::log_key_change(&self.name(), key.filter(|k| !k.is_empty()));
        self.initialize();
        Ok(())
    }

    fn key_length(&self) -> KeyLength {
        KeyLength::Exact(KEY_LEN)
    }

    fn clone_keyed(&self) -> Box<dyn KeyedHash> {
        Box::new(self.clone())
    }
}
