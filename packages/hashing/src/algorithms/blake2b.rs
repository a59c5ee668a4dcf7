//! BLAKE2b (RFC 7693), keyed and unkeyed, 1 to 64 byte digests

use crate::buffer::HashBuffer;
use crate::engine::{BlockCore, BlockHash};
use crate::hash::{KeyLength, KeyedHash};
use crate::{HashError, HashFunction, Result};
use hashkit_common::{on_error, LoggingTransformer};
use zeroize::{Zeroize, Zeroizing};

const BLOCK_LEN: usize = 128;

/// Largest digest and key length
pub const MAX_OUTPUT: usize = 64;
/// Largest key length
pub const MAX_KEY: usize = 64;

const IV: [u64; 8] = [
    0x6a09_e667_f3bc_c908,
    0xbb67_ae85_84ca_a73b,
    0x3c6e_f372_fe94_f82b,
    0xa54f_f53a_5f1d_36f1,
    0x510e_527f_ade6_82d1,
    0x9b05_688c_2b3e_6c1f,
    0x1f83_d9ab_fb41_bd6b,
    0x5be0_cd19_137e_2179,
];

const SIGMA: [[usize; 16]; 12] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
    [14, 10, 4, 8, 9, 15, 13, 6, 1, 12, 0, 2, 11, 7, 5, 3],
    [11, 8, 12, 0, 5, 2, 15, 13, 10, 14, 3, 6, 7, 1, 9, 4],
    [7, 9, 3, 1, 13, 12, 11, 14, 2, 6, 5, 10, 4, 0, 15, 8],
    [9, 0, 5, 7, 2, 4, 10, 15, 14, 1, 11, 12, 6, 8, 3, 13],
    [2, 12, 6, 10, 0, 11, 8, 3, 4, 13, 7, 5, 15, 14, 1, 9],
    [12, 5, 1, 15, 14, 13, 4, 10, 0, 7, 6, 3, 9, 2, 8, 11],
    [13, 11, 7, 14, 12, 1, 3, 9, 5, 0, 15, 4, 8, 6, 2, 10],
    [6, 15, 14, 9, 11, 3, 0, 8, 12, 2, 13, 7, 1, 4, 10, 5],
    [10, 2, 8, 4, 7, 6, 1, 5, 15, 11, 9, 14, 3, 12, 13, 0],
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
    [14, 10, 4, 8, 9, 15, 13, 6, 1, 12, 0, 2, 11, 7, 5, 3],
];

#[inline(always)]
#[allow(clippy::many_single_char_names)]
fn g(v: &mut [u64; 16], a: usize, b: usize, c: usize, d: usize, x: u64, y: u64) {
    v[a] = v[a].wrapping_add(v[b]).wrapping_add(x);
    v[d] = (v[d] ^ v[a]).rotate_right(32);
    v[c] = v[c].wrapping_add(v[d]);
    v[b] = (v[b] ^ v[c]).rotate_right(24);
    v[a] = v[a].wrapping_add(v[b]).wrapping_add(y);
    v[d] = (v[d] ^ v[a]).rotate_right(16);
    v[c] = v[c].wrapping_add(v[d]);
    v[b] = (v[b] ^ v[c]).rotate_right(63);
}

fn compress(h: &mut [u64; 8], block: &[u8], t: u128, is_last: bool) {
    let mut m = [0u64; 16];
    for (word, chunk) in m.iter_mut().zip(block.chunks_exact(8)) {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(chunk);
        *word = u64::from_le_bytes(bytes);
    }

    let mut v = [0u64; 16];
    v[..8].copy_from_slice(h);
    v[8..].copy_from_slice(&IV);
    v[12] ^= t as u64;
    v[13] ^= (t >> 64) as u64;
    if is_last {
        v[14] = !v[14];
    }

    for s in &SIGMA {
        g(&mut v, 0, 4, 8, 12, m[s[0]], m[s[1]]);
        g(&mut v, 1, 5, 9, 13, m[s[2]], m[s[3]]);
        g(&mut v, 2, 6, 10, 14, m[s[4]], m[s[5]]);
        g(&mut v, 3, 7, 11, 15, m[s[6]], m[s[7]]);

        g(&mut v, 0, 5, 10, 15, m[s[8]], m[s[9]]);
        g(&mut v, 1, 6, 11, 12, m[s[10]], m[s[11]]);
        g(&mut v, 2, 7, 8, 13, m[s[12]], m[s[13]]);
        g(&mut v, 3, 4, 9, 14, m[s[14]], m[s[15]]);
    }

    for (i, word) in h.iter_mut().enumerate() {
        *word ^= v[i] ^ v[i + 8];
    }
    m.zeroize();
    v.zeroize();
}

/// BLAKE2b chaining state plus its parameter block inputs
///
/// Keyed hashing prepends the key padded to one full block. The engine holds
/// back the last full block so the final compression can carry the
/// finalization flag, even when the message is empty.
#[derive(Clone)]
pub struct Blake2bCore {
    h: [u64; 8],
    t: u128,
    out_len: usize,
    key: Zeroizing<Vec<u8>>,
}

impl Blake2bCore {
    /// Unkeyed BLAKE2b with an `out_len`-byte digest
    ///
    /// # Errors
    ///
    /// Returns `HashError::InvalidArgument` unless `1 <= out_len <= 64`.
    pub fn new(out_len: usize) -> Result<Self> {
        if out_len == 0 || out_len > MAX_OUTPUT {
            return Err(HashError::invalid_argument(format!(
                "BLAKE2b digest length must be 1..={MAX_OUTPUT} bytes, got {out_len}"
            )));
        }
        let mut core = Self {
            h: IV,
            t: 0,
            out_len,
            key: Zeroizing::new(Vec::new()),
        };
        core.reset();
        Ok(core)
    }

    /// Keyed BLAKE2b
    ///
    /// # Errors
    ///
    /// Returns `HashError::InvalidArgument` for a bad digest length and
    /// `HashError::InvalidKeyLength` for a key over 64 bytes.
    pub fn with_key(out_len: usize, key: &[u8]) -> Result<Self> {
        let mut core = Self::new(out_len)?;
        core.set_key(key)?;
        Ok(core)
    }

    fn set_key(&mut self, key: &[u8]) -> Result<()> {
        if !KeyLength::UpTo(MAX_KEY).accepts(key.len()) {
            return Err(HashError::InvalidKeyLength {
                algorithm: "BLAKE2B",
                expected: KeyLength::UpTo(MAX_KEY).to_string(),
                actual: key.len(),
            });
        }
        self.key = Zeroizing::new(key.to_vec());
        Ok(())
    }

    /// Current key bytes; empty when unkeyed
    #[must_use]
    pub fn key(&self) -> &[u8] {
        &self.key
    }
}

impl Drop for Blake2bCore {
    fn drop(&mut self) {
        self.h.zeroize();
    }
}

impl BlockCore for Blake2bCore {
    const DEFERS_LAST_BLOCK: bool = true;

    fn name(&self) -> String {
        format!("BLAKE2B-{}", self.out_len * 8)
    }

    fn block_size(&self) -> usize {
        BLOCK_LEN
    }

    fn hash_size(&self) -> usize {
        self.out_len
    }

    fn reset(&mut self) {
        self.h = IV;
        // Parameter block: digest length, key length, fanout 1, depth 1
        self.h[0] ^= 0x0101_0000 ^ ((self.key.len() as u64) << 8) ^ self.out_len as u64;
        self.t = 0;
    }

    fn prologue(&self) -> Option<Zeroizing<Vec<u8>>> {
        if self.key.is_empty() {
            return None;
        }
        let mut block = Zeroizing::new(vec![0u8; BLOCK_LEN]);
        block[..self.key.len()].copy_from_slice(&self.key);
        Some(block)
    }

    fn compress(&mut self, block: &[u8]) {
        self.t = self.t.wrapping_add(BLOCK_LEN as u128);
        compress(&mut self.h, block, self.t, false);
    }

    fn finish(&mut self, buffer: &mut HashBuffer, _processed_bytes: u64) {
        self.t = self.t.wrapping_add(buffer.pos() as u128);
        compress(&mut self.h, buffer.take_zero_padded(), self.t, true);
    }

    fn digest(&self) -> Vec<u8> {
        self.h
            .iter()
            .flat_map(|word| word.to_le_bytes())
            .take(self.out_len)
            .collect()
    }
}

impl KeyedHash for BlockHash<Blake2bCore> {
    fn key(&self) -> Option<Vec<u8>> {
        let key = self.core().key();
        (!key.is_empty()).then(|| key.to_vec())
    }

    fn set_key(&mut self, key: Option<&[u8]>) -> Result<()> {
        let key = key.unwrap_or_default();
        self.core_mut()
            .set_key(key)
            .map_err(|err| on_error("set_key", err))?;
        LoggingTransformer::log_key_change(&self.name(), (!key.is_empty()).then_some(key));
        self.reset();
        Ok(())
    }

    fn key_length(&self) -> KeyLength {
        KeyLength::UpTo(MAX_KEY)
    }

    fn clone_keyed(&self) -> Box<dyn KeyedHash> {
        Box::new(self.clone())
    }
}
