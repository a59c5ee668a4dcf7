//! Keccak sponge: SHA-3, legacy Keccak and SHAKE
//!
//! All three share the permutation and differ only in rate, output length and
//! the domain-separation byte XORed in right after the message.

use crate::buffer::HashBuffer;
use crate::engine::{BlockCore, SqueezeCore};

/// SHA-3 domain separation (`01` suffix plus first padding bit)
const SHA3_PAD: u8 = 0x06;
/// Original Keccak submission padding
const KECCAK_PAD: u8 = 0x01;
/// SHAKE domain separation (`1111` suffix plus first padding bit)
const SHAKE_PAD: u8 = 0x1F;

/// State size of Keccak-f[1600] in bytes
const STATE_BYTES: usize = 200;

/// Sponge over Keccak-f[1600]
#[derive(Clone)]
pub struct KeccakCore {
    state: [u64; 25],
    rate: usize,
    pad: u8,
    hash_size: usize,
    name: String,
    squeezed: bool,
}

impl KeccakCore {
    fn new(capacity_bits: usize, pad: u8, hash_size: usize, name: String) -> Self {
        Self {
            state: [0; 25],
            rate: STATE_BYTES - capacity_bits / 8,
            pad,
            hash_size,
            name,
            squeezed: false,
        }
    }

    /// SHA3-224, SHA3-256, SHA3-384 or SHA3-512
    ///
    /// `bits` must be one of those digest sizes; the factory only passes valid ones.
    #[must_use]
    pub fn sha3(bits: usize) -> Self {
        Self::new(2 * bits, SHA3_PAD, bits / 8, format!("SHA3-{bits}"))
    }

    /// Keccak-224/256/288/384/512 with the pre-standard padding
    #[must_use]
    pub fn keccak(bits: usize) -> Self {
        Self::new(2 * bits, KECCAK_PAD, bits / 8, format!("KECCAK-{bits}"))
    }

    /// SHAKE128 or SHAKE256; `hash_size` is unused because the XOF wrapper
    /// decides the output length
    #[must_use]
    pub fn shake(security_bits: usize) -> Self {
        Self::new(
            2 * security_bits,
            SHAKE_PAD,
            2 * security_bits / 8,
            format!("SHAKE{security_bits}"),
        )
    }

    /// Bytes absorbed or squeezed per permutation
    #[must_use]
    pub fn rate(&self) -> usize {
        self.rate
    }

    fn permute(&mut self) {
        keccak::f1600(&mut self.state);
    }

    fn write_lanes(&self, out: &mut [u8]) {
        for (chunk, lane) in out.chunks_mut(8).zip(self.state.iter()) {
            let bytes = lane.to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

impl BlockCore for KeccakCore {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn block_size(&self) -> usize {
        self.rate
    }

    fn hash_size(&self) -> usize {
        self.hash_size
    }

    fn reset(&mut self) {
        self.state = [0; 25];
        self.squeezed = false;
    }

    fn compress(&mut self, block: &[u8]) {
        for (lane, chunk) in self.state.iter_mut().zip(block.chunks_exact(8)) {
            let mut word = [0u8; 8];
            word.copy_from_slice(chunk);
            *lane ^= u64::from_le_bytes(word);
        }
        self.permute();
    }

    fn finish(&mut self, buffer: &mut HashBuffer, _processed_bytes: u64) {
        let pos = buffer.pos();
        let mut last = [0u8; STATE_BYTES];
        last[..self.rate].copy_from_slice(buffer.take_zero_padded());
        last[pos] ^= self.pad;
        last[self.rate - 1] ^= 0x80;
        self.compress(&last[..self.rate]);
        self.squeezed = false;
    }

    fn digest(&self) -> Vec<u8> {
        let mut out = vec![0u8; self.hash_size];
        self.write_lanes(&mut out);
        out
    }
}

impl SqueezeCore for KeccakCore {
    fn squeeze_block(&mut self, out: &mut [u8]) {
        if self.squeezed {
            self.permute();
        }
        self.write_lanes(out);
        self.squeezed = true;
    }
}
