//! SHA-2 family cores
//!
//! The compression functions come from the `sha2` crate; the engine supplies
//! buffering and these cores own the initial values, padding and truncation.

use super::padding::md_pad;
use crate::buffer::HashBuffer;
use crate::engine::BlockCore;
use sha2::digest::generic_array::GenericArray;

const SHA224_IV: [u32; 8] = [
    0xc105_9ed8,
    0x367c_d507,
    0x3070_dd17,
    0xf70e_5939,
    0xffc0_0b31,
    0x6858_1511,
    0x64f9_8fa7,
    0xbefa_4fa4,
];

const SHA256_IV: [u32; 8] = [
    0x6a09_e667,
    0xbb67_ae85,
    0x3c6e_f372,
    0xa54f_f53a,
    0x510e_527f,
    0x9b05_688c,
    0x1f83_d9ab,
    0x5be0_cd19,
];

const SHA384_IV: [u64; 8] = [
    0xcbbb_9d5d_c105_9ed8,
    0x629a_292a_367c_d507,
    0x9159_015a_3070_dd17,
    0x152f_ecd8_f70e_5939,
    0x6733_2667_ffc0_0b31,
    0x8eb4_4a87_6858_1511,
    0xdb0c_2e0d_64f9_8fa7,
    0x47b5_481d_befa_4fa4,
];

const SHA512_IV: [u64; 8] = [
    0x6a09_e667_f3bc_c908,
    0xbb67_ae85_84ca_a73b,
    0x3c6e_f372_fe94_f82b,
    0xa54f_f53a_5f1d_36f1,
    0x510e_527f_ade6_82d1,
    0x9b05_688c_2b3e_6c1f,
    0x1f83_d9ab_fb41_bd6b,
    0x5be0_cd19_137e_2179,
];

const SHA512_224_IV: [u64; 8] = [
    0x8c3d_37c8_1954_4da2,
    0x73e1_9966_89dc_d4d6,
    0x1dfa_b7ae_32ff_9c82,
    0x679d_d514_582f_9fcf,
    0x0f6d_2b69_7bd4_4da8,
    0x77e3_6f73_04c4_8942,
    0x3f9d_85a8_6a1d_36c8,
    0x1112_e6ad_91d6_92a1,
];

const SHA512_256_IV: [u64; 8] = [
    0x2231_2194_fc2b_f72c,
    0x9f55_5fa3_c84c_64c2,
    0x2393_b86b_6f53_b151,
    0x9638_7719_5940_eabd,
    0x9628_3ee2_a88e_ffe3,
    0xbe5e_1e25_5386_3992,
    0x2b01_99fc_2c85_b8aa,
    0x0eb7_2ddc_81c5_2ca2,
];

fn compress256(state: &mut [u32; 8], block: &[u8]) {
    sha2::compress256(state, std::slice::from_ref(GenericArray::from_slice(block)));
}

fn compress512(state: &mut [u64; 8], block: &[u8]) {
    sha2::compress512(state, std::slice::from_ref(GenericArray::from_slice(block)));
}

/// SHA-224 and SHA-256 (32-bit words, 64-byte blocks)
#[derive(Clone)]
pub struct Sha256Core {
    state: [u32; 8],
    iv: [u32; 8],
    hash_size: usize,
    name: &'static str,
}

impl Sha256Core {
    /// SHA-224
    #[must_use]
    pub fn sha224() -> Self {
        Self {
            state: SHA224_IV,
            iv: SHA224_IV,
            hash_size: 28,
            name: "SHA2-224",
        }
    }

    /// SHA-256
    #[must_use]
    pub fn sha256() -> Self {
        Self {
            state: SHA256_IV,
            iv: SHA256_IV,
            hash_size: 32,
            name: "SHA2-256",
        }
    }
}

impl BlockCore for Sha256Core {
    fn name(&self) -> String {
        self.name.to_string()
    }

    fn block_size(&self) -> usize {
        64
    }

    fn hash_size(&self) -> usize {
        self.hash_size
    }

    fn reset(&mut self) {
        self.state = self.iv;
    }

    fn compress(&mut self, block: &[u8]) {
        compress256(&mut self.state, block);
    }

    fn finish(&mut self, buffer: &mut HashBuffer, processed_bytes: u64) {
        md_pad(buffer, processed_bytes, 8, |block| {
            compress256(&mut self.state, block);
        });
    }

    fn digest(&self) -> Vec<u8> {
        self.state
            .iter()
            .flat_map(|word| word.to_be_bytes())
            .take(self.hash_size)
            .collect()
    }
}

/// SHA-384, SHA-512 and the truncated SHA-512/t variants (64-bit words, 128-byte blocks)
#[derive(Clone)]
pub struct Sha512Core {
    state: [u64; 8],
    iv: [u64; 8],
    hash_size: usize,
    name: &'static str,
}

impl Sha512Core {
    fn with_iv(iv: [u64; 8], hash_size: usize, name: &'static str) -> Self {
        Self {
            state: iv,
            iv,
            hash_size,
            name,
        }
    }

    /// SHA-384
    #[must_use]
    pub fn sha384() -> Self {
        Self::with_iv(SHA384_IV, 48, "SHA2-384")
    }

    /// SHA-512
    #[must_use]
    pub fn sha512() -> Self {
        Self::with_iv(SHA512_IV, 64, "SHA2-512")
    }

    /// SHA-512/224
    #[must_use]
    pub fn sha512_224() -> Self {
        Self::with_iv(SHA512_224_IV, 28, "SHA2-512/224")
    }

    /// SHA-512/256
    #[must_use]
    pub fn sha512_256() -> Self {
        Self::with_iv(SHA512_256_IV, 32, "SHA2-512/256")
    }
}

impl BlockCore for Sha512Core {
    fn name(&self) -> String {
        self.name.to_string()
    }

    fn block_size(&self) -> usize {
        128
    }

    fn hash_size(&self) -> usize {
        self.hash_size
    }

    fn reset(&mut self) {
        self.state = self.iv;
    }

    fn compress(&mut self, block: &[u8]) {
        compress512(&mut self.state, block);
    }

    fn finish(&mut self, buffer: &mut HashBuffer, processed_bytes: u64) {
        md_pad(buffer, processed_bytes, 16, |block| {
            compress512(&mut self.state, block);
        });
    }

    fn digest(&self) -> Vec<u8> {
        self.state
            .iter()
            .flat_map(|word| word.to_be_bytes())
            .take(self.hash_size)
            .collect()
    }
}
