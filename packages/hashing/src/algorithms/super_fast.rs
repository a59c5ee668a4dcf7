//! Paul Hsieh's SuperFastHash

use crate::engine::WholeInputCore;

fn le_u16(bytes: &[u8]) -> u32 {
    u32::from(u16::from_le_bytes([bytes[0], bytes[1]]))
}

/// Tail bytes are read as signed chars, as in the reference code.
fn signed(byte: u8) -> u32 {
    i32::from(byte as i8) as u32
}

/// SuperFastHash, seeded with the input length
#[derive(Clone, Default)]
pub struct SuperFastCore;

impl SuperFastCore {
    fn hash(data: &[u8]) -> u32 {
        if data.is_empty() {
            return 0;
        }
        let mut hash = data.len() as u32;

        let mut chunks = data.chunks_exact(4);
        for chunk in &mut chunks {
            hash = hash.wrapping_add(le_u16(&chunk[0..2]));
            let tmp = (le_u16(&chunk[2..4]) << 11) ^ hash;
            hash = (hash << 16) ^ tmp;
            hash = hash.wrapping_add(hash >> 11);
        }

        let rem = chunks.remainder();
        match rem.len() {
            3 => {
                hash = hash.wrapping_add(le_u16(&rem[0..2]));
                hash ^= hash << 16;
                hash ^= signed(rem[2]) << 18;
                hash = hash.wrapping_add(hash >> 11);
            }
            2 => {
                hash = hash.wrapping_add(le_u16(&rem[0..2]));
                hash ^= hash << 11;
                hash = hash.wrapping_add(hash >> 17);
            }
            1 => {
                hash = hash.wrapping_add(signed(rem[0]));
                hash ^= hash << 10;
                hash = hash.wrapping_add(hash >> 1);
            }
            _ => {}
        }

        // avalanche
        hash ^= hash << 3;
        hash = hash.wrapping_add(hash >> 5);
        hash ^= hash << 4;
        hash = hash.wrapping_add(hash >> 17);
        hash ^= hash << 25;
        hash.wrapping_add(hash >> 6)
    }
}

impl WholeInputCore for SuperFastCore {
    fn name(&self) -> String {
        "SUPERFAST".to_string()
    }

    fn block_size(&self) -> usize {
        4
    }

    fn hash_size(&self) -> usize {
        4
    }

    fn compute(&self, data: &[u8]) -> Vec<u8> {
        Self::hash(data).to_be_bytes().to_vec()
    }
}
