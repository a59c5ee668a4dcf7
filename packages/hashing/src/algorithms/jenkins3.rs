//! Bob Jenkins' lookup3 `hashlittle`
//!
//! The input length seeds all three lanes, so this runs on the whole-input
//! engine.

use crate::engine::WholeInputCore;

#[inline(always)]
fn mix(a: &mut u32, b: &mut u32, c: &mut u32) {
    *a = a.wrapping_sub(*c);
    *a ^= c.rotate_left(4);
    *c = c.wrapping_add(*b);
    *b = b.wrapping_sub(*a);
    *b ^= a.rotate_left(6);
    *a = a.wrapping_add(*c);
    *c = c.wrapping_sub(*b);
    *c ^= b.rotate_left(8);
    *b = b.wrapping_add(*a);
    *a = a.wrapping_sub(*c);
    *a ^= c.rotate_left(16);
    *c = c.wrapping_add(*b);
    *b = b.wrapping_sub(*a);
    *b ^= a.rotate_left(19);
    *a = a.wrapping_add(*c);
    *c = c.wrapping_sub(*b);
    *c ^= b.rotate_left(4);
    *b = b.wrapping_add(*a);
}

#[inline(always)]
fn final_mix(a: &mut u32, b: &mut u32, c: &mut u32) {
    *c ^= *b;
    *c = c.wrapping_sub(b.rotate_left(14));
    *a ^= *c;
    *a = a.wrapping_sub(c.rotate_left(11));
    *b ^= *a;
    *b = b.wrapping_sub(a.rotate_left(25));
    *c ^= *b;
    *c = c.wrapping_sub(b.rotate_left(16));
    *a ^= *c;
    *a = a.wrapping_sub(c.rotate_left(4));
    *b ^= *a;
    *b = b.wrapping_sub(a.rotate_left(14));
    *c ^= *b;
    *c = c.wrapping_sub(b.rotate_left(24));
}

fn le_word(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// lookup3 `hashlittle` with a configurable initial value
#[derive(Clone, Default)]
pub struct Jenkins3Core {
    initial_value: u32,
}

impl Jenkins3Core {
    /// `hashlittle` with initial value 0
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `hashlittle` with the given initial value
    #[must_use]
    pub fn with_initial_value(initial_value: u32) -> Self {
        Self { initial_value }
    }

    fn hash(&self, data: &[u8]) -> u32 {
        // lookup3 folds the length in as a 32-bit value
        let seed = 0xdead_beef_u32
            .wrapping_add(data.len() as u32)
            .wrapping_add(self.initial_value);
        let (mut a, mut b, mut c) = (seed, seed, seed);

        let mut rest = data;
        while rest.len() > 12 {
            a = a.wrapping_add(le_word(&rest[0..4]));
            b = b.wrapping_add(le_word(&rest[4..8]));
            c = c.wrapping_add(le_word(&rest[8..12]));
            mix(&mut a, &mut b, &mut c);
            rest = &rest[12..];
        }

        if rest.is_empty() {
            return c;
        }

        let mut tail = [0u8; 12];
        tail[..rest.len()].copy_from_slice(rest);
        a = a.wrapping_add(le_word(&tail[0..4]));
        b = b.wrapping_add(le_word(&tail[4..8]));
        c = c.wrapping_add(le_word(&tail[8..12]));
        final_mix(&mut a, &mut b, &mut c);
        c
    }
}

impl WholeInputCore for Jenkins3Core {
    fn name(&self) -> String {
        "JENKINS3".to_string()
    }

    fn block_size(&self) -> usize {
        12
    }

    fn hash_size(&self) -> usize {
        4
    }

    fn compute(&self, data: &[u8]) -> Vec<u8> {
        self.hash(data).to_be_bytes().to_vec()
    }
}
