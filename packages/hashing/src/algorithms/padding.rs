//! Merkle–Damgård length padding shared by the SHA-2 cores

use crate::buffer::HashBuffer;

/// Largest block size any padded core uses
const MAX_BLOCK: usize = 128;

/// Pad the pending tail with `0x80`, zeros and the big-endian bit length
///
/// `length_bytes` is the width of the length field (8 for SHA-256, 16 for
/// SHA-512). Emits one or two blocks through `compress`.
pub(crate) fn md_pad(
    buffer: &mut HashBuffer,
    processed_bytes: u64,
    length_bytes: usize,
    mut compress: impl FnMut(&[u8]),
) {
    let block_size = buffer.capacity();
    let pos = buffer.pos();
    let mut pad = [0u8; 2 * MAX_BLOCK];
    pad[..block_size].copy_from_slice(buffer.take_zero_padded());
    pad[pos] = 0x80;

    let total = if pos + 1 + length_bytes <= block_size {
        block_size
    } else {
        2 * block_size
    };
    let bits = (u128::from(processed_bytes) * 8).to_be_bytes();
    pad[total - length_bytes..total].copy_from_slice(&bits[bits.len() - length_bytes..]);

    for block in pad[..total].chunks_exact(block_size) {
        compress(block);
    }
}
