//! Block-oriented streaming engine
//!
//! [`BlockHash`] owns the accumulator and the processed-byte counter and drives
//! an algorithm core one block at a time. The core only ever sees whole blocks
//! from [`BlockCore::compress`] and the pending tail at [`BlockCore::finish`].

use crate::buffer::HashBuffer;
use crate::config::{check_buffer_size, DEFAULT_BUFFER_SIZE};
use crate::{HashFunction, HashResult, Result};
use zeroize::Zeroizing;

/// Algorithm-specific half of a block engine
pub trait BlockCore: Clone + Send + 'static {
    /// Keep the last full block buffered until finalization
    ///
    /// Needed by algorithms that flag the final compression (BLAKE2).
    const DEFERS_LAST_BLOCK: bool = false;

    /// Algorithm name
    fn name(&self) -> String;

    /// Bytes per compression call
    fn block_size(&self) -> usize;

    /// Digest length in bytes
    fn hash_size(&self) -> usize;

    /// Restore the initial chaining state
    fn reset(&mut self);

    /// Data absorbed right after every reset (a padded key block, for example)
    fn prologue(&self) -> Option<Zeroizing<Vec<u8>>> {
        None
    }

    /// Fold one full block into the state
    fn compress(&mut self, block: &[u8]);

    /// Apply padding to the pending bytes in `buffer` and fold them in
    fn finish(&mut self, buffer: &mut HashBuffer, processed_bytes: u64);

    /// Read the digest out of the finished state
    fn digest(&self) -> Vec<u8>;
}

/// Block-oriented streaming engine
#[derive(Clone)]
pub struct BlockHash<C> {
    core: C,
    buffer: HashBuffer,
    processed_bytes: u64,
    buffer_size: usize,
}

impl<C: BlockCore> BlockHash<C> {
    /// Wrap `core` in a freshly initialized engine
    #[must_use]
    pub fn new(core: C) -> Self {
        let buffer = HashBuffer::new(core.block_size());
        let mut engine = Self {
            core,
            buffer,
            processed_bytes: 0,
            buffer_size: DEFAULT_BUFFER_SIZE,
        };
        engine.reset();
        engine
    }

    /// The algorithm core
    #[must_use]
    pub fn core(&self) -> &C {
        &self.core
    }

    pub(crate) fn core_mut(&mut self) -> &mut C {
        &mut self.core
    }

    /// Bytes absorbed since the last initialize
    #[must_use]
    pub fn processed_bytes(&self) -> u64 {
        self.processed_bytes
    }

    pub(crate) fn reset(&mut self) {
        self.core.reset();
        self.buffer.initialize();
        self.processed_bytes = 0;
        if let Some(prologue) = self.core.prologue() {
            self.absorb(&prologue);
        }
    }

    pub(crate) fn absorb(&mut self, data: &[u8]) {
        let block_size = self.buffer.capacity();
        let mut index = 0usize;
        let mut length = data.len();

        if !self.buffer.is_empty()
            && self
                .buffer
                .feed_tracked(data, &mut index, &mut length, &mut self.processed_bytes)
            && (!C::DEFERS_LAST_BLOCK || length > 0)
        {
            self.core.compress(self.buffer.take());
        }

        while length > block_size || (!C::DEFERS_LAST_BLOCK && length == block_size) {
            self.core.compress(&data[index..index + block_size]);
            index += block_size;
            length -= block_size;
            self.processed_bytes = self.processed_bytes.wrapping_add(block_size as u64);
        }

        if length > 0 {
            self.buffer
                .feed_tracked(data, &mut index, &mut length, &mut self.processed_bytes);
        }
    }

    /// Run the padding step; the core is left holding the final state
    pub(crate) fn close(&mut self) {
        self.core.finish(&mut self.buffer, self.processed_bytes);
    }
}

impl<C: BlockCore> HashFunction for BlockHash<C> {
    fn name(&self) -> String {
        self.core.name()
    }

    fn block_size(&self) -> usize {
        self.core.block_size()
    }

    fn hash_size(&self) -> usize {
        self.core.hash_size()
    }

    fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    fn set_buffer_size(&mut self, size: usize) -> Result<()> {
        self.buffer_size = check_buffer_size(size)?;
        Ok(())
    }

    fn initialize(&mut self) {
        self.reset();
    }

    fn transform_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.absorb(data);
        Ok(())
    }

    fn transform_final(&mut self) -> Result<HashResult> {
        tracing::trace!(
            algorithm = %self.core.name(),
            processed_bytes = self.processed_bytes,
            "finalizing"
        );
        self.close();
        let digest = self.core.digest();
        self.reset();
        Ok(HashResult::new(digest))
    }

    fn clone_hash(&self) -> Box<dyn HashFunction> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every compressed block; digest is the count plus the final tail
    #[derive(Clone, Default)]
    struct Recorder {
        blocks: Vec<Vec<u8>>,
        tail: Vec<u8>,
        total: u64,
    }

    impl BlockCore for Recorder {
        fn name(&self) -> String {
            "RECORDER".into()
        }

        fn block_size(&self) -> usize {
            4
        }

        fn hash_size(&self) -> usize {
            0
        }

        fn reset(&mut self) {
            *self = Self::default();
        }

        fn compress(&mut self, block: &[u8]) {
            self.blocks.push(block.to_vec());
        }

        fn finish(&mut self, buffer: &mut HashBuffer, processed_bytes: u64) {
            self.tail = buffer.filled().to_vec();
            self.total = processed_bytes;
            let _ = buffer.take_zero_padded();
        }

        fn digest(&self) -> Vec<u8> {
            let mut out: Vec<u8> = self.blocks.concat();
            out.push(b'|');
            out.extend_from_slice(&self.tail);
            out.push(self.total as u8);
            out
        }
    }

    #[derive(Clone, Default)]
    struct Deferring(Recorder);

    impl BlockCore for Deferring {
        const DEFERS_LAST_BLOCK: bool = true;

        fn name(&self) -> String {
            "DEFERRING".into()
        }

        fn block_size(&self) -> usize {
            4
        }

        fn hash_size(&self) -> usize {
            0
        }

        fn reset(&mut self) {
            self.0.reset();
        }

        fn compress(&mut self, block: &[u8]) {
            self.0.compress(block);
        }

        fn finish(&mut self, buffer: &mut HashBuffer, processed_bytes: u64) {
            self.0.finish(buffer, processed_bytes);
        }

        fn digest(&self) -> Vec<u8> {
            self.0.digest()
        }
    }

    #[test]
    fn full_blocks_are_compressed_eagerly() {
        let mut h = BlockHash::new(Recorder::default());
        h.transform_bytes(&[1, 2, 3]).unwrap();
        assert!(h.core().blocks.is_empty());
        h.transform_bytes(&[4, 5, 6, 7, 8, 9]).unwrap();
        assert_eq!(h.core().blocks, vec![vec![1, 2, 3, 4], vec![5, 6, 7, 8]]);
        assert_eq!(h.processed_bytes(), 9);

        let out = h.transform_final().unwrap();
        assert_eq!(out.as_bytes(), &[1, 2, 3, 4, 5, 6, 7, 8, b'|', 9, 9]);
        assert_eq!(h.processed_bytes(), 0);
    }

    #[test]
    fn exact_block_leaves_empty_tail() {
        let mut h = BlockHash::new(Recorder::default());
        let out = h.compute_bytes(&[1, 2, 3, 4]).unwrap();
        assert_eq!(out.as_bytes(), &[1, 2, 3, 4, b'|', 4]);
    }

    #[test]
    fn deferring_core_holds_back_last_block() {
        let mut h = BlockHash::new(Deferring::default());
        h.transform_bytes(&[1, 2, 3, 4]).unwrap();
        assert!(h.core().0.blocks.is_empty());

        h.transform_bytes(&[5, 6, 7, 8]).unwrap();
        assert_eq!(h.core().0.blocks, vec![vec![1, 2, 3, 4]]);

        let out = h.transform_final().unwrap();
        assert_eq!(out.as_bytes(), &[1, 2, 3, 4, b'|', 5, 6, 7, 8, 8]);
    }

    #[test]
    fn deferring_split_matches_single_call() {
        let data: Vec<u8> = (0..13).collect();
        let whole = BlockHash::new(Deferring::default())
            .compute_bytes(&data)
            .unwrap();
        for split in 0..=data.len() {
            let mut h = BlockHash::new(Deferring::default());
            h.transform_bytes(&data[..split]).unwrap();
            h.transform_bytes(&data[split..]).unwrap();
            assert_eq!(h.transform_final().unwrap(), whole, "split at {split}");
        }
    }
}
