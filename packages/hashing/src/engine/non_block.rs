//! Whole-input streaming engine
//!
//! Some mixing functions fold the total input length into their initial state,
//! so nothing can be mixed before the input is complete. [`NonBlockHash`]
//! collects every absorbed byte and runs the core once at finalization.
//! Cloning copies the collected input, so it costs O(bytes absorbed).

use crate::config::{check_buffer_size, DEFAULT_BUFFER_SIZE};
use crate::{HashFunction, HashResult, Result};

/// One-shot mixing function driven by [`NonBlockHash`]
pub trait WholeInputCore: Clone + Send + 'static {
    /// Algorithm name
    fn name(&self) -> String;

    /// Natural word size of the mixing loop, reported as the block size
    fn block_size(&self) -> usize;

    /// Digest length in bytes
    fn hash_size(&self) -> usize;

    /// Hash the complete input
    fn compute(&self, data: &[u8]) -> Vec<u8>;
}

/// Engine that defers all work to finalization
#[derive(Clone)]
pub struct NonBlockHash<C> {
    core: C,
    data: Vec<u8>,
    buffer_size: usize,
}

impl<C: WholeInputCore> NonBlockHash<C> {
    /// Wrap `core` in an empty engine
    #[must_use]
    pub fn new(core: C) -> Self {
        Self {
            core,
            data: Vec::new(),
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    /// The mixing core
    #[must_use]
    pub fn core(&self) -> &C {
        &self.core
    }

    pub(crate) fn core_mut(&mut self) -> &mut C {
        &mut self.core
    }

    /// Bytes collected since the last initialize
    #[must_use]
    pub fn pending(&self) -> usize {
        self.data.len()
    }
}

impl<C: WholeInputCore> HashFunction for NonBlockHash<C> {
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
        self.data.clear();
    }

    fn transform_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.data.extend_from_slice(data);
        Ok(())
    }

    fn transform_final(&mut self) -> Result<HashResult> {
        tracing::trace!(
            algorithm = %self.core.name(),
            processed_bytes = self.data.len(),
            "finalizing"
        );
        let digest = self.core.compute(&self.data);
        self.initialize();
        Ok(HashResult::new(digest))
    }

    fn clone_hash(&self) -> Box<dyn HashFunction> {
        Box::new(self.clone())
    }

    fn compute_bytes(&mut self, data: &[u8]) -> Result<HashResult> {
        self.initialize();
        Ok(HashResult::new(self.core.compute(data)))
    }
}
