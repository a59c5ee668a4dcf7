//! Extendable-output state machine
//!
//! `Absorbing --(first output request)--> Squeezing`, and only
//! [`initialize`](HashFunction::initialize) leads back. The squeeze cursor
//! lives here, so output requests of any size continue one stream.

use super::block::{BlockCore, BlockHash};
use crate::config::check_xof_size;
use crate::{ExtendableOutput, HashError, HashFunction, HashResult, Result};
use hashkit_common::on_error;
use zeroize::Zeroize;

/// A block core that can keep producing output after finishing
pub trait SqueezeCore: BlockCore {
    /// Write the next `block_size()` bytes of the output stream into `out`
    fn squeeze_block(&mut self, out: &mut [u8]);
}

/// Phase of an extendable-output computation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XofPhase {
    /// Accepting input
    Absorbing,
    /// Producing output; input is rejected
    Squeezing,
}

/// Extendable-output function over a block engine
#[derive(Clone)]
pub struct Xof<C> {
    engine: BlockHash<C>,
    phase: XofPhase,
    block: Box<[u8]>,
    cursor: usize,
    xof_size_bits: u64,
}

impl<C: SqueezeCore> Xof<C> {
    /// Wrap `core`, producing `xof_size_bits` bits from `transform_final`
    ///
    /// # Errors
    ///
    /// Returns `HashError::InvalidArgument` unless `xof_size_bits` is a
    /// positive multiple of 8.
    pub fn new(core: C, xof_size_bits: u64) -> Result<Self> {
        let xof_size_bits = check_xof_size(xof_size_bits)?;
        let engine = BlockHash::new(core);
        let block_size = engine.block_size();
        Ok(Self {
            engine,
            phase: XofPhase::Absorbing,
            block: vec![0u8; block_size].into_boxed_slice(),
            cursor: block_size,
            xof_size_bits,
        })
    }

    /// Current phase
    #[must_use]
    pub fn phase(&self) -> XofPhase {
        self.phase
    }

    fn output_len(&self) -> Result<usize> {
        usize::try_from(self.xof_size_bits / 8).map_err(|_| {
            let err = HashError::out_of_range(format!(
                "{} output bits do not fit in memory",
                self.xof_size_bits
            ));
            on_error("transform_final", err)
        })
    }
}

impl<C: SqueezeCore> HashFunction for Xof<C> {
    fn name(&self) -> String {
        self.engine.name()
    }

    fn block_size(&self) -> usize {
        self.engine.block_size()
    }

    fn hash_size(&self) -> usize {
        usize::try_from(self.xof_size_bits / 8).unwrap_or(usize::MAX)
    }

    fn buffer_size(&self) -> usize {
        self.engine.buffer_size()
    }

    fn set_buffer_size(&mut self, size: usize) -> Result<()> {
        self.engine.set_buffer_size(size)
    }

    fn initialize(&mut self) {
        self.engine.reset();
        self.phase = XofPhase::Absorbing;
        self.block.zeroize();
        self.cursor = self.block.len();
    }

    fn transform_bytes(&mut self, data: &[u8]) -> Result<()> {
        if self.phase == XofPhase::Squeezing {
            return Err(on_error(
                "transform_bytes",
                HashError::invalid_operation(format!(
                    "{} has already produced output; initialize before absorbing more input",
                    self.engine.name()
                )),
            ));
        }
        self.engine.absorb(data);
        Ok(())
    }

    fn transform_final(&mut self) -> Result<HashResult> {
        let len = self.output_len()?;
        let mut out = Vec::new();
        if out.try_reserve_exact(len).is_err() {
            let err = HashError::out_of_range(format!("cannot allocate {len} bytes of output"));
            return Err(on_error("transform_final", err));
        }
        out.resize(len, 0);
        self.do_output(&mut out, 0, len)?;
        self.initialize();
        Ok(HashResult::new(out))
    }

    fn clone_hash(&self) -> Box<dyn HashFunction> {
        Box::new(self.clone())
    }
}

impl<C: SqueezeCore> ExtendableOutput for Xof<C> {
    fn xof_size_in_bits(&self) -> u64 {
        self.xof_size_bits
    }

    fn set_xof_size_in_bits(&mut self, bits: u64) -> Result<()> {
        self.xof_size_bits = check_xof_size(bits)?;
        Ok(())
    }

    fn do_output(&mut self, dest: &mut [u8], offset: usize, count: usize) -> Result<()> {
        let end = offset
            .checked_add(count)
            .filter(|end| *end <= dest.len())
            .ok_or_else(|| {
                on_error(
                    "do_output",
                    HashError::invalid_argument(format!(
                        "output range {offset}..{offset}+{count} exceeds destination of {} bytes",
                        dest.len()
                    )),
                )
            })?;

        if self.phase == XofPhase::Absorbing {
            self.engine.close();
            self.phase = XofPhase::Squeezing;
            self.cursor = self.block.len();
            tracing::trace!(algorithm = %self.engine.name(), "absorb closed, squeezing");
        }

        let mut pos = offset;
        while pos < end {
            if self.cursor == self.block.len() {
                self.engine.core_mut().squeeze_block(&mut self.block);
                self.cursor = 0;
            }
            let n = (end - pos).min(self.block.len() - self.cursor);
            dest[pos..pos + n].copy_from_slice(&self.block[self.cursor..self.cursor + n]);
            self.cursor += n;
            pos += n;
        }
        Ok(())
    }

    fn clone_xof(&self) -> Box<dyn ExtendableOutput> {
        Box::new(self.clone())
    }
}
