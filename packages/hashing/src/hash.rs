//! Hash function contracts
//!
//! [`HashFunction`] is the streaming contract every algorithm honors. Keyed
//! algorithms and extendable-output functions additionally implement the
//! capability traits [`KeyedHash`] and [`ExtendableOutput`]; the factory hands
//! those out as their own trait objects, so no caller ever downcasts.

use crate::convenience::{self, HashSource};
use crate::{HashError, HashResult, Result};
use hashkit_common::on_error;
use std::io::{IoSlice, Read};
use std::path::Path;

/// Streaming hash computation
///
/// The digest never depends on how input is split across
/// [`transform_bytes`](Self::transform_bytes) calls. After
/// [`transform_final`](Self::transform_final) the instance is back in its
/// freshly initialized state.
pub trait HashFunction: Send {
    /// Algorithm name, e.g. `SHA2-256`
    fn name(&self) -> String;

    /// Bytes consumed per compression call
    fn block_size(&self) -> usize;

    /// Digest length in bytes
    fn hash_size(&self) -> usize;

    /// Working buffer size used for stream and file ingestion
    fn buffer_size(&self) -> usize;

    /// Change the working buffer size
    ///
    /// # Errors
    ///
    /// Returns `HashError::InvalidArgument` for a zero size.
    fn set_buffer_size(&mut self, size: usize) -> Result<()>;

    /// Reset all mutable state to the algorithm's initial values
    fn initialize(&mut self);

    /// Absorb `data`
    ///
    /// # Errors
    ///
    /// Block and whole-input engines never fail here. Extendable-output
    /// functions return `HashError::InvalidOperation` once squeezing began.
    fn transform_bytes(&mut self, data: &[u8]) -> Result<()>;

    /// Finish the computation, return the digest and re-initialize
    ///
    /// # Errors
    ///
    /// Propagates errors from the algorithm's output stage.
    fn transform_final(&mut self) -> Result<HashResult>;

    /// Deep, independent copy of the live state
    fn clone_hash(&self) -> Box<dyn HashFunction>;

    /// Absorb `length` bytes of `data` starting at `index`
    ///
    /// # Errors
    ///
    /// Returns `HashError::OutOfRange` if the range does not fit in `data`.
    fn transform_range(&mut self, data: &[u8], index: usize, length: usize) -> Result<()> {
        let end = index.checked_add(length).unwrap_or(usize::MAX);
        let Some(range) = data.get(index..end) else {
            let err = HashError::out_of_range(format!(
                "range {index}..{index}+{length} exceeds input of {} bytes",
                data.len()
            ));
            return Err(on_error("transform_range", err));
        };
        self.transform_bytes(range)
    }

    /// Initialize, absorb `data` and finalize
    ///
    /// # Errors
    ///
    /// Propagates errors from the transform calls.
    fn compute_bytes(&mut self, data: &[u8]) -> Result<HashResult> {
        self.initialize();
        self.transform_bytes(data)?;
        self.transform_final()
    }

    /// Hash the UTF-8 encoding of `text`
    ///
    /// # Errors
    ///
    /// Propagates errors from the transform calls.
    fn compute_string(&mut self, text: &str) -> Result<HashResult> {
        self.compute_bytes(text.as_bytes())
    }

    /// Absorb a borrowed memory region in working-buffer-sized chunks
    ///
    /// # Errors
    ///
    /// Propagates errors from the transform calls.
    fn transform_untyped(&mut self, region: &[u8]) -> Result<()> {
        convenience::feed_chunked(self, region)
    }

    /// Absorb scattered regions in order
    ///
    /// # Errors
    ///
    /// Propagates errors from the transform calls.
    fn transform_io_slices(&mut self, bufs: &[IoSlice<'_>]) -> Result<()> {
        for buf in bufs {
            convenience::feed_chunked(self, buf)?;
        }
        Ok(())
    }

    /// Absorb everything `reader` yields until end of input
    ///
    /// Returns the number of bytes absorbed.
    ///
    /// # Errors
    ///
    /// Returns `HashError::Io` if a read fails.
    fn transform_reader(&mut self, reader: &mut dyn Read) -> Result<u64> {
        convenience::transform_reader(self, reader, None)
    }

    /// Absorb from the stream's current position
    ///
    /// `length` of `None` reads to the end. Returns the number of bytes absorbed.
    ///
    /// # Errors
    ///
    /// Returns `HashError::OutOfRange` if `length` reaches past the end of the
    /// stream (checked before anything is absorbed) and
    /// `HashError::InvalidArgument` if the stream cannot be positioned.
    fn transform_stream(
        &mut self,
        stream: &mut dyn HashSource,
        length: Option<u64>,
    ) -> Result<u64> {
        convenience::transform_stream(self, stream, length)
    }

    /// Initialize, absorb from the stream and finalize
    ///
    /// # Errors
    ///
    /// See [`transform_stream`](Self::transform_stream).
    fn compute_stream(
        &mut self,
        stream: &mut dyn HashSource,
        length: Option<u64>,
    ) -> Result<HashResult> {
        self.initialize();
        self.transform_stream(stream, length)?;
        self.transform_final()
    }

    /// Absorb `length` bytes of the file at `path` starting at offset `from`
    ///
    /// # Errors
    ///
    /// Returns `HashError::InvalidArgument` if the file cannot be opened and
    /// `HashError::OutOfRange` if `from`/`length` reach past its end.
    fn transform_file(&mut self, path: &Path, from: u64, length: Option<u64>) -> Result<u64> {
        convenience::transform_file(self, path, from, length)
    }

    /// Initialize, absorb the file range and finalize
    ///
    /// # Errors
    ///
    /// See [`transform_file`](Self::transform_file).
    fn compute_file(&mut self, path: &Path, from: u64, length: Option<u64>) -> Result<HashResult> {
        self.initialize();
        self.transform_file(path, from, length)?;
        self.transform_final()
    }
}

impl Clone for Box<dyn HashFunction> {
    fn clone(&self) -> Self {
        self.clone_hash()
    }
}

impl HashFunction for Box<dyn HashFunction> {
    fn name(&self) -> String {
        (**self).name()
    }

    fn block_size(&self) -> usize {
        (**self).block_size()
    }

    fn hash_size(&self) -> usize {
        (**self).hash_size()
    }

    fn buffer_size(&self) -> usize {
        (**self).buffer_size()
    }

    fn set_buffer_size(&mut self, size: usize) -> Result<()> {
        (**self).set_buffer_size(size)
    }

    fn initialize(&mut self) {
        (**self).initialize();
    }

    fn transform_bytes(&mut self, data: &[u8]) -> Result<()> {
        (**self).transform_bytes(data)
    }

    fn transform_final(&mut self) -> Result<HashResult> {
        (**self).transform_final()
    }

    fn clone_hash(&self) -> Box<dyn HashFunction> {
        (**self).clone_hash()
    }

    fn compute_bytes(&mut self, data: &[u8]) -> Result<HashResult> {
        (**self).compute_bytes(data)
    }
}

/// Accepted key lengths of a keyed algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyLength {
    /// Exactly this many bytes
    Exact(usize),
    /// Anything from zero up to this many bytes
    UpTo(usize),
    /// Any length
    Any,
}

impl KeyLength {
    /// Whether a key of `len` bytes is acceptable
    #[must_use]
    pub fn accepts(self, len: usize) -> bool {
        match self {
            Self::Exact(n) => len == n,
            Self::UpTo(n) => len <= n,
            Self::Any => true,
        }
    }
}

impl std::fmt::Display for KeyLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact(n) => write!(f, "{n} bytes"),
            Self::UpTo(n) => write!(f, "at most {n} bytes"),
            Self::Any => f.write_str("any length"),
        }
    }
}

/// Hash functions that take a key (MACs, seeded hashes)
pub trait KeyedHash: HashFunction {
    /// Current key, `None` while the algorithm's default key is in effect
    fn key(&self) -> Option<Vec<u8>>;

    /// Replace the key and re-initialize
    ///
    /// `None` or an empty key restores the default key.
    ///
    /// # Errors
    ///
    /// Returns `HashError::InvalidKeyLength` if the key length is not
    /// accepted; the previous key stays in effect.
    fn set_key(&mut self, key: Option<&[u8]>) -> Result<()>;

    /// Key lengths this algorithm accepts
    fn key_length(&self) -> KeyLength;

    /// Deep copy as a keyed trait object
    fn clone_keyed(&self) -> Box<dyn KeyedHash>;
}

impl Clone for Box<dyn KeyedHash> {
    fn clone(&self) -> Self {
        self.clone_keyed()
    }
}

/// Extendable-output functions
///
/// The first output request closes absorption until the next
/// [`initialize`](HashFunction::initialize). Output is one continuous stream:
/// consecutive requests continue where the previous one stopped.
pub trait ExtendableOutput: HashFunction {
    /// Output size in bits produced by [`transform_final`](HashFunction::transform_final)
    fn xof_size_in_bits(&self) -> u64;

    /// Change the output size used by `transform_final`
    ///
    /// # Errors
    ///
    /// Returns `HashError::InvalidArgument` unless `bits` is a positive
    /// multiple of 8.
    fn set_xof_size_in_bits(&mut self, bits: u64) -> Result<()>;

    /// Write the next `count` output bytes into `dest[offset..offset + count]`
    ///
    /// # Errors
    ///
    /// Returns `HashError::InvalidArgument` if the range does not fit in `dest`.
    fn do_output(&mut self, dest: &mut [u8], offset: usize, count: usize) -> Result<()>;

    /// Fill `out` with the next output bytes
    ///
    /// # Errors
    ///
    /// See [`do_output`](Self::do_output).
    fn squeeze(&mut self, out: &mut [u8]) -> Result<()> {
        let count = out.len();
        self.do_output(out, 0, count)
    }

    /// Deep copy as an extendable-output trait object
    fn clone_xof(&self) -> Box<dyn ExtendableOutput>;
}

impl Clone for Box<dyn ExtendableOutput> {
    fn clone(&self) -> Self {
        self.clone_xof()
    }
}
