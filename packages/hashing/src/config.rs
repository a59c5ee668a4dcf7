//! Engine configuration with production defaults

use crate::{HashError, Result};
use serde::{Deserialize, Serialize};

/// Default working buffer for stream and file ingestion (64 KiB)
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Settings applied to engines built by [`HashFactory`](crate::HashFactory)
///
/// ```
/// use hashkit_hashing::HashConfig;
///
/// let config = HashConfig::from_json(r#"{ "buffer_size": 4096 }"#)?;
/// assert_eq!(config.buffer_size, 4096);
/// assert_eq!(config.xof_size_bits, None);
/// # Ok::<(), hashkit_hashing::HashError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HashConfig {
    /// Bytes read per chunk by stream and file ingestion
    pub buffer_size: usize,

    /// Output size for extendable-output functions; `None` keeps each
    /// algorithm's default. Ignored for fixed-size algorithms.
    pub xof_size_bits: Option<u64>,
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            xof_size_bits: None,
        }
    }
}

impl HashConfig {
    /// Set the working buffer size
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Set the extendable-output size in bits
    #[must_use]
    pub fn with_xof_size_bits(mut self, bits: u64) -> Self {
        self.xof_size_bits = Some(bits);
        self
    }

    /// Parse and validate a JSON configuration
    ///
    /// # Errors
    ///
    /// Returns `HashError::Config` for malformed JSON or unknown fields and
    /// `HashError::InvalidArgument` for values that fail validation.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field
    ///
    /// # Errors
    ///
    /// Returns `HashError::InvalidArgument` for a zero buffer size or an
    /// output size that is not a positive multiple of 8.
    pub fn validate(&self) -> Result<()> {
        check_buffer_size(self.buffer_size)?;
        if let Some(bits) = self.xof_size_bits {
            check_xof_size(bits)?;
        }
        Ok(())
    }
}

pub(crate) fn check_buffer_size(size: usize) -> Result<usize> {
    if size == 0 {
        return Err(HashError::invalid_argument(
            "buffer size must be greater than zero",
        ));
    }
    Ok(size)
}

pub(crate) fn check_xof_size(bits: u64) -> Result<u64> {
    if bits == 0 || bits % 8 != 0 {
        return Err(HashError::invalid_argument(format!(
            "output size must be a positive multiple of 8 bits, got {bits}"
        )));
    }
    Ok(bits)
}
