//! Digest result type with encoding support

use crate::{HashError, Result};
use hashkit_common::on_error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use subtle::ConstantTimeEq;

/// Immutable result of a hash computation
///
/// The bytes are fixed at construction. Equality runs in constant time for
/// digests of equal length.
#[derive(Clone)]
pub struct HashResult {
    bytes: Box<[u8]>,
}

impl HashResult {
    /// Create a new hash result from raw bytes
    #[must_use]
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes: bytes.into_boxed_slice(),
        }
    }

    /// Parse a hash result from hex (either case, `-` separators allowed)
    ///
    /// # Errors
    ///
    /// Returns `HashError::InvalidArgument` if the text is not valid hex.
    pub fn from_hex(text: &str) -> Result<Self> {
        let compact: String = text.chars().filter(|c| *c != '-').collect();
        match hex::decode(compact) {
            Ok(bytes) => Ok(Self::new(bytes)),
            Err(e) => {
                let err = HashError::invalid_argument(format!("invalid hex digest: {e}"));
                Err(on_error("from_hex", err))
            }
        }
    }

    /// Get the raw bytes of the hash
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Copy the bytes into a Vec<u8>
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        self.bytes.to_vec()
    }

    /// Get the length of the hash in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if the hash is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Read a 1-byte digest as `u8`
    ///
    /// # Errors
    ///
    /// Returns `HashError::TypeMismatch` unless the digest is exactly 1 byte.
    pub fn get_u8(&self) -> Result<u8> {
        self.exact::<1>(8).map(u8::from_be_bytes)
    }

    /// Read a 2-byte digest as a big-endian `u16`
    ///
    /// # Errors
    ///
    /// Returns `HashError::TypeMismatch` unless the digest is exactly 2 bytes.
    pub fn get_u16(&self) -> Result<u16> {
        self.exact::<2>(16).map(u16::from_be_bytes)
    }

    /// Read a 4-byte digest as a big-endian `u32`
    ///
    /// # Errors
    ///
    /// Returns `HashError::TypeMismatch` unless the digest is exactly 4 bytes.
    pub fn get_u32(&self) -> Result<u32> {
        self.exact::<4>(32).map(u32::from_be_bytes)
    }

    /// Read an 8-byte digest as a big-endian `u64`
    ///
    /// # Errors
    ///
    /// Returns `HashError::TypeMismatch` unless the digest is exactly 8 bytes.
    pub fn get_u64(&self) -> Result<u64> {
        self.exact::<8>(64).map(u64::from_be_bytes)
    }

    fn exact<const N: usize>(&self, expected_bits: u32) -> Result<[u8; N]> {
        <[u8; N]>::try_from(&self.bytes[..]).map_err(|_| {
            let err = HashError::TypeMismatch {
                expected_bits,
                actual: self.bytes.len(),
            };
            on_error("numeric view", err)
        })
    }

    /// Uppercase hexadecimal, no separators
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode_upper(&self.bytes)
    }

    /// Uppercase hexadecimal with a `-` between every 4-byte group
    #[must_use]
    pub fn to_hex_grouped(&self) -> String {
        self.bytes
            .chunks(4)
            .map(hex::encode_upper)
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Get the hash as a base64 string
    #[must_use]
    pub fn to_base64(&self) -> String {
        use base64::{engine::general_purpose, Engine as _};
        general_purpose::STANDARD.encode(&self.bytes)
    }
}

impl PartialEq for HashResult {
    fn eq(&self, other: &Self) -> bool {
        self.bytes.ct_eq(&other.bytes).into()
    }
}

impl Eq for HashResult {}

impl std::hash::Hash for HashResult {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.bytes.hash(state);
    }
}

impl From<Vec<u8>> for HashResult {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl From<HashResult> for Vec<u8> {
    fn from(result: HashResult) -> Self {
        result.bytes.into_vec()
    }
}

impl AsRef<[u8]> for HashResult {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::fmt::Display for HashResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::fmt::Debug for HashResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HashResult({})", self.to_hex())
    }
}

impl Serialize for HashResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for HashResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::from_hex(&text).map_err(serde::de::Error::custom)
    }
}
