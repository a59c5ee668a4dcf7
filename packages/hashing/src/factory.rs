//! Name-based construction of hash engines
//!
//! Names are matched case-insensitively with `-`, `_`, `/` and spaces
//! ignored, so `sha2_512/256`, `SHA2-512-256` and `Sha2512256` all resolve to
//! the same algorithm. An `HMAC-` prefix wraps any fixed-size algorithm.

use crate::algorithms;
use crate::config::HashConfig;
use crate::hash::{ExtendableOutput, KeyedHash};
use crate::mac::Hmac;
use crate::{HashError, HashFunction, Result};
use hashkit_common::on_error;
use std::fmt;
use std::str::FromStr;

/// Every algorithm the factory can build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    /// SHA-224
    Sha2_224,
    /// SHA-256
    Sha2_256,
    /// SHA-384
    Sha2_384,
    /// SHA-512
    Sha2_512,
    /// SHA-512 truncated to 224 bits
    Sha2_512_224,
    /// SHA-512 truncated to 256 bits
    Sha2_512_256,
    /// SHA3-224
    Sha3_224,
    /// SHA3-256
    Sha3_256,
    /// SHA3-384
    Sha3_384,
    /// SHA3-512
    Sha3_512,
    /// Keccak with the original `0x01` padding, 224-bit digest
    Keccak224,
    /// Keccak-256, as used by Ethereum
    Keccak256,
    /// Keccak-288
    Keccak288,
    /// Keccak-384
    Keccak384,
    /// Keccak-512
    Keccak512,
    /// BLAKE2b with a 20-byte digest
    Blake2b160,
    /// BLAKE2b with a 32-byte digest
    Blake2b256,
    /// BLAKE2b with a 48-byte digest
    Blake2b384,
    /// BLAKE2b with a 64-byte digest
    Blake2b512,
    /// SHAKE128 extendable output
    Shake128,
    /// SHAKE256 extendable output
    Shake256,
    /// Bob Jenkins' lookup3 `hashlittle`
    Jenkins3,
    /// Paul Hsieh's SuperFastHash
    SuperFast,
    /// MurmurHash2, seeded
    Murmur2,
}

impl HashAlgorithm {
    /// All algorithms, in listing order
    pub const ALL: [Self; 24] = [
        Self::Sha2_224,
        Self::Sha2_256,
        Self::Sha2_384,
        Self::Sha2_512,
        Self::Sha2_512_224,
        Self::Sha2_512_256,
        Self::Sha3_224,
        Self::Sha3_256,
        Self::Sha3_384,
        Self::Sha3_512,
        Self::Keccak224,
        Self::Keccak256,
        Self::Keccak288,
        Self::Keccak384,
        Self::Keccak512,
        Self::Blake2b160,
        Self::Blake2b256,
        Self::Blake2b384,
        Self::Blake2b512,
        Self::Shake128,
        Self::Shake256,
        Self::Jenkins3,
        Self::SuperFast,
        Self::Murmur2,
    ];

    /// Canonical name, identical to the engine's `name()`
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Sha2_224 => "SHA2-224",
            Self::Sha2_256 => "SHA2-256",
            Self::Sha2_384 => "SHA2-384",
            Self::Sha2_512 => "SHA2-512",
            Self::Sha2_512_224 => "SHA2-512/224",
            Self::Sha2_512_256 => "SHA2-512/256",
            Self::Sha3_224 => "SHA3-224",
            Self::Sha3_256 => "SHA3-256",
            Self::Sha3_384 => "SHA3-384",
            Self::Sha3_512 => "SHA3-512",
            Self::Keccak224 => "KECCAK-224",
            Self::Keccak256 => "KECCAK-256",
            Self::Keccak288 => "KECCAK-288",
            Self::Keccak384 => "KECCAK-384",
            Self::Keccak512 => "KECCAK-512",
            Self::Blake2b160 => "BLAKE2B-160",
            Self::Blake2b256 => "BLAKE2B-256",
            Self::Blake2b384 => "BLAKE2B-384",
            Self::Blake2b512 => "BLAKE2B-512",
            Self::Shake128 => "SHAKE128",
            Self::Shake256 => "SHAKE256",
            Self::Jenkins3 => "JENKINS3",
            Self::SuperFast => "SUPERFAST",
            Self::Murmur2 => "MURMUR2",
        }
    }

    /// Alternative spellings accepted by [`FromStr`]
    fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Sha2_224 => &["SHA-224"],
            Self::Sha2_256 => &["SHA-256"],
            Self::Sha2_384 => &["SHA-384"],
            Self::Sha2_512 => &["SHA-512"],
            Self::Sha2_512_224 => &["SHA-512/224"],
            Self::Sha2_512_256 => &["SHA-512/256"],
            Self::SuperFast => &["SUPERFASTHASH"],
            Self::Murmur2 => &["MURMURHASH2"],
            _ => &[],
        }
    }

    fn answers_to(self, normalized: &str) -> bool {
        let is_match = |name: &str| normalize(name) == normalized;
        is_match(self.name()) || self.aliases().iter().any(|alias| is_match(alias))
    }

    /// Whether the algorithm takes a key
    #[must_use]
    pub fn is_keyed(self) -> bool {
        self.blake2b_len().is_some() || self == Self::Murmur2
    }

    /// Whether the algorithm is an extendable-output function
    #[must_use]
    pub fn is_xof(self) -> bool {
        matches!(self, Self::Shake128 | Self::Shake256)
    }

    fn blake2b_len(self) -> Option<usize> {
        match self {
            Self::Blake2b160 => Some(20),
            Self::Blake2b256 => Some(32),
            Self::Blake2b384 => Some(48),
            Self::Blake2b512 => Some(64),
            _ => None,
        }
    }

    fn build(self, xof_size_bits: Option<u64>) -> Result<Box<dyn HashFunction>> {
        if let Some(engine) = self.build_keyed()? {
            return Ok(engine);
        }
        if let Some(engine) = self.build_xof(xof_size_bits)? {
            return Ok(engine);
        }
        Ok(match self {
            Self::Sha2_224 => Box::new(algorithms::sha2_224()),
            Self::Sha2_256 => Box::new(algorithms::sha2_256()),
            Self::Sha2_384 => Box::new(algorithms::sha2_384()),
            Self::Sha2_512 => Box::new(algorithms::sha2_512()),
            Self::Sha2_512_224 => Box::new(algorithms::sha2_512_224()),
            Self::Sha2_512_256 => Box::new(algorithms::sha2_512_256()),
            Self::Sha3_224 => Box::new(algorithms::sha3_224()),
            Self::Sha3_256 => Box::new(algorithms::sha3_256()),
            Self::Sha3_384 => Box::new(algorithms::sha3_384()),
            Self::Sha3_512 => Box::new(algorithms::sha3_512()),
            Self::Keccak224 => Box::new(algorithms::keccak_224()),
            Self::Keccak256 => Box::new(algorithms::keccak_256()),
            Self::Keccak288 => Box::new(algorithms::keccak_288()),
            Self::Keccak384 => Box::new(algorithms::keccak_384()),
            Self::Keccak512 => Box::new(algorithms::keccak_512()),
            Self::Jenkins3 => Box::new(algorithms::jenkins3()),
            Self::SuperFast => Box::new(algorithms::super_fast()),
            // keyed and extendable-output algorithms returned above
            Self::Blake2b160
            | Self::Blake2b256
            | Self::Blake2b384
            | Self::Blake2b512
            | Self::Murmur2
            | Self::Shake128
            | Self::Shake256 => return Err(unsupported(self.name(), "plain")),
        })
    }

    // Both helpers below build the concrete engine and box it directly, so
    // the same value can be handed out as any of the three trait objects.

    fn build_keyed<T: ?Sized>(self) -> Result<Option<Box<T>>>
    where
        Box<T>: From<KeyedBox>,
    {
        let keyed = if let Some(len) = self.blake2b_len() {
            KeyedBox::Blake2b(algorithms::blake2b(len, None)?)
        } else if self == Self::Murmur2 {
            KeyedBox::Murmur2(algorithms::murmur2())
        } else {
            return Ok(None);
        };
        Ok(Some(Box::<T>::from(keyed)))
    }

    fn build_xof<T: ?Sized>(self, xof_size_bits: Option<u64>) -> Result<Option<Box<T>>>
    where
        Box<T>: From<algorithms::Shake>,
    {
        let xof = match self {
            Self::Shake128 => algorithms::shake128(xof_size_bits)?,
            Self::Shake256 => algorithms::shake256(xof_size_bits)?,
            _ => return Ok(None),
        };
        Ok(Some(Box::<T>::from(xof)))
    }
}

/// Concrete keyed engines, before boxing
enum KeyedBox {
    Blake2b(algorithms::Blake2b),
    Murmur2(algorithms::Murmur2),
}

impl From<KeyedBox> for Box<dyn HashFunction> {
    fn from(keyed: KeyedBox) -> Self {
        match keyed {
            KeyedBox::Blake2b(h) => Box::new(h),
            KeyedBox::Murmur2(h) => Box::new(h),
        }
    }
}

impl From<KeyedBox> for Box<dyn KeyedHash> {
    fn from(keyed: KeyedBox) -> Self {
        match keyed {
            KeyedBox::Blake2b(h) => Box::new(h),
            KeyedBox::Murmur2(h) => Box::new(h),
        }
    }
}

impl From<algorithms::Shake> for Box<dyn HashFunction> {
    fn from(xof: algorithms::Shake) -> Self {
        Box::new(xof)
    }
}

impl From<algorithms::Shake> for Box<dyn ExtendableOutput> {
    fn from(xof: algorithms::Shake) -> Self {
        Box::new(xof)
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '-' | '_' | '/' | ' '))
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

fn unsupported(name: &str, capability: &str) -> HashError {
    on_error(
        "factory",
        HashError::UnsupportedAlgorithm(format!("{name} (as {capability} hash)")),
    )
}

impl FromStr for HashAlgorithm {
    type Err = HashError;

    fn from_str(name: &str) -> Result<Self> {
        let wanted = normalize(name);
        Self::ALL
            .into_iter()
            .find(|algo| algo.answers_to(&wanted))
            .ok_or_else(|| {
                let err = HashError::UnsupportedAlgorithm(name.to_string());
                on_error("factory", err)
            })
    }
}

/// Builds engines by algorithm name
pub struct HashFactory;

impl HashFactory {
    /// Canonical names of every algorithm, in listing order
    #[must_use]
    pub fn names() -> Vec<&'static str> {
        HashAlgorithm::ALL.iter().map(|algo| algo.name()).collect()
    }

    /// Create an engine with default settings
    ///
    /// Names prefixed with `HMAC-` build an HMAC keyed with the empty key;
    /// use [`create_keyed`](Self::create_keyed) to set a key.
    ///
    /// # Errors
    ///
    /// Returns `HashError::UnsupportedAlgorithm` for unknown names.
    pub fn create(name: &str) -> Result<Box<dyn HashFunction>> {
        Self::create_with_config(name, &HashConfig::default())
    }

    /// Create an engine and apply `config`
    ///
    /// # Errors
    ///
    /// Returns `HashError::UnsupportedAlgorithm` for unknown names and
    /// `HashError::InvalidArgument` if `config` fails validation.
    pub fn create_with_config(name: &str, config: &HashConfig) -> Result<Box<dyn HashFunction>> {
        config.validate()?;
        let mut engine: Box<dyn HashFunction> = match strip_hmac(name) {
            Some(inner) => Box::new(Self::create_hmac(inner)?),
            None => name.parse::<HashAlgorithm>()?.build(config.xof_size_bits)?,
        };
        engine.set_buffer_size(config.buffer_size)?;
        tracing::debug!(
            algorithm = %engine.name(),
            buffer_size = config.buffer_size,
            "engine created"
        );
        Ok(engine)
    }

    /// Create a keyed engine (BLAKE2b, MurmurHash2 or any `HMAC-` name)
    ///
    /// # Errors
    ///
    /// Returns `HashError::UnsupportedAlgorithm` for unknown names and for
    /// algorithms that take no key.
    pub fn create_keyed(name: &str) -> Result<Box<dyn KeyedHash>> {
        if let Some(inner) = strip_hmac(name) {
            return Ok(Box::new(Self::create_hmac(inner)?));
        }
        let algo: HashAlgorithm = name.parse()?;
        algo.build_keyed()?
            .ok_or_else(|| unsupported(algo.name(), "keyed"))
    }

    /// Create an extendable-output engine
    ///
    /// # Errors
    ///
    /// Returns `HashError::UnsupportedAlgorithm` for unknown names and for
    /// fixed-size algorithms.
    pub fn create_xof(name: &str, xof_size_bits: Option<u64>) -> Result<Box<dyn ExtendableOutput>> {
        let algo: HashAlgorithm = name.parse()?;
        algo.build_xof(xof_size_bits)?
            .ok_or_else(|| unsupported(algo.name(), "extendable-output"))
    }

    /// HMAC over the named algorithm
    ///
    /// # Errors
    ///
    /// Returns `HashError::UnsupportedAlgorithm` for unknown names and for
    /// extendable-output algorithms.
    pub fn create_hmac(name: &str) -> Result<Hmac<Box<dyn HashFunction>>> {
        let algo: HashAlgorithm = name.parse()?;
        if algo.is_xof() {
            return Err(unsupported(algo.name(), "HMAC"));
        }
        Hmac::new(algo.build(None)?)
    }

    /// Create an engine and seed it with `key` (BLAKE2b, MurmurHash2, `HMAC-` names)
    ///
    /// # Errors
    ///
    /// See [`create_keyed`](Self::create_keyed) and [`KeyedHash::set_key`].
    pub fn create_with_key(name: &str, key: &[u8]) -> Result<Box<dyn KeyedHash>> {
        let mut engine = Self::create_keyed(name)?;
        engine.set_key(Some(key))?;
        Ok(engine)
    }
}

fn strip_hmac(name: &str) -> Option<&str> {
    let prefix = name.get(..4)?;
    if !prefix.eq_ignore_ascii_case("HMAC") {
        return None;
    }
    let rest = name[4..].trim_start_matches(['-', '_', ' ']);
    Some(rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_name_round_trips() {
        for algo in HashAlgorithm::ALL {
            let engine = HashFactory::create(algo.name()).unwrap();
            assert_eq!(engine.name(), algo.name());
        }
    }

    #[test]
    fn names_are_normalized() {
        for spelling in ["sha2_512/256", "SHA2-512-256", "sha2512256", "Sha-512/256"] {
            assert_eq!(
                spelling.parse::<HashAlgorithm>().unwrap(),
                HashAlgorithm::Sha2_512_256,
                "{spelling}"
            );
        }
        assert_eq!(
            "blake2b_256".parse::<HashAlgorithm>().unwrap(),
            HashAlgorithm::Blake2b256
        );
    }

    #[test]
    fn unknown_names_are_unsupported() {
        assert!(matches!(
            HashFactory::create("MD5"),
            Err(HashError::UnsupportedAlgorithm(_))
        ));
    }

    #[test]
    fn capability_mismatch_is_unsupported() {
        assert!(matches!(
            HashFactory::create_keyed("SHA2-256"),
            Err(HashError::UnsupportedAlgorithm(_))
        ));
        assert!(matches!(
            HashFactory::create_xof("SHA3-256", None),
            Err(HashError::UnsupportedAlgorithm(_))
        ));
        assert!(matches!(
            HashFactory::create_hmac("SHAKE128"),
            Err(HashError::UnsupportedAlgorithm(_))
        ));
    }

    #[test]
    fn hmac_prefix() {
        let engine = HashFactory::create("hmac-sha2-256").unwrap();
        assert_eq!(engine.name(), "HMAC-SHA2-256");
        let keyed = HashFactory::create_keyed("HMAC_SHA3_256").unwrap();
        assert_eq!(keyed.name(), "HMAC-SHA3-256");
    }

    #[test]
    fn config_is_applied() {
        let config = HashConfig::default()
            .with_buffer_size(1024)
            .with_xof_size_bits(1000 * 8);
        let engine = HashFactory::create_with_config("shake256", &config).unwrap();
        assert_eq!(engine.buffer_size(), 1024);
        assert_eq!(engine.hash_size(), 1000);

        let bad = HashConfig::default().with_buffer_size(0);
        assert!(HashFactory::create_with_config("SHA2-256", &bad).is_err());
    }

    #[test]
    fn xof_defaults() {
        let shake128 = HashFactory::create_xof("SHAKE128", None).unwrap();
        assert_eq!(shake128.xof_size_in_bits(), 256);
        let shake256 = HashFactory::create_xof("SHAKE256", None).unwrap();
        assert_eq!(shake256.xof_size_in_bits(), 512);
    }

    #[test]
    fn names_cover_all() {
        let names = HashFactory::names();
        assert_eq!(names.len(), HashAlgorithm::ALL.len());
        assert!(names.contains(&"KECCAK-288"));
    }
}
