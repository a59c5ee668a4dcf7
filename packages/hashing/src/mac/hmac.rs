//! HMAC (RFC 2104) over any streaming hash
//!
//! The padded key is absorbed once into an inner and an outer template;
//! every computation starts from a clone of those, so rekeying is the only
//! time the pads are hashed.

use crate::hash::{KeyLength, KeyedHash};
use crate::{HashFunction, HashResult, Result};
use hashkit_common::{on_error, LoggingTransformer};
use zeroize::Zeroizing;

const IPAD: u8 = 0x36;
const OPAD: u8 = 0x5c;

/// Keyed-hash message authentication code
#[derive(Clone)]
pub struct Hmac<H> {
    inner: H,
    inner_start: H,
    outer_start: H,
    key: Zeroizing<Vec<u8>>,
}

impl<H: HashFunction + Clone + 'static> Hmac<H> {
    /// HMAC over `hash` with an empty key
    ///
    /// # Errors
    ///
    /// Propagates errors from absorbing the key pads.
    pub fn new(hash: H) -> Result<Self> {
        Self::with_key(hash, &[])
    }

    /// HMAC over `hash` keyed with `key`
    ///
    /// Keys longer than the hash's block size are hashed first.
    ///
    /// # Errors
    ///
    /// Propagates errors from hashing the key or absorbing the pads.
    pub fn with_key(mut hash: H, key: &[u8]) -> Result<Self> {
        hash.initialize();
        let mut mac = Self {
            inner: hash.clone(),
            inner_start: hash.clone(),
            outer_start: hash,
            key: Zeroizing::new(Vec::new()),
        };
        mac.rekey(key)?;
        Ok(mac)
    }

    fn rekey(&mut self, key: &[u8]) -> Result<()> {
        let block_size = self.outer_start.block_size();
        let mut padded = Zeroizing::new(if key.len() > block_size {
            let mut digest = self.outer_start.clone();
            digest.compute_bytes(key)?.to_vec()
        } else {
            key.to_vec()
        });
        padded.resize(block_size, 0);

        let ipad: Zeroizing<Vec<u8>> = Zeroizing::new(padded.iter().map(|b| b ^ IPAD).collect());
        let opad: Zeroizing<Vec<u8>> = Zeroizing::new(padded.iter().map(|b| b ^ OPAD).collect());

        let mut inner_start = self.outer_start.clone();
        inner_start.initialize();
        inner_start.transform_bytes(&ipad)?;
        let mut outer_start = self.outer_start.clone();
        outer_start.initialize();
        outer_start.transform_bytes(&opad)?;

        self.inner = inner_start.clone();
        self.inner_start = inner_start;
        self.outer_start = outer_start;
        self.key = Zeroizing::new(key.to_vec());
        Ok(())
    }
}

impl<H: HashFunction + Clone + 'static> HashFunction for Hmac<H> {
    fn name(&self) -> String {
        format!("HMAC-{}", self.inner.name())
    }

    fn block_size(&self) -> usize {
        self.inner.block_size()
    }

    fn hash_size(&self) -> usize {
        self.inner.hash_size()
    }

    fn buffer_size(&self) -> usize {
        self.inner.buffer_size()
    }

    fn set_buffer_size(&mut self, size: usize) -> Result<()> {
        self.inner.set_buffer_size(size)?;
        self.inner_start.set_buffer_size(size)
    }

    fn initialize(&mut self) {
        self.inner = self.inner_start.clone();
    }

    fn transform_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.inner.transform_bytes(data)
    }

    fn transform_final(&mut self) -> Result<HashResult> {
        let inner = self.inner.transform_final()?;
        let mut outer = self.outer_start.clone();
        outer.transform_bytes(inner.as_bytes())?;
        let tag = outer.transform_final()?;
        self.initialize();
        Ok(tag)
    }

    fn clone_hash(&self) -> Box<dyn HashFunction> {
        Box::new(self.clone())
    }
}

impl<H: HashFunction + Clone + 'static> KeyedHash for Hmac<H> {
    fn key(&self) -> Option<Vec<u8>> {
        (!self.key.is_empty()).then(|| self.key.to_vec())
    }

    fn set_key(&mut self, key: Option<&[u8]>) -> Result<()> {
        let key = key.unwrap_or_default();
        self.rekey(key).map_err(|err| on_error("set_key", err))?;
        LoggingTransformer::log_key_change(&self.name(), (!key.is_empty()).then_some(key));
        Ok(())
    }

    fn key_length(&self) -> KeyLength {
        KeyLength::Any
    }

    fn clone_keyed(&self) -> Box<dyn KeyedHash> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::sha2_256;
    use hex_literal::hex;

    #[test]
    fn rfc4231_case_2() {
        let mut mac = Hmac::with_key(sha2_256(), b"Jefe").unwrap();
        let tag = mac.compute_bytes(b"what do ya want for nothing?").unwrap();
        assert_eq!(
            tag.as_bytes(),
            hex!("5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843")
        );
    }

    #[test]
    fn long_key_is_hashed_first() {
        // RFC 4231 test case 6
        let key = [0xaa; 131];
        let mut mac = Hmac::with_key(sha2_256(), &key).unwrap();
        let tag = mac
            .compute_bytes(b"Test Using Larger Than Block-Size Key - Hash Key First")
            .unwrap();
        assert_eq!(
            tag.as_bytes(),
            hex!("60e431591ee0b67f0d8a26aacbf5b77f8e0bc6213728c5140546040f0ee37f54")
        );
    }

    #[test]
    fn set_key_restarts_and_reports_key() {
        let mut mac = Hmac::new(sha2_256()).unwrap();
        assert_eq!(mac.key(), None);
        mac.transform_bytes(b"partial").unwrap();
        mac.set_key(Some(b"Jefe")).unwrap();
        assert_eq!(mac.key().as_deref(), Some(&b"Jefe"[..]));

        let msg = b"what do ya want for nothing?";
        mac.transform_bytes(msg).unwrap();
        let tag = mac.transform_final().unwrap();
        assert_eq!(
            tag.to_hex(),
            "5BDCC146BF60754E6A042426089575C75A003F089D2739839DEC58B964EC3843"
        );
        assert_eq!(mac.name(), "HMAC-SHA2-256");
        assert_eq!(mac.key_length(), KeyLength::Any);
    }
}
