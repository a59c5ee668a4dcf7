//! PBKDF2 (RFC 8018) with HMAC as the pseudorandom function
//!
//! Derived output is one continuous stream: `get_bytes(16)` followed by
//! `get_bytes(16)` yields the same 32 bytes as a single `get_bytes(32)`.

use crate::mac::Hmac;
use crate::{HashError, HashFunction, Result};
use hashkit_common::on_error;
use zeroize::Zeroizing;

/// Password-based key derivation over HMAC-`H`
pub struct Pbkdf2Hmac<H> {
    mac: Hmac<H>,
    salt: Zeroizing<Vec<u8>>,
    iterations: u32,
    block_index: u64,
    block: Zeroizing<Vec<u8>>,
    cursor: usize,
}

impl<H: HashFunction + Clone + 'static> Pbkdf2Hmac<H> {
    /// Derive from `password` and `salt` with `iterations` rounds per block
    ///
    /// # Errors
    ///
    /// Returns `HashError::NullArgument` for an empty password or salt and
    /// `HashError::InvalidArgument` for zero iterations.
    pub fn new(hash: H, password: &[u8], salt: &[u8], iterations: u32) -> Result<Self> {
        if password.is_empty() {
            return Err(on_error("pbkdf2", HashError::NullArgument("password")));
        }
        if salt.is_empty() {
            return Err(on_error("pbkdf2", HashError::NullArgument("salt")));
        }
        if iterations == 0 {
            return Err(on_error(
                "pbkdf2",
                HashError::invalid_argument("iteration count must be positive"),
            ));
        }

        let mac = Hmac::with_key(hash, password)?;
        tracing::debug!(
            algorithm = %mac.name(),
            iterations,
            salt_len = salt.len(),
            "pbkdf2 initialized"
        );
        Ok(Self {
            mac,
            salt: Zeroizing::new(salt.to_vec()),
            iterations,
            block_index: 1,
            block: Zeroizing::new(Vec::new()),
            cursor: 0,
        })
    }

    /// Iterations per output block
    #[must_use]
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Restart the derived stream from its first byte
    pub fn initialize(&mut self) {
        self.mac.initialize();
        self.block_index = 1;
        self.block = Zeroizing::new(Vec::new());
        self.cursor = 0;
    }

    /// Next `count` bytes of derived key material
    ///
    /// # Errors
    ///
    /// Returns `HashError::InvalidArgument` for a zero count and
    /// `HashError::OutOfRange` once the 2^32 - 1 block limit is exhausted.
    pub fn get_bytes(&mut self, count: usize) -> Result<Zeroizing<Vec<u8>>> {
        if count == 0 {
            return Err(on_error(
                "get_bytes",
                HashError::invalid_argument("byte count must be positive"),
            ));
        }

        let mut out = Zeroizing::new(Vec::with_capacity(count));
        while out.len() < count {
            if self.cursor == self.block.len() {
                self.block = self.next_block()?;
                self.cursor = 0;
            }
            let n = (count - out.len()).min(self.block.len() - self.cursor);
            out.extend_from_slice(&self.block[self.cursor..self.cursor + n]);
            self.cursor += n;
        }
        Ok(out)
    }

    /// F(P, S, c, i) = U1 ^ U2 ^ ... ^ Uc
    fn next_block(&mut self) -> Result<Zeroizing<Vec<u8>>> {
        let index = u32::try_from(self.block_index).map_err(|_| {
            on_error(
                "get_bytes",
                HashError::out_of_range("derived key length limit reached"),
            )
        })?;
        self.block_index += 1;

        self.mac.initialize();
        self.mac.transform_bytes(&self.salt)?;
        self.mac.transform_bytes(&index.to_be_bytes())?;
        let mut u = Zeroizing::new(self.mac.transform_final()?.to_vec());
        let mut t = u.clone();

        for _ in 1..self.iterations {
            u = Zeroizing::new(self.mac.compute_bytes(&u)?.to_vec());
            for (acc, byte) in t.iter_mut().zip(u.iter()) {
                *acc ^= byte;
            }
        }
        Ok(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::{sha2_256, sha2_512};
    use hex_literal::hex;

    #[test]
    fn single_iteration() {
        let mut kdf = Pbkdf2Hmac::new(sha2_256(), b"password", b"salt", 1).unwrap();
        assert_eq!(
            kdf.get_bytes(32).unwrap().as_slice(),
            hex!("120fb6cffcf8b32c43e7225256c4f837a86548c92ccc35480805987cb70be17b")
        );
    }

    #[test]
    fn multi_block_output() {
        let mut kdf = Pbkdf2Hmac::new(
            sha2_256(),
            b"passwordPASSWORDpassword",
            b"saltSALTsaltSALTsaltSALTsaltSALTsalt",
            4096,
        )
        .unwrap();
        let expected = hex!(
            "348c89dbcbd32b2f32d814b8116e84cf2b17347e"
            "bc1800181c4e2a1fb8dd53e1c635518c7dac47e9"
        );
        assert_eq!(kdf.get_bytes(40).unwrap().as_slice(), expected);
    }

    #[test]
    fn output_is_resumable() {
        let mut whole = Pbkdf2Hmac::new(sha2_512(), b"password", b"salt", 3).unwrap();
        let expected = whole.get_bytes(100).unwrap();

        let mut pieces = Pbkdf2Hmac::new(sha2_512(), b"password", b"salt", 3).unwrap();
        let mut joined = Vec::new();
        for n in [1, 63, 2, 34] {
            joined.extend_from_slice(&pieces.get_bytes(n).unwrap());
        }
        assert_eq!(joined, expected.as_slice());
        assert_eq!(&expected[..8], hex!("b6b07cb2cebf4ad8"));
    }

    #[test]
    fn initialize_restarts_stream() {
        let mut kdf = Pbkdf2Hmac::new(sha2_256(), b"password", b"salt", 2).unwrap();
        let first = kdf.get_bytes(32).unwrap();
        kdf.initialize();
        assert_eq!(kdf.get_bytes(32).unwrap(), first);
        assert_eq!(
            first.as_slice(),
            hex!("ae4d0c95af6b46d32d0adff928f06dd02a303f8ef3c251dfd6e2d85a95474c43")
        );
    }

    #[test]
    fn argument_validation() {
        assert!(matches!(
            Pbkdf2Hmac::new(sha2_256(), b"", b"salt", 1),
            Err(HashError::NullArgument("password"))
        ));
        assert!(matches!(
            Pbkdf2Hmac::new(sha2_256(), b"pw", b"", 1),
            Err(HashError::NullArgument("salt"))
        ));
        assert!(matches!(
            Pbkdf2Hmac::new(sha2_256(), b"pw", b"salt", 0),
            Err(HashError::InvalidArgument(_))
        ));

        let mut kdf = Pbkdf2Hmac::new(sha2_256(), b"pw", b"salt", 1).unwrap();
        assert!(matches!(
            kdf.get_bytes(0),
            Err(HashError::InvalidArgument(_))
        ));
    }
}
