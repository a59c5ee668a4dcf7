//! Structured logging infrastructure
//!
//! hashkit libraries emit `tracing` events. With `tracing`'s `log` feature those
//! events reach the `log` facade when no subscriber is installed, so the
//! `env_logger` setup here is enough to see them.

use log::{debug, info};
use sha2::{Digest, Sha256};
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Logging setup and key-safe log helpers
pub struct LoggingTransformer;

impl LoggingTransformer {
    /// Initialize logging (call once at application startup)
    ///
    /// Levels come from `RUST_LOG`:
    /// - `RUST_LOG=hashkit_hashing=trace` - every engine event (finalize, phase changes)
    /// - `RUST_LOG=debug` - stream and file ingestion summaries
    /// - `RUST_LOG=warn` - rejected contract violations only
    pub fn init() {
        INIT_LOGGER.call_once(|| {
            env_logger::Builder::from_default_env()
                .format_timestamp_micros()
                .init();

            info!("hashkit logging initialized");
        });
    }

    /// Initialize logging for tests; safe to call from every test
    pub fn init_test() {
        let _ = env_logger::Builder::from_default_env()
            .is_test(true)
            .try_init();
    }

    /// Short, non-reversible fingerprint of key material for log lines
    ///
    /// Returns `#` followed by the first 12 hex characters of SHA-256(key),
    /// or `#empty` for an empty key.
    #[must_use]
    pub fn key_fingerprint(key: &[u8]) -> String {
        if key.is_empty() {
            return "#empty".to_string();
        }
        let hash = Sha256::digest(key);
        let hex_hash = format!("{hash:x}");
        format!("#{}", hex_hash.get(..12).unwrap_or(&hex_hash))
    }

    /// Log a key change without exposing the key
    pub fn log_key_change(algorithm: &str, key: Option<&[u8]>) {
        match key {
            Some(key) => debug!(
                "{algorithm}: key set (len: {}, fingerprint: {})",
                key.len(),
                Self::key_fingerprint(key)
            ),
            None => debug!("{algorithm}: key reset to default"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_stable_and_distinct() {
        LoggingTransformer::init_test();

        let a = LoggingTransformer::key_fingerprint(b"sensitive_key_123");
        let b = LoggingTransformer::key_fingerprint(b"different_key_456");

        assert_ne!(a, b);
        assert_eq!(a, LoggingTransformer::key_fingerprint(b"sensitive_key_123"));
        assert!(a.starts_with('#'));
        assert_eq!(a.len(), 13);
    }

    #[test]
    fn fingerprint_of_empty_key() {
        assert_eq!(LoggingTransformer::key_fingerprint(&[]), "#empty");
    }

    #[test]
    fn fingerprint_matches_sha256_prefix() {
        // SHA-256("abc") = ba7816bf8f01cfea...
        assert_eq!(LoggingTransformer::key_fingerprint(b"abc"), "#ba7816bf8f01");
    }
}
