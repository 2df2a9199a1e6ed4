//! Hashing and delivery capabilities.
//!
//! A tracker is bound to one [`Environment`] at construction. The live one
//! hashes with SHA-256 and sends beacons over HTTP; the no-op one does
//! neither, for contexts where nothing should leave the process (server-side
//! rendering, tests, dry runs).

use crate::request::TrackingRequest;
use crate::transport::BeaconTransport;
use crate::Error;
use sha2::{Digest, Sha256};
use std::fmt::Debug;
use tracing::debug;

/// What the host can do for the tracking pipeline.
pub trait Environment: Send + Sync + Debug {
    /// Hash a normalized value to lowercase hex, or `None` when hashing is
    /// unavailable.
    fn digest(&self, input: &str) -> Option<String>;

    /// Deliver a built request. Must not block and must not fail.
    fn deliver(&self, request: TrackingRequest);
}

/// SHA-256 of `input` as 64 lowercase hex characters.
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Fully capable environment: SHA-256 hashing and HTTP delivery.
#[derive(Debug, Clone)]
pub struct LiveEnvironment {
    transport: BeaconTransport,
}

impl LiveEnvironment {
    pub fn new() -> Result<Self, Error> {
        Ok(Self {
            transport: BeaconTransport::new()?,
        })
    }
}

impl Environment for LiveEnvironment {
    fn digest(&self, input: &str) -> Option<String> {
        Some(sha256_hex(input))
    }

    fn deliver(&self, request: TrackingRequest) {
        self.transport.fire(request.into_url());
    }
}

/// Environment without hashing or delivery. Every request is dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEnvironment;

impl Environment for NoopEnvironment {
    fn digest(&self, _input: &str) -> Option<String> {
        None
    }

    fn deliver(&self, request: TrackingRequest) {
        debug!(event = %request.event_name(), "no delivery capability, dropping request");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_digest() {
        assert_eq!(
            sha256_hex("test@example.com"),
            "973dfe463ec85785f5f95af5ba3906eedb2d931c24e69824a89ea65dba4e813b"
        );
        assert_eq!(
            sha256_hex(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_digest_is_deterministic() {
        let env = LiveEnvironment::new().unwrap();
        let first = env.digest("a@b.com").unwrap();
        let second = env.digest("a@b.com").unwrap();

        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
        assert!(first
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_noop_has_no_digest() {
        assert_eq!(NoopEnvironment.digest("a@b.com"), None);
    }
}
