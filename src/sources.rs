//! Time and nonce sources for the signer.

use std::time::{SystemTime, UNIX_EPOCH};

use base64::prelude::BASE64_STANDARD;
use base64::Engine;

/// Supplies `oauth_timestamp`.
pub trait Clock {
    /// Seconds since the Unix epoch.
    fn now(&self) -> u64;
}

/// Supplies `oauth_nonce`. Every call must produce a fresh value; providers
/// reject a nonce they have already seen.
pub trait NonceSource {
    fn nonce(&self) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default()
    }
}

/// 32 random bytes, base64 encoded.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomNonce;

impl NonceSource for RandomNonce {
    fn nonce(&self) -> String {
        let bytes: [u8; 32] = rand::random();
        BASE64_STANDARD.encode(bytes)
    }
}

/// Always reports the same time. Meant for tests and reproducing signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now(&self) -> u64 {
        self.0
    }
}

/// Always hands out the same nonce. Meant for tests and reproducing
/// signatures; never use it against a real provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedNonce(pub String);

impl FixedNonce {
    pub fn new<T: Into<String>>(nonce: T) -> Self {
        FixedNonce(nonce.into())
    }
}

impl NonceSource for FixedNonce {
    fn nonce(&self) -> String {
        self.0.clone()
    }
}
