//! Hash strategies
//!
//! A [`Hasher`] turns a byte sequence into a [`Digest`]. Every call starts
//! from a fresh internal state, so one instance can be shared freely.

use std::sync::Arc;

use sha2::Digest as _;

use crate::error::Result;
use crate::primitives::Digest;

/// Pluggable hash capability: `hash(bytes) -> digest`
pub trait Hasher {
    /// Registry name of this strategy (e.g. `SHA256`)
    fn name(&self) -> &str;

    /// Hash a message
    fn hash(&self, msg: &[u8]) -> Result<Digest>;

    /// Hash a pair of nodes: H(left || right)
    fn hash_pair(&self, left: &Digest, right: &Digest) -> Result<Digest> {
        self.hash(&Digest::concat(left, right))
    }
}

impl<H: Hasher + ?Sized> Hasher for &H {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn hash(&self, msg: &[u8]) -> Result<Digest> {
        (**self).hash(msg)
    }

    fn hash_pair(&self, left: &Digest, right: &Digest) -> Result<Digest> {
        (**self).hash_pair(left, right)
    }
}

impl<H: Hasher + ?Sized> Hasher for Box<H> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn hash(&self, msg: &[u8]) -> Result<Digest> {
        (**self).hash(msg)
    }

    fn hash_pair(&self, left: &Digest, right: &Digest) -> Result<Digest> {
        (**self).hash_pair(left, right)
    }
}

impl<H: Hasher + ?Sized> Hasher for Arc<H> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn hash(&self, msg: &[u8]) -> Result<Digest> {
        (**self).hash(msg)
    }

    fn hash_pair(&self, left: &Digest, right: &Digest) -> Result<Digest> {
        (**self).hash_pair(left, right)
    }
}

/// MD5: fast, not collision resistant. 16-byte digests.
#[derive(Debug, Clone, Copy, Default)]
pub struct Md5Hasher;

impl Hasher for Md5Hasher {
    fn name(&self) -> &str {
        "MD5"
    }

    fn hash(&self, msg: &[u8]) -> Result<Digest> {
        Ok(Digest::new(md5::compute(msg).0.to_vec()))
    }
}

/// SHA-256. 32-byte digests.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hasher;

impl Hasher for Sha256Hasher {
    fn name(&self) -> &str {
        "SHA256"
    }

    fn hash(&self, msg: &[u8]) -> Result<Digest> {
        Ok(Digest::new(sha2::Sha256::digest(msg).to_vec()))
    }

    fn hash_pair(&self, left: &Digest, right: &Digest) -> Result<Digest> {
        let mut hasher = sha2::Sha256::new();
        hasher.update(left.as_bytes());
        hasher.update(right.as_bytes());
        Ok(Digest::new(hasher.finalize().to_vec()))
    }
}

/// BLAKE3. 32-byte digests.
#[derive(Debug, Clone, Copy, Default)]
pub struct Blake3Hasher;

impl Hasher for Blake3Hasher {
    fn name(&self) -> &str {
        "BLAKE3"
    }

    fn hash(&self, msg: &[u8]) -> Result<Digest> {
        Ok(Digest::from(*blake3::hash(msg).as_bytes()))
    }

    fn hash_pair(&self, left: &Digest, right: &Digest) -> Result<Digest> {
        let mut hasher = blake3::Hasher::new();
        hasher.update(left.as_bytes());
        hasher.update(right.as_bytes());
        Ok(Digest::from(*hasher.finalize().as_bytes()))
    }
}
