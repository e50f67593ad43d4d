//! Values that can be committed to a tree

use topa_types::{Digest, Hasher, Result, Sha256Hasher};

/// Anything stored in a tree leaf.
///
/// `digest` must be deterministic for unchanged content. `equals` is the
/// identity test used to locate a leaf during inclusion verification.
pub trait Value {
    fn digest(&self) -> Result<Digest>;

    fn equals(&self, other: &Self) -> bool;
}

impl Value for Vec<u8> {
    fn digest(&self) -> Result<Digest> {
        Sha256Hasher.hash(self)
    }

    fn equals(&self, other: &Self) -> bool {
        self == other
    }
}

impl Value for String {
    fn digest(&self) -> Result<Digest> {
        Sha256Hasher.hash(self.as_bytes())
    }

    fn equals(&self, other: &Self) -> bool {
        self == other
    }
}

impl Value for &str {
    fn digest(&self) -> Result<Digest> {
        Sha256Hasher.hash(self.as_bytes())
    }

    fn equals(&self, other: &Self) -> bool {
        self == other
    }
}

impl Value for &[u8] {
    fn digest(&self) -> Result<Digest> {
        Sha256Hasher.hash(self)
    }

    fn equals(&self, other: &Self) -> bool {
        self == other
    }
}

/// Raw bytes digested with an injected hash strategy
#[derive(Debug, Clone)]
pub struct Content<H> {
    bytes: Vec<u8>,
    hasher: H,
}

impl<H> Content<H> {
    pub fn new(bytes: impl Into<Vec<u8>>, hasher: H) -> Self {
        Self {
            bytes: bytes.into(),
            hasher,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl<H: Hasher> Value for Content<H> {
    fn digest(&self) -> Result<Digest> {
        self.hasher.hash(&self.bytes)
    }

    fn equals(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}
