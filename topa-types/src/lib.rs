//! Core types for topa commitments
//!
//! This crate defines the digest primitive and the pluggable hash
//! strategies that the Merkle tree engine consumes.

pub mod error;
pub mod hasher;
pub mod primitives;
pub mod registry;

pub use error::{Error, Result};
pub use hasher::{Blake3Hasher, Hasher, Md5Hasher, Sha256Hasher};
pub use primitives::Digest;
pub use registry::{HasherRegistry, SharedHasher, DEFAULT_HASHER};
