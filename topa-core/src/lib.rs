//! Merkle tree engine for topa
//!
//! This crate provides:
//! - Tree construction with last-leaf duplication for odd inputs
//! - Full reconstruction from new or existing values
//! - Root re-verification from leaf values
//! - Inclusion verification by walking a leaf's parent chain
//!
//! The hash strategy is injected by the caller; see [`topa_types::Hasher`].

pub mod error;
pub mod merkle;
pub mod value;

pub use error::MerkleError;
pub use merkle::{BasicMerkleTree, MerkleTree};
pub use value::{Content, Value};
