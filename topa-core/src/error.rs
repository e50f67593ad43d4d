//! Tree construction errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MerkleError {
    #[error("empty values")]
    EmptyValues,

    /// Failure reported by a value digest or the tree's hash strategy,
    /// passed through as-is
    #[error(transparent)]
    Hash(#[from] topa_types::Error),
}
