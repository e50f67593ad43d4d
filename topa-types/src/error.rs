//! Error types for topa hashing primitives

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{algorithm} hashing failed: {reason}")]
    HashFailed { algorithm: String, reason: String },

    #[error("hasher {0} has already been registered")]
    HasherAlreadyRegistered(String),

    #[error("hasher {0} not found")]
    HasherNotFound(String),

    #[error("Hex encoding error: {0}")]
    HexEncoding(#[from] hex::FromHexError),
}
