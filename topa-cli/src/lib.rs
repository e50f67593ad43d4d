//! topa command line support
//!
//! Configuration loading and value input for the `topa` binary.

pub mod config;
pub mod input;

pub use config::TopaConfig;
pub use input::{commit, read_values};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no values given: pass them as arguments or with --file")]
    NoValues,

    #[error(transparent)]
    Merkle(#[from] topa_core::MerkleError),

    #[error(transparent)]
    Types(#[from] topa_types::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;
