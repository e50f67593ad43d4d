//! topa configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use topa_types::DEFAULT_HASHER;
use tracing::Level;

use crate::{CliError, Result};

/// Environment variable overriding `crypto.hash`
pub const ENV_HASH: &str = "TOPA_CRYPTO_HASH";
/// Environment variable overriding `logging.level`
pub const ENV_LOG_LEVEL: &str = "TOPA_LOG_LEVEL";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopaConfig {
    /// Hash strategy selection
    #[serde(default)]
    pub crypto: CryptoConfig,

    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CryptoConfig {
    /// Registry name of the hash strategy (case-insensitive)
    pub hash: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// One of trace, debug, info, warn, error
    pub level: String,
}

impl Default for CryptoConfig {
    fn default() -> Self {
        Self {
            hash: DEFAULT_HASHER.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Parsed level; unknown names fall back to INFO
    pub fn level(&self) -> Level {
        Level::from_str(self.level.trim()).unwrap_or(Level::INFO)
    }

    pub fn is_valid(&self) -> bool {
        Level::from_str(self.level.trim()).is_ok()
    }
}

impl TopaConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| CliError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a TOML file
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("failed to serialize configuration: {}", e)))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Load `path` if it exists, otherwise start from defaults. Environment
    /// overrides are applied in both cases.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            Self::from_file(path)?
        } else {
            Self::default()
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply `TOPA_*` overrides obtained through `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(hash) = lookup(ENV_HASH).filter(|v| !v.is_empty()) {
            self.crypto.hash = hash;
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL).filter(|v| !v.is_empty()) {
            self.logging.level = level;
        }
    }
}
