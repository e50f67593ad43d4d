//! Name-keyed collection of hash strategies
//!
//! The registry is an ordinary value owned by whoever assembles the
//! application. Tree construction never consults it; callers resolve a
//! strategy here and hand the result to the tree explicitly.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::hasher::{Blake3Hasher, Hasher, Md5Hasher, Sha256Hasher};

/// Hash strategy handle that can be cloned across trees and threads
pub type SharedHasher = Arc<dyn Hasher + Send + Sync>;

/// Strategy used when configuration does not name one
pub const DEFAULT_HASHER: &str = "SHA256";

#[derive(Default, Clone)]
pub struct HasherRegistry {
    hashers: HashMap<String, SharedHasher>,
}

impl HasherRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with `MD5`, `SHA256` and `BLAKE3`
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for hasher in [
            Arc::new(Md5Hasher) as SharedHasher,
            Arc::new(Sha256Hasher) as SharedHasher,
            Arc::new(Blake3Hasher) as SharedHasher,
        ] {
            let name = hasher.name().to_string();
            registry.hashers.insert(name, hasher);
        }
        registry
    }

    /// Register `hasher` under `name` (case-insensitive).
    pub fn register(&mut self, name: &str, hasher: SharedHasher) -> Result<()> {
        let key = normalize(name);
        if self.hashers.contains_key(&key) {
            warn!("hasher {} already registered", name);
            return Err(Error::HasherAlreadyRegistered(name.to_string()));
        }

        self.hashers.insert(key, hasher);
        info!("hasher {} registered", name);
        Ok(())
    }

    /// Look up a strategy by name (case-insensitive)
    pub fn get(&self, name: &str) -> Result<SharedHasher> {
        match self.hashers.get(&normalize(name)) {
            Some(hasher) => Ok(Arc::clone(hasher)),
            None => {
                warn!("hasher {} not found", name);
                Err(Error::HasherNotFound(name.to_string()))
            }
        }
    }

    pub fn deregister(&mut self, name: &str) -> Option<SharedHasher> {
        self.hashers.remove(&normalize(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.hashers.contains_key(&normalize(name))
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.hashers.keys().cloned().collect();
        names.sort();
        names
    }
}

impl std::fmt::Debug for HasherRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HasherRegistry")
            .field("hashers", &self.names())
            .finish()
    }
}

fn normalize(name: &str) -> String {
    name.to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_registered() {
        let registry = HasherRegistry::with_defaults();
        assert_eq!(registry.names(), vec!["BLAKE3", "MD5", "SHA256"]);
        assert!(registry.contains(DEFAULT_HASHER));
    }

    #[test]
    fn test_register_duplicate_fails() {
        let mut registry = HasherRegistry::with_defaults();
        let err = registry
            .register("SHA256", Arc::new(Sha256Hasher))
            .unwrap_err();
        assert!(matches!(err, Error::HasherAlreadyRegistered(ref name) if name == "SHA256"));
        assert_eq!(err.to_string(), "hasher SHA256 has already been registered");

        assert!(registry.register("test", Arc::new(Sha256Hasher)).is_ok());
        assert!(registry.get("test").is_ok());

        assert!(registry.deregister("test").is_some());
        assert!(!registry.contains("test"));
    }

    #[test]
    fn test_get_is_case_insensitive() {
        let registry = HasherRegistry::with_defaults();

        let err = registry.get("test").err().unwrap();
        assert_eq!(err.to_string(), "hasher test not found");

        let hasher = registry.get("sha256").unwrap();
        assert_eq!(hasher.name(), "SHA256");
        assert_eq!(
            hasher.hash(b"this is used for sha256 test").unwrap().to_hex(),
            "069c725da1725e638c8f1d901d4c4245d8b68cf571bbe445cb7be8709e5b59a2"
        );

        let md5 = registry.get("md5").unwrap();
        assert_eq!(
            md5.hash(b"this is used for md5 test").unwrap().to_hex(),
            "14c4063d61bd57528837784838ea5a79"
        );
    }

    #[test]
    fn test_registries_are_independent() {
        let mut a = HasherRegistry::new();
        let b = HasherRegistry::new();
        a.register("md5", Arc::new(Md5Hasher)).unwrap();
        assert!(a.contains("MD5"));
        assert!(!b.contains("MD5"));
    }
}
