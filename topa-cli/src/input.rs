//! Reading values and committing them to a tree

use std::path::Path;

use topa_core::{BasicMerkleTree, Content, MerkleError};
use topa_types::SharedHasher;
use tracing::debug;

use crate::{CliError, Result};

/// Tree over CLI values; leaves and internal nodes share one strategy
pub type CliTree = BasicMerkleTree<Content<SharedHasher>, SharedHasher>;

/// Collect values from positional arguments followed by the lines of
/// `file`, if any. Blank lines are skipped.
pub fn read_values(args: &[String], file: Option<&Path>) -> Result<Vec<String>> {
    let mut values: Vec<String> = args.to_vec();

    if let Some(path) = file {
        let contents = std::fs::read_to_string(path)?;
        let before = values.len();
        values.extend(
            contents
                .lines()
                .map(|line| line.trim_end_matches('\r'))
                .filter(|line| !line.trim().is_empty())
                .map(str::to_string),
        );
        debug!("read {} values from {}", values.len() - before, path.display());
    }

    if values.is_empty() {
        return Err(CliError::NoValues);
    }
    Ok(values)
}

/// Wrap a CLI string as a tree value hashed with `hasher`
pub fn content(value: &str, hasher: &SharedHasher) -> Content<SharedHasher> {
    Content::new(value.as_bytes(), hasher.clone())
}

/// Build a tree over `values`
pub fn commit(values: &[String], hasher: &SharedHasher) -> Result<CliTree> {
    let contents: Vec<_> = values.iter().map(|v| content(v, hasher)).collect();
    match BasicMerkleTree::new(contents, hasher.clone()) {
        Ok(tree) => Ok(tree),
        Err(MerkleError::EmptyValues) => Err(CliError::NoValues),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use topa_core::MerkleTree;
    use topa_types::HasherRegistry;

    #[test]
    fn test_read_values_from_args_and_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "c\r").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "d").unwrap();

        let args = vec!["a".to_string(), "b".to_string()];
        let values = read_values(&args, Some(file.path())).unwrap();
        assert_eq!(values, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_read_values_requires_input() {
        assert!(matches!(read_values(&[], None), Err(CliError::NoValues)));
    }

    #[test]
    fn test_read_values_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.txt");
        assert!(matches!(
            read_values(&["a".to_string()], Some(&missing)),
            Err(CliError::Io(_))
        ));
    }

    #[test]
    fn test_commit_uses_hasher_for_leaves() {
        let registry = HasherRegistry::with_defaults();
        let md5 = registry.get("MD5").unwrap();
        let values = vec!["1".to_string(), "2".to_string(), "3".to_string()];

        let tree = commit(&values, &md5).unwrap();
        assert_eq!(tree.root().len(), 16);
        assert!(tree.verify_value(tree.root().as_bytes(), &content("2", &md5)));
        assert!(!tree.verify_value(tree.root().as_bytes(), &content("4", &md5)));
    }

    #[test]
    fn test_commit_empty_is_no_values() {
        let hasher = HasherRegistry::with_defaults().get("SHA256").unwrap();
        assert!(matches!(commit(&[], &hasher), Err(CliError::NoValues)));
    }
}
