//! Property tests for tree construction and verification across hash strategies

use proptest::prelude::*;
use topa_core::{BasicMerkleTree, Content, MerkleError, MerkleTree};
use topa_types::{Hasher, HasherRegistry, SharedHasher};

fn hashers() -> Vec<SharedHasher> {
    let registry = HasherRegistry::with_defaults();
    registry
        .names()
        .iter()
        .map(|name| registry.get(name).unwrap())
        .collect()
}

fn contents(values: &[Vec<u8>], hasher: &SharedHasher) -> Vec<Content<SharedHasher>> {
    values
        .iter()
        .map(|v| Content::new(v.clone(), hasher.clone()))
        .collect()
}

fn arb_values() -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(prop::collection::vec(any::<u8>(), 0..16), 1..40)
}

#[test]
fn test_empty_reconstruct_on_any_hasher() {
    for hasher in hashers() {
        let result = BasicMerkleTree::<Content<SharedHasher>, _>::new(Vec::new(), hasher);
        assert!(matches!(result, Err(MerkleError::EmptyValues)));
    }
}

#[test]
fn test_root_width_follows_hasher() {
    for hasher in hashers() {
        let name = hasher.name().to_string();
        let values = contents(&[b"1".to_vec(), b"2".to_vec(), b"3".to_vec()], &hasher);
        let tree = BasicMerkleTree::new(values, hasher).unwrap();
        let expected = if name == "MD5" { 16 } else { 32 };
        assert_eq!(tree.root().len(), expected, "width for {}", name);
    }
}

#[test]
fn test_trees_are_generic_over_the_trait() {
    fn check<T: MerkleTree>(tree: &T, member: &T::Value) -> bool {
        tree.verify_root() && tree.verify_value(tree.root().as_bytes(), member)
    }

    let tree = BasicMerkleTree::new(vec!["a".to_string(), "b".to_string()], topa_types::Md5Hasher)
        .unwrap();
    assert!(check(&tree, &"b".to_string()));
}

proptest! {
    #[test]
    fn prop_verify_root_after_build(values in arb_values()) {
        for hasher in hashers() {
            let tree = BasicMerkleTree::new(contents(&values, &hasher), hasher.clone()).unwrap();
            prop_assert!(tree.verify_root());
        }
    }

    #[test]
    fn prop_members_verify(values in arb_values()) {
        for hasher in hashers() {
            let tree = BasicMerkleTree::new(contents(&values, &hasher), hasher.clone()).unwrap();
            let root = tree.root().clone();
            for v in &values {
                prop_assert!(tree.verify_value(root.as_bytes(), &Content::new(v.clone(), hasher.clone())));
            }
        }
    }

    #[test]
    fn prop_non_member_rejected(values in arb_values(), extra in prop::collection::vec(any::<u8>(), 0..16)) {
        prop_assume!(!values.contains(&extra));
        for hasher in hashers() {
            let tree = BasicMerkleTree::new(contents(&values, &hasher), hasher.clone()).unwrap();
            prop_assert!(!tree.verify_value(tree.root().as_bytes(), &Content::new(extra.clone(), hasher.clone())));
        }
    }

    #[test]
    fn prop_rehash_is_idempotent(values in arb_values()) {
        for hasher in hashers() {
            let mut tree = BasicMerkleTree::new(contents(&values, &hasher), hasher.clone()).unwrap();
            let root = tree.root().clone();
            tree.rehash().unwrap();
            prop_assert_eq!(tree.root(), &root);
            prop_assert!(tree.verify_root());
        }
    }

    #[test]
    fn prop_single_change_moves_root(values in arb_values(), index in any::<prop::sample::Index>(), extra in prop::collection::vec(any::<u8>(), 0..16)) {
        let i = index.index(values.len());
        prop_assume!(values[i] != extra);

        let mut changed = values.clone();
        changed[i] = extra;

        for hasher in hashers() {
            let mut tree = BasicMerkleTree::new(contents(&values, &hasher), hasher.clone()).unwrap();
            let before = tree.root().clone();
            tree.reconstruct(contents(&changed, &hasher)).unwrap();
            prop_assert_ne!(tree.root(), &before);
            prop_assert!(tree.verify_root());
        }
    }

    #[test]
    fn prop_odd_padding_matches_explicit_duplicate(values in arb_values()) {
        prop_assume!(values.len() % 2 == 1);
        let mut padded = values.clone();
        padded.push(values[values.len() - 1].clone());

        for hasher in hashers() {
            let odd = BasicMerkleTree::new(contents(&values, &hasher), hasher.clone()).unwrap();
            let even = BasicMerkleTree::new(contents(&padded, &hasher), hasher.clone()).unwrap();
            prop_assert_eq!(odd.root(), even.root());
            prop_assert_eq!(odd.leaf_count(), even.leaf_count());
        }
    }
}
