//! Binary Merkle tree with parent-linked nodes
//!
//! Nodes live in an arena owned by the tree. Children are referenced by
//! index from their parent, and every node records the index of its parent
//! so inclusion checks can walk from a leaf up to the root.

use std::fmt;

use topa_types::{Digest, Hasher};
use tracing::{debug, warn};

use crate::error::MerkleError;
use crate::value::Value;

type NodeId = usize;

/// Commitment to an ordered set of values
pub trait MerkleTree {
    type Value;

    /// The root digest
    fn root(&self) -> &Digest;

    /// Rebuild the tree. A non-empty `values` replaces the current value
    /// set; an empty one rebuilds from the values already stored.
    fn reconstruct(&mut self, values: Vec<Self::Value>) -> Result<(), MerkleError>;

    /// Recompute the root from leaf values and compare it with the stored root
    fn verify_root(&self) -> bool;

    /// Check that `candidate` is committed under `expected_root` and that
    /// every digest on its path to the root is consistent
    fn verify_value(&self, expected_root: &[u8], candidate: &Self::Value) -> bool;
}

#[derive(Debug, Clone, Copy)]
enum NodeKind {
    /// Index into the tree's value list
    Leaf { value: usize },
    Internal { left: NodeId, right: NodeId },
}

#[derive(Debug, Clone)]
struct Node {
    digest: Digest,
    kind: NodeKind,
    parent: Option<NodeId>,
}

impl Node {
    fn leaf(digest: Digest, value: usize) -> Self {
        Self {
            digest,
            kind: NodeKind::Leaf { value },
            parent: None,
        }
    }

    fn internal(digest: Digest, left: NodeId, right: NodeId) -> Self {
        Self {
            digest,
            kind: NodeKind::Internal { left, right },
            parent: None,
        }
    }
}

/// Node graph produced by one build pass
struct Layout {
    nodes: Vec<Node>,
    leaves: Vec<NodeId>,
    root: NodeId,
}

/// Arena-backed [`MerkleTree`]
pub struct BasicMerkleTree<V, H> {
    /// Every node; children always precede their parent
    nodes: Vec<Node>,
    /// Leaf nodes in input order, including the padding duplicate
    leaves: Vec<NodeId>,
    root: NodeId,
    values: Vec<V>,
    hasher: H,
}

impl<V: Value, H: Hasher> BasicMerkleTree<V, H> {
    /// Build a tree over `values` using `hasher` for internal nodes
    pub fn new(values: Vec<V>, hasher: H) -> Result<Self, MerkleError> {
        let layout = build(&values, &hasher)?;
        Ok(Self {
            nodes: layout.nodes,
            leaves: layout.leaves,
            root: layout.root,
            values,
            hasher,
        })
    }

    /// Rebuild from the stored values, refreshing every digest
    pub fn rehash(&mut self) -> Result<(), MerkleError> {
        self.reconstruct(Vec::new())
    }

    /// Number of leaves, counting the duplicate added for odd inputs
    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    /// Number of values committed
    pub fn value_count(&self) -> usize {
        self.values.len()
    }

    pub fn values(&self) -> &[V] {
        &self.values
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Number of edges from a leaf to the root
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut current = self.nodes[self.leaves[0]].parent;
        while let Some(id) = current {
            height += 1;
            current = self.nodes[id].parent;
        }
        height
    }

    fn install(&mut self, layout: Layout) {
        self.nodes = layout.nodes;
        self.leaves = layout.leaves;
        self.root = layout.root;
    }

    /// Digest used when re-checking a parent: leaves are re-hashed from
    /// their value, internal nodes are re-hashed from the cached digests
    /// of their children.
    fn node_digest(&self, id: NodeId) -> topa_types::Result<Digest> {
        match self.nodes[id].kind {
            NodeKind::Leaf { value } => self.values[value].digest(),
            NodeKind::Internal { left, right } => self
                .hasher
                .hash_pair(&self.nodes[left].digest, &self.nodes[right].digest),
        }
    }

    fn find_leaf(&self, candidate: &V) -> Option<NodeId> {
        self.leaves.iter().copied().find(|&id| match self.nodes[id].kind {
            NodeKind::Leaf { value } => self.values[value].equals(candidate),
            NodeKind::Internal { .. } => false,
        })
    }

    /// Recompute `id`'s digest from its children and compare
    fn check_parent(&self, id: NodeId) -> topa_types::Result<bool> {
        let node = &self.nodes[id];
        let NodeKind::Internal { left, right } = node.kind else {
            return Ok(false);
        };
        let left = self.node_digest(left)?;
        let right = self.node_digest(right)?;
        let recomputed = self.hasher.hash_pair(&left, &right)?;
        Ok(recomputed == node.digest)
    }
}

impl<V: Value, H: Hasher> MerkleTree for BasicMerkleTree<V, H> {
    type Value = V;

    fn root(&self) -> &Digest {
        &self.nodes[self.root].digest
    }

    fn reconstruct(&mut self, values: Vec<V>) -> Result<(), MerkleError> {
        if values.is_empty() {
            let layout = build(&self.values, &self.hasher)?;
            self.install(layout);
        } else {
            let layout = build(&values, &self.hasher)?;
            self.values = values;
            self.install(layout);
        }
        Ok(())
    }

    fn verify_root(&self) -> bool {
        // Children precede parents in the arena, so one forward pass
        // recomputes every digest from the leaf values up.
        let mut computed: Vec<Digest> = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            let digest = match node.kind {
                NodeKind::Leaf { value } => self.values[value].digest(),
                NodeKind::Internal { left, right } => {
                    self.hasher.hash_pair(&computed[left], &computed[right])
                }
            };
            match digest {
                Ok(digest) => computed.push(digest),
                Err(e) => {
                    warn!("root verification aborted: {}", e);
                    return false;
                }
            }
        }

        let matches = computed[self.root] == *self.root();
        if !matches {
            debug!("recomputed root differs from stored root {}", self.root());
        }
        matches
    }

    fn verify_value(&self, expected_root: &[u8], candidate: &V) -> bool {
        if self.root() != expected_root {
            debug!("expected root does not match tree root {}", self.root());
            return false;
        }

        let Some(leaf) = self.find_leaf(candidate) else {
            debug!("value not present in tree");
            return false;
        };

        let mut current = self.nodes[leaf].parent;
        while let Some(id) = current {
            match self.check_parent(id) {
                Ok(true) => {}
                Ok(false) => {
                    debug!("digest mismatch at node {} on path from leaf {}", id, leaf);
                    return false;
                }
                Err(e) => {
                    warn!("value verification aborted: {}", e);
                    return false;
                }
            }
            current = self.nodes[id].parent;
        }

        true
    }
}

impl<V, H: Hasher> fmt::Debug for BasicMerkleTree<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicMerkleTree")
            .field("root", &self.nodes[self.root].digest)
            .field("leaves", &self.leaves.len())
            .field("hasher", &self.hasher.name())
            .finish()
    }
}

/// Hash every value into a leaf, pad to an even count, then pair level by
/// level until a single node is left.
fn build<V: Value, H: Hasher>(values: &[V], hasher: &H) -> Result<Layout, MerkleError> {
    if values.is_empty() {
        return Err(MerkleError::EmptyValues);
    }

    let mut nodes: Vec<Node> = Vec::with_capacity(2 * values.len() + 2);
    let mut leaves: Vec<NodeId> = Vec::with_capacity(values.len() + 1);

    for (index, value) in values.iter().enumerate() {
        let digest = value.digest()?;
        leaves.push(nodes.len());
        nodes.push(Node::leaf(digest, index));
    }

    // Odd number of leaves - duplicate the last one as a separate node
    if leaves.len() % 2 == 1 {
        let last = &nodes[nodes.len() - 1];
        let duplicate = Node::leaf(last.digest.clone(), values.len() - 1);
        leaves.push(nodes.len());
        nodes.push(duplicate);
    }

    let mut level = leaves.clone();
    while level.len() > 1 {
        let mut next_level = Vec::with_capacity(level.len().div_ceil(2));

        for pair in level.chunks(2) {
            let left = pair[0];
            // A lone trailing node is paired with itself
            let right = pair.get(1).copied().unwrap_or(left);

            let digest = hasher.hash_pair(&nodes[left].digest, &nodes[right].digest)?;
            let parent = nodes.len();
            nodes.push(Node::internal(digest, left, right));
            nodes[left].parent = Some(parent);
            nodes[right].parent = Some(parent);
            next_level.push(parent);
        }

        level = next_level;
    }

    debug!(
        "built merkle tree with {} leaves using {}",
        leaves.len(),
        hasher.name()
    );

    Ok(Layout {
        nodes,
        root: level[0],
        leaves,
    })
}
