//! Fixed-order binary Merkle tree over commitments.
//!
//! Leaves and internal nodes use distinct domain separators; left and right
//! children are never sorted — an authentication path carries an explicit
//! `is_left_sibling` flag per level so the fold order is unambiguous. Odd
//! node counts at a level duplicate the last node rather than padding with
//! zeros, matching the anonymity-set construction in the original backend.

use sha2::{Digest, Sha256};

const MERKLE_LEAF_V1: &[u8] = b"MERKLE_LEAF_V1";
const MERKLE_NODE_V1: &[u8] = b"MERKLE_NODE_V1";

/// One step of an authentication path: the sibling's hash and whether that
/// sibling sits to the left of the node being folded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathStep {
    pub sibling: [u8; 32],
    pub is_left_sibling: bool,
}

/// An authentication path from a leaf to the tree root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerklePath(pub Vec<PathStep>);

/// Hash a commitment into a leaf value.
pub fn leaf_hash(commitment: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(MERKLE_LEAF_V1);
    hasher.update(commitment);
    hasher.finalize().into()
}

fn node_hash(left: &[u8; 32], right: &[u8; 32]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(MERKLE_NODE_V1);
    hasher.update(left);
    hasher.update(right);
    hasher.finalize().into()
}

/// A fixed-depth Merkle tree built from an ordered list of commitments.
///
/// The tree always has `2^depth` leaf slots; if fewer commitments are
/// supplied, the last real leaf is duplicated to fill the level (and that
/// duplication propagates level by level for any resulting odd count),
/// matching the spec's "odd levels duplicate the last node" rule.
#[derive(Debug, Clone)]
pub struct MerkleTree {
    depth: u32,
    levels: Vec<Vec<[u8; 32]>>,
}

impl MerkleTree {
    /// Build a tree of the given depth from commitment bytes (each a
    /// 33-byte compressed Pedersen commitment, though the tree itself is
    /// agnostic to the leaf payload's length).
    pub fn build(depth: u32, commitments: &[Vec<u8>]) -> Self {
        let capacity = 1usize << depth;
        let mut leaves: Vec<[u8; 32]> = commitments.iter().map(|c| leaf_hash(c)).collect();

        if leaves.is_empty() {
            leaves.push(leaf_hash(&[]));
        }
        while leaves.len() < capacity {
            let last = *leaves.last().unwrap();
            leaves.push(last);
        }
        leaves.truncate(capacity);

        let mut levels = vec![leaves];
        while levels.last().unwrap().len() > 1 {
            let current = levels.last().unwrap();
            let mut next = Vec::with_capacity(current.len().div_ceil(2));
            let mut i = 0;
            while i < current.len() {
                if i + 1 < current.len() {
                    next.push(node_hash(&current[i], &current[i + 1]));
                    i += 2;
                } else {
                    // Odd node count at this level: duplicate the last node.
                    next.push(node_hash(&current[i], &current[i]));
                    i += 1;
                }
            }
            levels.push(next);
        }

        MerkleTree { depth, levels }
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn root(&self) -> [u8; 32] {
        *self.levels.last().unwrap().first().unwrap()
    }

    /// Authentication path for the leaf at `index`.
    pub fn path(&self, mut index: usize) -> MerklePath {
        let mut steps = Vec::with_capacity(self.levels.len() - 1);
        for level in &self.levels[..self.levels.len() - 1] {
            let is_left_sibling = index % 2 == 1;
            let sibling_index = if is_left_sibling { index - 1 } else { index + 1 };
            let sibling = level
                .get(sibling_index)
                .copied()
                .unwrap_or_else(|| level[index]);
            steps.push(PathStep {
                sibling,
                is_left_sibling,
            });
            index /= 2;
        }
        MerklePath(steps)
    }
}

/// Fold an authentication path starting from `leaf`, returning the
/// resulting root candidate. Verifiers compare this against the known root.
pub fn fold_path(leaf: [u8; 32], path: &MerklePath) -> [u8; 32] {
    let mut acc = leaf;
    for step in &path.0 {
        acc = if step.is_left_sibling {
            node_hash(&step.sibling, &acc)
        } else {
            node_hash(&acc, &step.sibling)
        };
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commitments(n: usize) -> Vec<Vec<u8>> {
        (0..n).map(|i| vec![i as u8; 33]).collect()
    }

    #[test]
    fn path_folds_to_root_for_every_leaf() {
        let tree = MerkleTree::build(3, &commitments(8));
        for i in 0..8 {
            let leaf = leaf_hash(&commitments(8)[i]);
            let path = tree.path(i);
            assert_eq!(fold_path(leaf, &path), tree.root());
        }
    }

    #[test]
    fn odd_leaf_count_duplicates_last() {
        let tree = MerkleTree::build(3, &commitments(5));
        let leaf = leaf_hash(&commitments(5)[4]);
        let path = tree.path(4);
        assert_eq!(fold_path(leaf, &path), tree.root());
    }

    #[test]
    fn tampered_root_rejects() {
        let tree = MerkleTree::build(3, &commitments(8));
        let leaf = leaf_hash(&commitments(8)[3]);
        let path = tree.path(3);
        let mut bad_root = tree.root();
        bad_root[31] ^= 0xFF;
        assert_ne!(fold_path(leaf, &path), bad_root);
    }

    #[test]
    fn left_right_order_is_not_sorted() {
        let mut a = leaf_hash(b"a");
        let mut b = leaf_hash(b"b");
        if a > b {
            std::mem::swap(&mut a, &mut b);
        }
        // node_hash(a, b) must differ from node_hash(b, a): fixed order, no sorting.
        assert_ne!(node_hash(&a, &b), node_hash(&b, &a));
    }
}
