use anchor_lang::prelude::*;
use anchor_lang::solana_program::hash::hashv;

use crate::constants::*;

/// Hash of an interior node: sha256(0x01 || left || right)
pub fn hash_pair(left: &[u8; 32], right: &[u8; 32]) -> [u8; 32] {
    hashv(&[[NODE_DOMAIN].as_ref(), left.as_ref(), right.as_ref()]).to_bytes()
}

/// Roots of all-empty subtrees, indexed by subtree height.
/// `roots[0]` is the empty leaf and `roots[depth]` the root of an empty tree.
pub fn empty_subtree_roots(depth: usize) -> Vec<[u8; 32]> {
    let mut roots = Vec::with_capacity(depth + 1);
    roots.push(EMPTY_LEAF);
    for level in 0..depth {
        let below = roots[level];
        roots.push(hash_pair(&below, &below));
    }
    roots
}

/// Authentication path from one whitelist leaf to the root.
///
/// `siblings` is ordered leaf to root. Bit `i` of `leaf_index` gives the
/// position of the running node at level `i`: 0 means it is the left child.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct WhitelistWitness {
    pub leaf_index: u32,
    pub siblings: Vec<[u8; 32]>,
}

impl WhitelistWitness {
    pub fn new(leaf_index: u32, siblings: Vec<[u8; 32]>) -> Self {
        Self {
            leaf_index,
            siblings,
        }
    }

    /// Root of the tree that holds `leaf` at this witness' position, or `None`
    /// if the witness does not describe a leaf of the whitelist tree.
    pub fn calculate_root(&self, leaf: &[u8; 32]) -> Option<[u8; 32]> {
        if self.siblings.len() != WHITELIST_TREE_DEPTH {
            return None;
        }
        if u64::from(self.leaf_index) >> WHITELIST_TREE_DEPTH != 0 {
            return None;
        }

        let mut current = *leaf;
        for (level, sibling) in self.siblings.iter().enumerate() {
            current = if (self.leaf_index >> level) & 1 == 0 {
                hash_pair(&current, sibling)
            } else {
                hash_pair(sibling, &current)
            };
        }
        Some(current)
    }

    /// True if `leaf` sits at this position in the tree committed to by `root`.
    pub fn proves(&self, leaf: &[u8; 32], root: &[u8; 32]) -> bool {
        self.calculate_root(leaf).as_ref() == Some(root)
    }
}
