pub const EVENT_SEED: &[u8] = b"event";

/// Levels between a whitelist leaf and the root (2^8 = 256 whitelist slots).
pub const WHITELIST_TREE_DEPTH: usize = 8;

/// Value of a whitelist slot that has no account assigned.
pub const EMPTY_LEAF: [u8; 32] = [0u8; 32];

pub const LEAF_DOMAIN: u8 = 0x00;
pub const NODE_DOMAIN: u8 = 0x01;
