//! Off-chain whitelist store.
//!
//! The store is the authoritative copy of every whitelisted account and of the
//! tree built over their hashes. The program only keeps the root, so after
//! each accepted transition the caller must write the receipt back here with
//! [`MemoryWhitelist::record_claim`] or [`MemoryWhitelist::record_send`].
//! Skipping that leaves the store on an old root, and the next witness it
//! hands out is rejected as stale.

use std::collections::{BTreeMap, HashMap};

use anchor_lang::prelude::*;

use crate::constants::WHITELIST_TREE_DEPTH;
use crate::errors::TicketLedgerError;
use crate::ledger::{ClaimReceipt, SendReceipt};
use crate::merkle::{empty_subtree_roots, hash_pair, WhitelistWitness};
use crate::state::WhitelistAccount;

pub trait WhitelistStore {
    fn leaf_account(&self, index: u32) -> Option<WhitelistAccount>;

    fn witness(&self, index: u32) -> Result<WhitelistWitness>;

    /// Overwrites the leaf at `index`. No history is kept.
    fn set_leaf(&mut self, index: u32, leaf: [u8; 32]) -> Result<()>;

    fn root(&self) -> [u8; 32];
}

/// Sparse in-memory tree. Only nodes that differ from an empty subtree are stored.
#[derive(Clone, Debug)]
pub struct MemoryWhitelist {
    accounts: BTreeMap<u32, WhitelistAccount>,
    /// `nodes[0]` holds leaves and `nodes[WHITELIST_TREE_DEPTH]` the root
    nodes: Vec<HashMap<u32, [u8; 32]>>,
    empty: Vec<[u8; 32]>,
}

impl Default for MemoryWhitelist {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryWhitelist {
    pub fn new() -> Self {
        Self {
            accounts: BTreeMap::new(),
            nodes: vec![HashMap::new(); WHITELIST_TREE_DEPTH + 1],
            empty: empty_subtree_roots(WHITELIST_TREE_DEPTH),
        }
    }

    /// Builds a whitelist with `identities[i]` at slot `i`, each holding no tickets.
    pub fn from_identities(identities: &[Pubkey]) -> Result<Self> {
        let mut whitelist = Self::new();
        for (index, identity) in identities.iter().enumerate() {
            let index =
                u32::try_from(index).map_err(|_| TicketLedgerError::LeafIndexOutOfRange)?;
            whitelist.set_account(index, WhitelistAccount::new(*identity))?;
        }
        Ok(whitelist)
    }

    pub fn capacity() -> u64 {
        1u64 << WHITELIST_TREE_DEPTH
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Slot holding `identity`, for callers that know a claimant by key only.
    pub fn index_of(&self, identity: &Pubkey) -> Option<u32> {
        self.accounts
            .iter()
            .find(|(_, account)| account.identity == *identity)
            .map(|(index, _)| *index)
    }

    /// Stores `account` at `index` and writes its hash to the tree.
    pub fn set_account(&mut self, index: u32, account: WhitelistAccount) -> Result<()> {
        self.set_leaf(index, account.hash())?;
        self.accounts.insert(index, account);
        Ok(())
    }

    /// Witnesses for a send from `from_index` to `to_index`.
    ///
    /// The receiver's witness is taken from the tree as it will look once the
    /// sender's leaf holds its post-send value, which is what the program
    /// checks it against. The store itself is left untouched.
    pub fn send_witnesses(
        &self,
        from_index: u32,
        to_index: u32,
    ) -> Result<(WhitelistWitness, WhitelistWitness)> {
        let from = self
            .leaf_account(from_index)
            .ok_or(TicketLedgerError::StaleOrInvalidWitness)?;
        let from_witness = self.witness(from_index)?;

        let new_from = from.remove_ticket(1)?.add_transferred(1)?;
        let mut predicted = self.clone();
        predicted.set_leaf(from_index, new_from.hash())?;
        let to_witness = predicted.witness(to_index)?;

        Ok((from_witness, to_witness))
    }

    pub fn record_claim(&mut self, index: u32, receipt: &ClaimReceipt) -> Result<()> {
        self.set_account(index, receipt.account)
    }

    pub fn record_send(
        &mut self,
        from_index: u32,
        to_index: u32,
        receipt: &SendReceipt,
    ) -> Result<()> {
        self.set_account(from_index, receipt.from)?;
        self.set_account(to_index, receipt.to)
    }

    fn node(&self, level: usize, index: u32) -> [u8; 32] {
        self.nodes[level]
            .get(&index)
            .copied()
            .unwrap_or(self.empty[level])
    }

    fn check_index(index: u32) -> Result<()> {
        require!(
            u64::from(index) < Self::capacity(),
            TicketLedgerError::LeafIndexOutOfRange
        );
        Ok(())
    }
}

impl WhitelistStore for MemoryWhitelist {
    fn leaf_account(&self, index: u32) -> Option<WhitelistAccount> {
        self.accounts.get(&index).copied()
    }

    fn witness(&self, index: u32) -> Result<WhitelistWitness> {
        Self::check_index(index)?;
        let siblings = (0..WHITELIST_TREE_DEPTH)
            .map(|level| self.node(level, (index >> level) ^ 1))
            .collect();
        Ok(WhitelistWitness::new(index, siblings))
    }

    fn set_leaf(&mut self, index: u32, leaf: [u8; 32]) -> Result<()> {
        Self::check_index(index)?;

        let mut position = index;
        let mut current = leaf;
        for level in 0..=WHITELIST_TREE_DEPTH {
            if current == self.empty[level] {
                self.nodes[level].remove(&position);
            } else {
                self.nodes[level].insert(position, current);
            }
            if level == WHITELIST_TREE_DEPTH {
                break;
            }

            let sibling = self.node(level, position ^ 1);
            current = if position & 1 == 0 {
                hash_pair(&current, &sibling)
            } else {
                hash_pair(&sibling, &current)
            };
            position >>= 1;
        }
        Ok(())
    }

    fn root(&self) -> [u8; 32] {
        self.node(WHITELIST_TREE_DEPTH, 0)
    }
}
