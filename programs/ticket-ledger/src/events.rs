use anchor_lang::prelude::*;

use crate::state::WhitelistAccount;

#[event]
pub struct EventDeployed {
    pub event_state: Pubkey,
    pub deployer: Pubkey,
    pub event_id: u64,
}

#[event]
pub struct EventSetUp {
    pub event_state: Pubkey,
    pub owner: Pubkey,
    pub commitment: [u8; 32],
    pub max_tickets: u32,
    pub max_tickets_per_account: u32,
    pub start_time: i64,
}

/// Carries the new leaf so indexers can replay it into their whitelist copy.
#[event]
pub struct TicketClaimed {
    pub event_state: Pubkey,
    pub leaf_index: u32,
    pub account: WhitelistAccount,
    pub commitment: [u8; 32],
    pub tickets_claimed: u32,
}

#[event]
pub struct TicketSent {
    pub event_state: Pubkey,
    pub from_index: u32,
    pub from: WhitelistAccount,
    pub to_index: u32,
    pub to: WhitelistAccount,
    pub commitment: [u8; 32],
}

#[event]
pub struct TicketVerified {
    pub event_state: Pubkey,
    pub identity: Pubkey,
    pub tickets: u32,
}
