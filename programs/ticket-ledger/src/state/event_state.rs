use anchor_lang::prelude::*;

/// On-chain record of one event. `commitment` is the whitelist root the
/// off-chain store must reproduce after each accepted transition.
#[account]
#[derive(InitSpace, Debug, PartialEq, Eq)]
pub struct EventState {
    pub deployer: Pubkey,
    /// Distinguishes events created by the same deployer
    pub event_id: u64,
    /// `Pubkey::default()` until the event has been set up
    pub owner: Pubkey,
    pub commitment: [u8; 32],
    /// Tickets issued through claims; sends do not change it
    pub tickets_claimed: u32,
    pub max_tickets: u32,
    pub max_tickets_per_account: u32,
    /// Unix timestamp at which claims and sends close
    pub start_time: i64,
    pub bump: u8,
}

impl EventState {
    pub fn deployed(deployer: Pubkey, event_id: u64, bump: u8) -> Self {
        Self {
            deployer,
            event_id,
            owner: Pubkey::default(),
            commitment: [0u8; 32],
            tickets_claimed: 0,
            max_tickets: 0,
            max_tickets_per_account: 0,
            start_time: 0,
            bump,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.owner != Pubkey::default()
    }

    pub fn has_started(&self, now: i64) -> bool {
        now >= self.start_time
    }

    pub fn commitment(&self) -> [u8; 32] {
        self.commitment
    }

    pub fn tickets_claimed(&self) -> u32 {
        self.tickets_claimed
    }

    pub fn max_tickets(&self) -> u32 {
        self.max_tickets
    }

    pub fn max_tickets_per_account(&self) -> u32 {
        self.max_tickets_per_account
    }

    pub fn owner(&self) -> Pubkey {
        self.owner
    }

    pub fn start_time(&self) -> i64 {
        self.start_time
    }
}
