use anchor_lang::prelude::*;
use anchor_lang::solana_program::hash::hashv;

use crate::constants::LEAF_DOMAIN;
use crate::errors::TicketLedgerError;

/// Ticket holdings of one whitelisted identity.
///
/// Values are never mutated in place: every adjustment returns a new account,
/// and the caller is responsible for writing its hash back to the whitelist
/// tree once the transition has been accepted.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WhitelistAccount {
    pub identity: Pubkey,
    /// Tickets claimed directly or received by transfer and still held
    pub tickets: u32,
    /// Tickets this account has sent away
    pub transferred: u32,
}

impl WhitelistAccount {
    pub fn new(identity: Pubkey) -> Self {
        Self {
            identity,
            tickets: 0,
            transferred: 0,
        }
    }

    /// Leaf value: sha256(0x00 || identity || tickets_le || transferred_le)
    pub fn hash(&self) -> [u8; 32] {
        hashv(&[
            [LEAF_DOMAIN].as_ref(),
            self.identity.as_ref(),
            &self.tickets.to_le_bytes(),
            &self.transferred.to_le_bytes(),
        ])
        .to_bytes()
    }

    /// `tickets + transferred`, the quantity bounded by the per-account cap on claim.
    pub fn total(&self) -> u64 {
        u64::from(self.tickets) + u64::from(self.transferred)
    }

    pub fn add_ticket(&self, n: u32) -> Result<Self> {
        let tickets = self
            .tickets
            .checked_add(n)
            .ok_or(TicketLedgerError::TicketCountOverflow)?;
        Ok(Self { tickets, ..*self })
    }

    pub fn add_transferred(&self, n: u32) -> Result<Self> {
        let transferred = self
            .transferred
            .checked_add(n)
            .ok_or(TicketLedgerError::TicketCountOverflow)?;
        Ok(Self {
            transferred,
            ..*self
        })
    }

    pub fn remove_ticket(&self, n: u32) -> Result<Self> {
        require!(
            self.tickets >= n,
            TicketLedgerError::InsufficientSenderTickets
        );
        Ok(Self {
            tickets: self.tickets - n,
            ..*self
        })
    }
}
