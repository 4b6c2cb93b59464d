use anchor_lang::prelude::*;

use crate::constants::*;
use crate::events::TicketClaimed;
use crate::ledger;
use crate::merkle::WhitelistWitness;
use crate::state::{EventState, WhitelistAccount};

#[derive(Accounts)]
pub struct ClaimTicket<'info> {
    /// Must be the identity of the claimed whitelist account
    pub claimant: Signer<'info>,

    #[account(
        mut,
        seeds = [
            EVENT_SEED,
            event_state.deployer.as_ref(),
            event_state.event_id.to_le_bytes().as_ref(),
        ],
        bump = event_state.bump,
    )]
    pub event_state: Account<'info, EventState>,
}

/// Issue one ticket from the event pool to a whitelisted account.
///
/// `account` must be the value the whitelist currently holds at
/// `path.leaf_index`. On success the caller writes the `TicketClaimed`
/// account back to that leaf.
pub fn claim_ticket(
    ctx: Context<ClaimTicket>,
    account: WhitelistAccount,
    path: WhitelistWitness,
) -> Result<()> {
    let clock = Clock::get()?;
    let claimant = ctx.accounts.claimant.key();
    let event_state = &mut ctx.accounts.event_state;

    msg!("Claiming ticket at leaf {}", path.leaf_index);

    let receipt = ledger::claim(
        event_state,
        &account,
        &path,
        &claimant,
        clock.unix_timestamp,
    )?;
    event_state.apply_claim(&receipt);

    msg!(
        "Ticket claimed: {}/{}",
        event_state.tickets_claimed,
        event_state.max_tickets
    );

    emit!(TicketClaimed {
        event_state: event_state.key(),
        leaf_index: path.leaf_index,
        account: receipt.account,
        commitment: receipt.commitment,
        tickets_claimed: receipt.tickets_claimed,
    });

    Ok(())
}
