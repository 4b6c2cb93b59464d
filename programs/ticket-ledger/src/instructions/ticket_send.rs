use anchor_lang::prelude::*;

use crate::constants::*;
use crate::events::TicketSent;
use crate::ledger;
use crate::merkle::WhitelistWitness;
use crate::state::{EventState, WhitelistAccount};

#[derive(Accounts)]
pub struct SendTicket<'info> {
    /// Must be the identity of the sending whitelist account
    pub sender: Signer<'info>,

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

/// Send one held ticket to another whitelisted account.
///
/// # Arguments
/// * `from` / `from_path` - Sender's current leaf and its witness against the current root
/// * `to` / `to_path` - Receiver's current leaf and its witness against the root
///   after the sender's leaf has been updated
pub fn send_ticket(
    ctx: Context<SendTicket>,
    from: WhitelistAccount,
    from_path: WhitelistWitness,
    to: WhitelistAccount,
    to_path: WhitelistWitness,
) -> Result<()> {
    let clock = Clock::get()?;
    let sender = ctx.accounts.sender.key();
    let event_state = &mut ctx.accounts.event_state;

    msg!(
        "Sending ticket from leaf {} to leaf {}",
        from_path.leaf_index,
        to_path.leaf_index
    );

    let receipt = ledger::send(
        event_state,
        &from,
        &from_path,
        &to,
        &to_path,
        &sender,
        clock.unix_timestamp,
    )?;
    event_state.apply_send(&receipt);

    emit!(TicketSent {
        event_state: event_state.key(),
        from_index: from_path.leaf_index,
        from: receipt.from,
        to_index: to_path.leaf_index,
        to: receipt.to,
        commitment: receipt.commitment,
    });

    Ok(())
}
