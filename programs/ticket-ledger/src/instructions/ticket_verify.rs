use anchor_lang::prelude::*;

use crate::constants::*;
use crate::events::TicketVerified;
use crate::ledger;
use crate::merkle::WhitelistWitness;
use crate::state::{EventState, WhitelistAccount};

#[derive(Accounts)]
pub struct VerifyTicket<'info> {
    #[account(
        seeds = [
            EVENT_SEED,
            event_state.deployer.as_ref(),
            event_state.event_id.to_le_bytes().as_ref(),
        ],
        bump = event_state.bump,
    )]
    pub event_state: Account<'info, EventState>,
}

/// Admission check. Succeeds only if `account` is committed and holds a ticket.
pub fn verify_ticket(
    ctx: Context<VerifyTicket>,
    account: WhitelistAccount,
    path: WhitelistWitness,
) -> Result<()> {
    let event_state = &ctx.accounts.event_state;

    ledger::verify(event_state, &account, &path)?;

    emit!(TicketVerified {
        event_state: event_state.key(),
        identity: account.identity,
        tickets: account.tickets,
    });

    Ok(())
}
