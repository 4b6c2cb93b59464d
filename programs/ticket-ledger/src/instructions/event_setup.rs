use anchor_lang::prelude::*;

use crate::constants::*;
use crate::events::EventSetUp;
use crate::ledger::{self, EventSettings};
use crate::state::EventState;

#[derive(Accounts)]
pub struct SetupEvent<'info> {
    /// Becomes the event owner
    pub owner: Signer<'info>,

    /// Co-signs so that nobody else can configure a freshly deployed event
    pub deployer: Signer<'info>,

    #[account(
        mut,
        seeds = [
            EVENT_SEED,
            event_state.deployer.as_ref(),
            event_state.event_id.to_le_bytes().as_ref(),
        ],
        bump = event_state.bump,
        has_one = deployer,
    )]
    pub event_state: Account<'info, EventState>,
}

/// One-time configuration, authorized by the deployer. Fails once an owner
/// has been recorded.
pub fn setup_event(ctx: Context<SetupEvent>, settings: EventSettings) -> Result<()> {
    let clock = Clock::get()?;
    let owner = ctx.accounts.owner.key();
    let event_state = &mut ctx.accounts.event_state;

    ledger::setup(event_state, &settings, clock.unix_timestamp)?;
    event_state.apply_setup(&settings, owner);

    msg!(
        "Event set up: max_tickets={}, max_per_account={}, start_time={}",
        settings.max_tickets,
        settings.max_tickets_per_account,
        settings.start_time
    );

    emit!(EventSetUp {
        event_state: event_state.key(),
        owner,
        commitment: settings.initial_commitment,
        max_tickets: settings.max_tickets,
        max_tickets_per_account: settings.max_tickets_per_account,
        start_time: settings.start_time,
    });

    Ok(())
}
