use anchor_lang::prelude::*;

use crate::constants::*;
use crate::events::EventDeployed;
use crate::state::EventState;

#[derive(Accounts)]
#[instruction(event_id: u64)]
pub struct DeployEvent<'info> {
    #[account(mut)]
    pub deployer: Signer<'info>,

    #[account(
        init,
        payer = deployer,
        space = 8 + EventState::INIT_SPACE,
        seeds = [EVENT_SEED, deployer.key().as_ref(), event_id.to_le_bytes().as_ref()],
        bump
    )]
    pub event_state: Account<'info, EventState>,

    pub system_program: Program<'info, System>,
}

/// Creates the empty event record: zero commitment, no owner, no limits.
pub fn deploy_event(ctx: Context<DeployEvent>, event_id: u64) -> Result<()> {
    let deployer = ctx.accounts.deployer.key();
    let event_state = &mut ctx.accounts.event_state;
    event_state.set_inner(EventState::deployed(
        deployer,
        event_id,
        ctx.bumps.event_state,
    ));

    msg!("Event {} deployed by {}", event_id, deployer);

    emit!(EventDeployed {
        event_state: event_state.key(),
        deployer,
        event_id,
    });

    Ok(())
}
