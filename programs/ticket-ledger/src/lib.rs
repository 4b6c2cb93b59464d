use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod ledger;
pub mod merkle;
pub mod state;
#[cfg(not(target_os = "solana"))]
pub mod whitelist;

pub use instructions::*;
use ledger::EventSettings;
use merkle::WhitelistWitness;
use state::WhitelistAccount;

declare_id!("9gsnG1HDFuvjmRvijiuETSy7JxUrE7Sk15LJDqP1pxES");

#[program]
pub mod ticket_ledger {
    use super::*;

    pub fn deploy_event(ctx: Context<DeployEvent>, event_id: u64) -> Result<()> {
        instructions::deploy_event(ctx, event_id)
    }

    pub fn setup_event(
        ctx: Context<SetupEvent>,
        initial_commitment: [u8; 32],
        max_tickets: u32,
        max_tickets_per_account: u32,
        start_time: i64,
    ) -> Result<()> {
        instructions::setup_event(
            ctx,
            EventSettings {
                initial_commitment,
                max_tickets,
                max_tickets_per_account,
                start_time,
            },
        )
    }

    pub fn claim_ticket(
        ctx: Context<ClaimTicket>,
        account: WhitelistAccount,
        path: WhitelistWitness,
    ) -> Result<()> {
        instructions::claim_ticket(ctx, account, path)
    }

    pub fn send_ticket(
        ctx: Context<SendTicket>,
        from: WhitelistAccount,
        from_path: WhitelistWitness,
        to: WhitelistAccount,
        to_path: WhitelistWitness,
    ) -> Result<()> {
        instructions::send_ticket(ctx, from, from_path, to, to_path)
    }

    pub fn verify_ticket(
        ctx: Context<VerifyTicket>,
        account: WhitelistAccount,
        path: WhitelistWitness,
    ) -> Result<()> {
        instructions::verify_ticket(ctx, account, path)
    }
}
