use anchor_lang::prelude::*;

/// Every way a transition can be rejected. A rejected transition has no effect.
#[error_code]
pub enum TicketLedgerError {
    #[msg("Event has already been set up")]
    AlreadyInitialized,

    #[msg("Event has already started")]
    EventAlreadyStarted,

    #[msg("Signer does not own this whitelist account")]
    NotAccountOwner,

    #[msg("Account does not match the committed whitelist root")]
    StaleOrInvalidWitness,

    #[msg("All tickets for this event have been claimed")]
    GlobalCapExceeded,

    #[msg("Account already holds the maximum number of tickets")]
    AccountCapExceeded,

    #[msg("Sender has no ticket to send")]
    InsufficientSenderTickets,

    #[msg("Receiver already holds the maximum number of tickets")]
    ReceiverAtCapacity,

    #[msg("Receiver witness does not match the root after the sender update")]
    ChainedWitnessMismatch,

    #[msg("Ticket count overflow")]
    TicketCountOverflow,

    #[msg("Account holds no ticket")]
    TicketNotHeld,

    #[msg("Leaf index is outside the whitelist tree")]
    LeafIndexOutOfRange,
}
