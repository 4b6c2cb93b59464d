//! Transition engine.
//!
//! Every function here checks its preconditions against a snapshot of
//! [`EventState`] and returns a receipt describing the one write to perform,
//! or rejects. Nothing is written here; instruction handlers apply receipts.

use anchor_lang::prelude::*;

use crate::errors::TicketLedgerError;
use crate::merkle::WhitelistWitness;
use crate::state::{EventState, WhitelistAccount};

/// Arguments of the one-time event configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EventSettings {
    pub initial_commitment: [u8; 32],
    pub max_tickets: u32,
    pub max_tickets_per_account: u32,
    pub start_time: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClaimReceipt {
    pub account: WhitelistAccount,
    pub commitment: [u8; 32],
    pub tickets_claimed: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SendReceipt {
    pub from: WhitelistAccount,
    pub to: WhitelistAccount,
    pub commitment: [u8; 32],
}

impl EventState {
    pub fn apply_setup(&mut self, settings: &EventSettings, owner: Pubkey) {
        self.commitment = settings.initial_commitment;
        self.max_tickets = settings.max_tickets;
        self.max_tickets_per_account = settings.max_tickets_per_account;
        self.start_time = settings.start_time;
        self.owner = owner;
    }

    pub fn apply_claim(&mut self, receipt: &ClaimReceipt) {
        self.commitment = receipt.commitment;
        self.tickets_claimed = receipt.tickets_claimed;
    }

    pub fn apply_send(&mut self, receipt: &SendReceipt) {
        self.commitment = receipt.commitment;
    }
}

pub fn setup(state: &EventState, settings: &EventSettings, now: i64) -> Result<()> {
    require!(!state.is_initialized(), TicketLedgerError::AlreadyInitialized);
    require!(
        now < settings.start_time,
        TicketLedgerError::EventAlreadyStarted
    );
    Ok(())
}

pub fn claim(
    state: &EventState,
    account: &WhitelistAccount,
    path: &WhitelistWitness,
    caller: &Pubkey,
    now: i64,
) -> Result<ClaimReceipt> {
    require!(
        !state.has_started(now),
        TicketLedgerError::EventAlreadyStarted
    );
    require_keys_eq!(
        *caller,
        account.identity,
        TicketLedgerError::NotAccountOwner
    );
    require!(
        path.proves(&account.hash(), &state.commitment),
        TicketLedgerError::StaleOrInvalidWitness
    );
    require!(
        state.tickets_claimed < state.max_tickets,
        TicketLedgerError::GlobalCapExceeded
    );
    require!(
        account.total() < u64::from(state.max_tickets_per_account),
        TicketLedgerError::AccountCapExceeded
    );

    let account = account.add_ticket(1)?;
    let commitment = path
        .calculate_root(&account.hash())
        .ok_or(TicketLedgerError::StaleOrInvalidWitness)?;

    Ok(ClaimReceipt {
        account,
        commitment,
        tickets_claimed: state.tickets_claimed + 1,
    })
}

/// Moves one ticket from `from` to `to` in a single new root.
///
/// `to_path` must be taken from the tree in which the sender's leaf already
/// holds the updated account, so it is checked against the intermediate root
/// and never against the current commitment.
pub fn send(
    state: &EventState,
    from: &WhitelistAccount,
    from_path: &WhitelistWitness,
    to: &WhitelistAccount,
    to_path: &WhitelistWitness,
    caller: &Pubkey,
    now: i64,
) -> Result<SendReceipt> {
    require!(
        !state.has_started(now),
        TicketLedgerError::EventAlreadyStarted
    );
    require_keys_eq!(*caller, from.identity, TicketLedgerError::NotAccountOwner);
    require!(
        from_path.proves(&from.hash(), &state.commitment),
        TicketLedgerError::StaleOrInvalidWitness
    );
    require!(from.tickets >= 1, TicketLedgerError::InsufficientSenderTickets);
    // receivers are bounded on held tickets only, unlike claims
    require!(
        to.tickets < state.max_tickets_per_account,
        TicketLedgerError::ReceiverAtCapacity
    );

    let new_from = from.remove_ticket(1)?.add_transferred(1)?;
    let intermediate = from_path
        .calculate_root(&new_from.hash())
        .ok_or(TicketLedgerError::StaleOrInvalidWitness)?;
    require!(
        to_path.proves(&to.hash(), &intermediate),
        TicketLedgerError::ChainedWitnessMismatch
    );

    let new_to = to.add_ticket(1)?;
    let commitment = to_path
        .calculate_root(&new_to.hash())
        .ok_or(TicketLedgerError::ChainedWitnessMismatch)?;

    Ok(SendReceipt {
        from: new_from,
        to: new_to,
        commitment,
    })
}

/// Door check: `account` is the committed value of its leaf and holds a ticket.
pub fn verify(
    state: &EventState,
    account: &WhitelistAccount,
    path: &WhitelistWitness,
) -> Result<()> {
    require!(
        path.proves(&account.hash(), &state.commitment),
        TicketLedgerError::StaleOrInvalidWitness
    );
    require!(account.tickets >= 1, TicketLedgerError::TicketNotHeld);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::whitelist::{MemoryWhitelist, WhitelistStore};

    const NOW: i64 = 1_700_000_000;
    const DAY: i64 = 86_400;

    fn key(n: u8) -> Pubkey {
        Pubkey::new_from_array([n; 32])
    }

    struct Fixture {
        state: EventState,
        store: MemoryWhitelist,
    }

    /// Four whitelisted accounts at indices 0..4, event set up by `key(100)`.
    fn fixture(max_tickets: u32, max_tickets_per_account: u32) -> Fixture {
        let mut store = MemoryWhitelist::new();
        for index in 0..4u8 {
            store
                .set_account(u32::from(index), WhitelistAccount::new(key(index + 1)))
                .unwrap();
        }

        let mut state = EventState::deployed(key(99), 0, 255);
        let settings = EventSettings {
            initial_commitment: store.root(),
            max_tickets,
            max_tickets_per_account,
            start_time: NOW + DAY,
        };
        setup(&state, &settings, NOW).unwrap();
        state.apply_setup(&settings, key(100));

        Fixture { state, store }
    }

    impl Fixture {
        fn account(&self, index: u32) -> WhitelistAccount {
            self.store.leaf_account(index).unwrap()
        }

        fn claim(&mut self, index: u32) -> Result<ClaimReceipt> {
            let account = self.account(index);
            let path = self.store.witness(index)?;
            let receipt = claim(&self.state, &account, &path, &account.identity, NOW)?;
            self.state.apply_claim(&receipt);
            self.store.record_claim(index, &receipt)?;
            Ok(receipt)
        }

        fn send(&mut self, from_index: u32, to_index: u32) -> Result<SendReceipt> {
            let from = self.account(from_index);
            let to = self.account(to_index);
            let (from_path, to_path) = self.store.send_witnesses(from_index, to_index)?;
            let receipt = send(
                &self.state,
                &from,
                &from_path,
                &to,
                &to_path,
                &from.identity,
                NOW,
            )?;
            self.state.apply_send(&receipt);
            self.store.record_send(from_index, to_index, &receipt)?;
            Ok(receipt)
        }

        fn ticket_sums(&self) -> (u64, u64) {
            (0..4).map(|i| self.account(i)).fold((0, 0), |(t, x), a| {
                (t + u64::from(a.tickets), x + u64::from(a.transferred))
            })
        }
    }

    #[test]
    fn test_setup_exactly_once() {
        let fx = fixture(100, 2);
        assert_eq!(fx.state.owner(), key(100));
        assert_eq!(fx.state.commitment(), fx.store.root());
        assert_eq!(fx.state.max_tickets(), 100);
        assert_eq!(fx.state.max_tickets_per_account(), 2);
        assert_eq!(fx.state.start_time(), NOW + DAY);
        assert_eq!(fx.state.tickets_claimed(), 0);

        let again = EventSettings {
            initial_commitment: [3u8; 32],
            max_tickets: 1,
            max_tickets_per_account: 1,
            start_time: NOW + 2 * DAY,
        };
        assert_eq!(
            setup(&fx.state, &again, NOW).unwrap_err(),
            TicketLedgerError::AlreadyInitialized.into()
        );
        // even a setup that would also fail the time check reports the owner first
        assert_eq!(
            setup(&fx.state, &again, NOW + 3 * DAY).unwrap_err(),
            TicketLedgerError::AlreadyInitialized.into()
        );
    }

    #[test]
    fn test_setup_requires_future_start() {
        let state = EventState::deployed(key(99), 0, 255);
        let settings = EventSettings {
            initial_commitment: [0u8; 32],
            max_tickets: 10,
            max_tickets_per_account: 1,
            start_time: NOW,
        };
        assert_eq!(
            setup(&state, &settings, NOW).unwrap_err(),
            TicketLedgerError::EventAlreadyStarted.into()
        );
        assert!(!state.is_initialized());
    }

    #[test]
    fn test_claim_send_scenario() {
        let mut fx = fixture(100, 2);

        let claimed = fx.claim(0).unwrap();
        assert_eq!((claimed.account.tickets, claimed.account.transferred), (1, 0));
        assert_eq!(fx.state.tickets_claimed(), 1);
        assert_eq!(fx.state.commitment(), fx.store.root());

        let sent = fx.send(0, 1).unwrap();
        assert_eq!((sent.from.tickets, sent.from.transferred), (0, 1));
        assert_eq!((sent.to.tickets, sent.to.transferred), (1, 0));
        assert_eq!(fx.state.tickets_claimed(), 1);
        assert_eq!(fx.state.commitment(), fx.store.root());
        assert_eq!(fx.ticket_sums().0, 1);

        // A holds (1, 1) after a second claim, which fills its cap of 2
        let again = fx.claim(0).unwrap();
        assert_eq!((again.account.tickets, again.account.transferred), (1, 1));
        assert_eq!(
            fx.claim(0).unwrap_err(),
            TicketLedgerError::AccountCapExceeded.into()
        );
        assert_eq!(fx.state.tickets_claimed(), 2);
        assert_eq!(fx.state.commitment(), fx.store.root());
    }

    #[test]
    fn test_send_conserves_tickets() {
        let mut fx = fixture(100, 3);
        fx.claim(0).unwrap();
        fx.claim(0).unwrap();
        fx.claim(2).unwrap();

        let (tickets, transferred) = fx.ticket_sums();
        let claimed = fx.state.tickets_claimed();
        fx.send(0, 3).unwrap();
        assert_eq!(fx.ticket_sums(), (tickets, transferred + 1));
        fx.send(2, 0).unwrap();
        assert_eq!(fx.ticket_sums(), (tickets, transferred + 2));
        assert_eq!(fx.state.tickets_claimed(), claimed);
        assert_eq!(fx.state.commitment(), fx.store.root());
    }

    #[test]
    fn test_claim_rejections() {
        let mut fx = fixture(100, 2);
        let account = fx.account(0);
        let path = fx.store.witness(0).unwrap();

        assert_eq!(
            claim(&fx.state, &account, &path, &account.identity, NOW + DAY).unwrap_err(),
            TicketLedgerError::EventAlreadyStarted.into()
        );
        assert_eq!(
            claim(&fx.state, &account, &path, &key(2), NOW).unwrap_err(),
            TicketLedgerError::NotAccountOwner.into()
        );

        let forged = WhitelistAccount {
            transferred: 0,
            tickets: 0,
            identity: key(42),
        };
        assert_eq!(
            claim(&fx.state, &forged, &path, &forged.identity, NOW).unwrap_err(),
            TicketLedgerError::StaleOrInvalidWitness.into()
        );

        // the witness of another slot does not authenticate this account
        let other_path = fx.store.witness(1).unwrap();
        assert_eq!(
            claim(&fx.state, &account, &other_path, &account.identity, NOW).unwrap_err(),
            TicketLedgerError::StaleOrInvalidWitness.into()
        );

        fx.claim(0).unwrap();
        fx.claim(0).unwrap();
        assert_eq!(
            fx.claim(0).unwrap_err(),
            TicketLedgerError::AccountCapExceeded.into()
        );
    }

    #[test]
    fn test_claim_global_cap() {
        let mut fx = fixture(2, 2);
        fx.claim(0).unwrap();
        fx.claim(1).unwrap();

        let before = fx.state.clone();
        assert_eq!(
            fx.claim(2).unwrap_err(),
            TicketLedgerError::GlobalCapExceeded.into()
        );
        assert_eq!(fx.state, before);
        assert_eq!(fx.state.tickets_claimed(), fx.state.max_tickets());
    }

    #[test]
    fn test_stale_witness_rejected_repeatedly() {
        let mut fx = fixture(100, 2);
        let account = fx.account(0);
        let stale = fx.store.witness(0).unwrap();
        fx.claim(1).unwrap();

        for _ in 0..2 {
            assert_eq!(
                claim(&fx.state, &account, &stale, &account.identity, NOW).unwrap_err(),
                TicketLedgerError::StaleOrInvalidWitness.into()
            );
        }
    }

    #[test]
    fn test_send_rejections() {
        let mut fx = fixture(100, 2);
        fx.claim(0).unwrap();
        let from = fx.account(0);
        let to = fx.account(1);
        let (from_path, to_path) = fx.store.send_witnesses(0, 1).unwrap();

        let attempt = |now: i64, caller: &Pubkey| {
            send(&fx.state, &from, &from_path, &to, &to_path, caller, now)
        };
        assert_eq!(
            attempt(NOW + DAY, &from.identity).unwrap_err(),
            TicketLedgerError::EventAlreadyStarted.into()
        );
        assert_eq!(
            attempt(NOW, &to.identity).unwrap_err(),
            TicketLedgerError::NotAccountOwner.into()
        );

        // a receiver witness taken from the current tree is not chained
        let unchained = fx.store.witness(1).unwrap();
        assert_eq!(
            send(&fx.state, &from, &from_path, &to, &unchained, &from.identity, NOW)
                .unwrap_err(),
            TicketLedgerError::ChainedWitnessMismatch.into()
        );

        let stale_from = WhitelistAccount::new(from.identity);
        assert_eq!(
            send(&fx.state, &stale_from, &from_path, &to, &to_path, &from.identity, NOW)
                .unwrap_err(),
            TicketLedgerError::StaleOrInvalidWitness.into()
        );

        // an account with nothing to give
        let empty_path = fx.store.witness(1).unwrap();
        let carol_path = fx.store.witness(2).unwrap();
        let carol = fx.account(2);
        assert_eq!(
            send(&fx.state, &to, &empty_path, &carol, &carol_path, &to.identity, NOW)
                .unwrap_err(),
            TicketLedgerError::InsufficientSenderTickets.into()
        );
    }

    #[test]
    fn test_receiver_cap_counts_held_tickets_only() {
        let mut fx = fixture(100, 2);
        fx.claim(0).unwrap();
        fx.claim(0).unwrap();
        fx.claim(1).unwrap();
        fx.claim(1).unwrap();

        // B gives both tickets away: (0, 2), already at the claim cap
        fx.send(1, 2).unwrap();
        fx.send(1, 2).unwrap();
        let b = fx.account(1);
        assert_eq!((b.tickets, b.transferred), (0, 2));
        assert_eq!(
            fx.claim(1).unwrap_err(),
            TicketLedgerError::AccountCapExceeded.into()
        );

        // sends only bound held tickets, so B can still receive
        fx.send(0, 1).unwrap();
        let b = fx.account(1);
        assert_eq!((b.tickets, b.transferred), (1, 2));
        assert!(b.total() > u64::from(fx.state.max_tickets_per_account()));

        // C holds 2 and is full for sends
        assert_eq!(
            fx.send(0, 2).unwrap_err(),
            TicketLedgerError::ReceiverAtCapacity.into()
        );
        assert_eq!(fx.state.commitment(), fx.store.root());
    }

    #[test]
    fn test_send_to_self_chains_through_same_leaf() {
        let mut fx = fixture(100, 2);
        fx.claim(0).unwrap();
        let (tickets, transferred) = fx.ticket_sums();

        let from = fx.account(0);
        let (from_path, to_path) = fx.store.send_witnesses(0, 0).unwrap();
        assert_eq!(from_path, to_path);

        // the receiver is the sender's post-send value at the same slot
        let to = from.remove_ticket(1).unwrap().add_transferred(1).unwrap();
        let receipt = send(
            &fx.state,
            &from,
            &from_path,
            &to,
            &to_path,
            &from.identity,
            NOW,
        )
        .unwrap();
        assert_eq!((receipt.to.tickets, receipt.to.transferred), (1, 1));

        fx.state.apply_send(&receipt);
        fx.store.record_send(0, 0, &receipt).unwrap();
        assert_eq!(fx.state.commitment(), fx.store.root());
        assert_eq!(fx.ticket_sums(), (tickets, transferred + 1));

        // the pre-send value is not what the chained root holds
        let (from_path, to_path) = fx.store.send_witnesses(0, 0).unwrap();
        let from = fx.account(0);
        assert_eq!(
            send(&fx.state, &from, &from_path, &from, &to_path, &from.identity, NOW)
                .unwrap_err(),
            TicketLedgerError::ChainedWitnessMismatch.into()
        );
    }

    #[test]
    fn test_verify_ticket() {
        let mut fx = fixture(100, 2);
        let path = fx.store.witness(0).unwrap();
        assert_eq!(
            verify(&fx.state, &fx.account(0), &path).unwrap_err(),
            TicketLedgerError::TicketNotHeld.into()
        );

        fx.claim(0).unwrap();
        let path = fx.store.witness(0).unwrap();
        verify(&fx.state, &fx.account(0), &path).unwrap();

        let inflated = WhitelistAccount {
            tickets: 2,
            ..fx.account(0)
        };
        assert_eq!(
            verify(&fx.state, &inflated, &path).unwrap_err(),
            TicketLedgerError::StaleOrInvalidWitness.into()
        );
    }
}
