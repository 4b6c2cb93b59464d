//! State account and value type definitions

pub mod account;
pub mod event_state;

pub use account::*;
pub use event_state::*;
