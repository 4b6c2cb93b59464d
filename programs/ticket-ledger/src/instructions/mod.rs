pub mod event_deploy;
pub mod event_setup;
pub mod ticket_claim;
pub mod ticket_send;
pub mod ticket_verify;

pub use event_deploy::*;
pub use event_setup::*;
pub use ticket_claim::*;
pub use ticket_send::*;
pub use ticket_verify::*;
