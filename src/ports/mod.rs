//! Port traits. API boundaries for the hexagon.
//!
//! - Inbound: called by the front-end into the application
//! - Outbound: called by the application into the remote API

pub mod inbound;
pub mod outbound;

pub use inbound::InputPort;
pub use outbound::{MemoryPort, ReminderPort, SessionPort};
