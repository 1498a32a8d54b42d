//! Topic-based event bus for match events.
//!
//! The service publishes an event after every committed mutation. Delivery is
//! best-effort and never affects the mutation that produced it.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{LobbyEvent, PlayEvent};
