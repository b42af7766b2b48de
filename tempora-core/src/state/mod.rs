//! Link state machine for the RTC handle
//!
//! Tracks whether the bus is configured and whether the chip has answered
//! a presence probe. The transport reports events; the state is advisory
//! and never blocks an operation.

pub mod events;
pub mod machine;

pub use events::LinkEvent;
pub use machine::LinkState;
