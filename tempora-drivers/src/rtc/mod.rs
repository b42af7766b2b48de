//! Real-time-clock drivers
//!
//! - [`ds1307`] - DS1307 register transport over I2C
//! - [`presence`] - Caller-side presence polling with backoff

pub mod ds1307;
pub mod error;
pub mod presence;

#[cfg(test)]
mod fake;

pub use ds1307::{Ds1307, Ds1307Config};
pub use error::{Ds1307Error, Phase};
pub use presence::{wait_for_presence, ProbePolicy};
