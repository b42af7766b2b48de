//! Board-agnostic core logic for the Tempora RTC firmware
//!
//! This crate contains everything about the DS1307 that does not depend
//! on a bus implementation:
//!
//! - Register block encode/decode (packed BCD)
//! - Day-of-week table
//! - `YYMMDDWHHMM` timestamp parsing
//! - Link state machine
//! - Board configuration types and parser

#![no_std]
#![deny(unsafe_code)]

// proptest needs std for its runner and failure messages
#[cfg(test)]
extern crate std;

pub mod config;
pub mod registers;
pub mod state;
pub mod timestamp;
pub mod weekday;

pub use registers::{Bcd, HourMode, RangeError, RegisterBlock, BLOCK_LEN, DS1307_ADDRESS};
pub use weekday::Weekday;
