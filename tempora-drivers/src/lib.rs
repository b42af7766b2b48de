//! Hardware driver implementations
//!
//! This crate provides the DS1307 real-time-clock transport, written
//! against the `tempora-hal` bus traits so it runs unchanged on the RP2040
//! and against host-side fakes.

#![no_std]
#![deny(unsafe_code)]

pub mod rtc;
