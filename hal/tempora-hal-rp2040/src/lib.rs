//! RP2040 backend for the RTC bus
//!
//! Implements the `tempora-hal` traits on top of embassy-rp:
//!
//! - `Rp2040I2c`: blocking, timeout-bounded transfers on an async I2C block
//! - `Rp2040BusPins`: routes the SDA/SCL pads to and from the I2C function

#![no_std]

pub mod i2c;
pub mod pins;

pub use i2c::Rp2040I2c;
pub use pins::Rp2040BusPins;
