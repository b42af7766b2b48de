//! GPIO pin abstractions
//!
//! The RTC transport does not drive pins itself; it only needs the two
//! bus lines switched to their I2C function while the bus is in use.

/// Data and clock lines of an I2C bus
///
/// Implementations select the I2C pin function and enable the pull-ups
/// on `claim`, and return both pins to the unselected function on
/// `release`. Both operations must be idempotent.
pub trait BusPins {
    /// Route both lines to the I2C peripheral with pull-ups enabled
    fn claim(&mut self);

    /// Detach both lines from the I2C peripheral
    fn release(&mut self);

    /// GPIO number of the data (SDA) line
    fn sda(&self) -> u8;

    /// GPIO number of the clock (SCL) line
    fn scl(&self) -> u8;
}
