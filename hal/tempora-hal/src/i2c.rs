//! I2C bus abstractions
//!
//! Provides the blocking I2C master operations the RTC transport needs.
//! Unlike `embedded_hal::i2c::I2c`, every transfer carries its own timeout
//! and reports how many bytes actually moved, and configuring the bus
//! reports the clock rate the hardware achieved.

/// Error from I2C operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// Transfer did not complete within the timeout
    Timeout,
    /// Address or data byte not acknowledged
    Nack,
    /// Arbitration lost
    ArbitrationLost,
    /// Bus error (misplaced start/stop, stuck line)
    Bus,
    /// Other error
    Other,
}

/// Blocking I2C bus master
pub trait I2cBus {
    /// Configure the peripheral for the requested SCL frequency
    ///
    /// Returns the frequency the hardware actually achieved, which may
    /// differ from the request when the divider cannot hit it exactly.
    /// Returns 0 if the peripheral could not be configured at all.
    fn configure(&mut self, frequency_hz: u32) -> u32;

    /// Disable the peripheral
    fn shutdown(&mut self);

    /// Write `data` to the device at `address`
    ///
    /// Returns the number of bytes transferred.
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    /// * `timeout_us` - Upper bound on the whole transfer
    fn write(&mut self, address: u8, data: &[u8], timeout_us: u32) -> Result<usize, BusError>;

    /// Read into `buf` from the device at `address`
    ///
    /// Returns the number of bytes transferred.
    fn read(&mut self, address: u8, buf: &mut [u8], timeout_us: u32) -> Result<usize, BusError>;
}
