//! Blocking I2C transfers on the RP2040
//!
//! The RP2040 I2C block is driven through embassy-rp's async driver, but the
//! RTC driver above it is blocking. Each transfer is run to completion with
//! `block_on` and bounded by an embassy-time timeout, so a wedged bus costs
//! at most `timeout_us` before the caller sees `BusError::Timeout`.

use embassy_embedded_hal::SetConfig;
use embassy_futures::block_on;
use embassy_rp::i2c::{AbortReason, Async, Config, Error, I2c, Instance};
use embassy_rp::{clocks, pac};
use embassy_time::{with_timeout, Duration};
use tempora_hal::{BusError, I2cBus};

/// Compute the SCL rate the hardware actually runs at
///
/// The block divides its input clock by an integer period, rounded to the
/// nearest value, so most requested rates are only approximated.
/// Returns 0 for a zero request or a clock too slow to reach the request.
pub fn achieved_frequency(clock_hz: u32, requested_hz: u32) -> u32 {
    if requested_hz == 0 {
        return 0;
    }

    let period = (clock_hz as u64 + requested_hz as u64 / 2) / requested_hz as u64;
    if period == 0 {
        return 0;
    }

    (clock_hz as u64 / period) as u32
}

/// Map an embassy-rp transfer error onto the bus error set
fn map_error(error: Error) -> BusError {
    match error {
        Error::Abort(AbortReason::NoAcknowledge) => BusError::Nack,
        Error::Abort(AbortReason::ArbitrationLoss) => BusError::ArbitrationLost,
        Error::Abort(_) => BusError::Bus,
        _ => BusError::Other,
    }
}

/// One RP2040 I2C block driven as a blocking `I2cBus`
pub struct Rp2040I2c<'d, T: Instance> {
    i2c: I2c<'d, T, Async>,
    /// Block index (0 = I2C0, 1 = I2C1), used to gate it off on shutdown
    bus: u8,
}

impl<'d, T: Instance> Rp2040I2c<'d, T> {
    /// Wrap an already constructed async I2C driver
    ///
    /// `bus` must name the same block the driver was built on.
    pub fn new(i2c: I2c<'d, T, Async>, bus: u8) -> Self {
        Self { i2c, bus }
    }

    fn regs(&self) -> pac::i2c::I2c {
        if self.bus == 0 {
            pac::I2C0
        } else {
            pac::I2C1
        }
    }
}

impl<T: Instance> I2cBus for Rp2040I2c<'_, T> {
    fn configure(&mut self, frequency_hz: u32) -> u32 {
        let mut config = Config::default();
        config.frequency = frequency_hz;

        // set_config disables the block, reprograms the dividers and
        // re-enables it
        if let Err(_e) = self.i2c.set_config(&config) {
            #[cfg(feature = "defmt")]
            defmt::warn!("I2C{} rejected {} Hz: {}", self.bus, frequency_hz, _e);
            return 0;
        }

        achieved_frequency(clocks::clk_sys_freq(), frequency_hz)
    }

    fn shutdown(&mut self) {
        self.regs().ic_enable().write(|w| w.set_enable(false));
    }

    fn write(&mut self, address: u8, data: &[u8], timeout_us: u32) -> Result<usize, BusError> {
        let transfer = embedded_hal_async::i2c::I2c::write(&mut self.i2c, address, data);

        match block_on(with_timeout(
            Duration::from_micros(timeout_us as u64),
            transfer,
        )) {
            Ok(Ok(())) => Ok(data.len()),
            Ok(Err(e)) => Err(map_error(e)),
            Err(_) => Err(BusError::Timeout),
        }
    }

    fn read(&mut self, address: u8, buf: &mut [u8], timeout_us: u32) -> Result<usize, BusError> {
        let len = buf.len();
        let transfer = embedded_hal_async::i2c::I2c::read(&mut self.i2c, address, buf);

        match block_on(with_timeout(
            Duration::from_micros(timeout_us as u64),
            transfer,
        )) {
            Ok(Ok(())) => Ok(len),
            Ok(Err(e)) => Err(map_error(e)),
            Err(_) => Err(BusError::Timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SYS_CLK_HZ: u32 = 125_000_000;

    #[test]
    fn test_standard_mode_is_exact() {
        // 125 MHz / 1250 = 100 kHz
        assert_eq!(achieved_frequency(SYS_CLK_HZ, 100_000), 100_000);
    }

    #[test]
    fn test_fast_mode_is_approximate() {
        // Period rounds to 313, so 400 kHz lands just below
        assert_eq!(achieved_frequency(SYS_CLK_HZ, 400_000), 399_361);
    }

    #[test]
    fn test_degenerate_requests() {
        assert_eq!(achieved_frequency(SYS_CLK_HZ, 0), 0);
        assert_eq!(achieved_frequency(1000, 1_000_000), 0);
    }

    #[test]
    fn test_error_mapping() {
        assert_eq!(
            map_error(Error::Abort(AbortReason::NoAcknowledge)),
            BusError::Nack
        );
        assert_eq!(
            map_error(Error::Abort(AbortReason::ArbitrationLoss)),
            BusError::ArbitrationLost
        );
        assert_eq!(map_error(Error::Abort(AbortReason::Other(1))), BusError::Bus);
        assert_eq!(map_error(Error::InvalidReadBufferLength), BusError::Other);
    }
}
