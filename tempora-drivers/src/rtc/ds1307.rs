//! DS1307 real-time clock (I2C)
//!
//! The DS1307 keeps time in seven packed-BCD registers at 0x00-0x06 and
//! a square-wave control register at 0x07. All transfers go through a
//! register pointer: a write sets the pointer and optionally stores data,
//! a read returns data starting at the pointer.
//!
//! # Transactions
//!
//! ```text
//! probe       write [0x07, 0x00]              read 1 byte
//! read_time   write [0x00]                    read 7 bytes
//! write_time  write [0x00, s, m, h, d, D, M, Y]
//! ```
//!
//! Every transfer is bounded by the configured timeout. Nothing is ever
//! retried here; see [`super::presence`] for the bring-up retry loop.

use tempora_core::config::BoardConfig;
use tempora_core::registers::{reg, RegisterBlock, BLOCK_LEN, DS1307_ADDRESS};
use tempora_core::state::{LinkEvent, LinkState};
use tempora_core::timestamp;
use tempora_hal::{BusPins, I2cBus};

use super::error::{Ds1307Error, Phase};

/// DS1307 handle configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ds1307Config {
    /// 7-bit bus address (0x68 on every DS1307)
    pub address: u8,
    /// Requested SCL frequency in Hz
    pub frequency_hz: u32,
    /// Per-transfer timeout in microseconds
    pub timeout_us: u32,
}

impl Default for Ds1307Config {
    fn default() -> Self {
        Self {
            address: DS1307_ADDRESS,
            frequency_hz: 100_000,
            timeout_us: 50_000,
        }
    }
}

impl From<&BoardConfig> for Ds1307Config {
    fn from(board: &BoardConfig) -> Self {
        Self {
            address: board.rtc.address,
            frequency_hz: board.i2c.frequency_hz(),
            timeout_us: board.i2c.timeout_us,
        }
    }
}

/// DS1307 driver
///
/// Owns the bus, the bus pins and the in-memory copy of the register
/// block. One handle per chip; all access goes through `&mut self`.
pub struct Ds1307<I2C, PINS> {
    i2c: I2C,
    pins: PINS,
    config: Ds1307Config,
    registers: RegisterBlock,
    buffer: [u8; BLOCK_LEN],
    state: LinkState,
    last_transfer: usize,
}

impl<I2C, PINS> Ds1307<I2C, PINS>
where
    I2C: I2cBus,
    PINS: BusPins,
{
    /// Create a new driver; the bus is not touched until [`Self::init`]
    pub fn new(i2c: I2C, pins: PINS, config: Ds1307Config) -> Self {
        Self {
            i2c,
            pins,
            config,
            registers: RegisterBlock::default(),
            buffer: [0; BLOCK_LEN],
            state: LinkState::Uninitialized,
            last_transfer: 0,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Ds1307Config {
        &self.config
    }

    /// Current link state
    pub fn state(&self) -> LinkState {
        self.state
    }

    /// The chip answered the most recent presence probe
    pub fn is_connected(&self) -> bool {
        self.state.is_present()
    }

    /// Register block from the last successful read or the last write
    pub fn registers(&self) -> &RegisterBlock {
        &self.registers
    }

    /// Bytes moved by the last successful transfer
    pub fn last_transfer(&self) -> usize {
        self.last_transfer
    }

    /// Claim the bus lines and configure the bus clock
    ///
    /// Fails if the bus settles on any rate other than the one requested;
    /// a clamped rate is not accepted as an approximation. On failure the
    /// lines are released and the bus shut down again.
    pub fn init(&mut self) -> Result<(), Ds1307Error> {
        self.pins.claim();

        let requested = self.config.frequency_hz;
        let achieved = self.i2c.configure(requested);
        if achieved != requested {
            self.pins.release();
            self.i2c.shutdown();
            self.state = self.state.transition(LinkEvent::BusRejected);
            return Err(report(Ds1307Error::InitMismatch {
                requested,
                achieved,
            }));
        }

        self.state = self.state.transition(LinkEvent::BusConfigured);
        #[cfg(feature = "defmt")]
        defmt::debug!(
            "DS1307 bus up at {} Hz (SDA {}, SCL {})",
            achieved,
            self.pins.sda(),
            self.pins.scl()
        );
        Ok(())
    }

    /// Release the bus lines and shut the bus down
    pub fn deinit(&mut self) {
        self.pins.release();
        self.i2c.shutdown();
        self.state = self.state.transition(LinkEvent::BusReleased);
    }

    /// Check whether the chip answers at its address
    ///
    /// Writes the control and seconds register addresses, then reads one
    /// byte. The byte itself is not inspected.
    pub fn probe(&mut self) -> bool {
        let mut rx = [0u8; 1];
        let result = write_phase(
            &mut self.i2c,
            &self.config,
            Phase::ProbeWrite,
            &[reg::CONTROL, reg::SECONDS],
        )
        .and_then(|_| read_phase(&mut self.i2c, &self.config, Phase::ProbeRead, &mut rx));

        let event = match result {
            Ok(count) => {
                self.last_transfer = count;
                LinkEvent::ProbeAnswered
            }
            Err(_) => LinkEvent::ProbeFailed,
        };
        self.state = self.state.transition(event);
        result.is_ok()
    }

    /// Read the seven timekeeping registers
    ///
    /// On success the decoded block replaces the stored one and is
    /// returned; the byte count is available from [`Self::last_transfer`].
    pub fn read_time(&mut self) -> Result<RegisterBlock, Ds1307Error> {
        write_phase(&mut self.i2c, &self.config, Phase::PointerWrite, &[reg::SECONDS])?;
        let count = read_phase(&mut self.i2c, &self.config, Phase::BlockRead, &mut self.buffer)?;

        self.registers = RegisterBlock::from_bytes(&self.buffer);
        self.last_transfer = count;
        Ok(self.registers)
    }

    /// Write a complete register block
    ///
    /// The block becomes the stored copy before the transfer starts.
    /// Returns the number of bytes transferred, pointer byte included.
    pub fn write_time(&mut self, block: &RegisterBlock) -> Result<usize, Ds1307Error> {
        self.registers = *block;
        let frame = self.registers.write_frame();

        let count = write_phase(&mut self.i2c, &self.config, Phase::BlockWrite, &frame)?;
        self.last_transfer = count;
        Ok(count)
    }

    /// Write a `YYMMDDWHHMM` timestamp
    ///
    /// Seconds are set to zero. Malformed input is rejected before any bus
    /// traffic and leaves the stored block untouched.
    pub fn write_timestamp(&mut self, input: Option<&str>) -> Result<usize, Ds1307Error> {
        let block = timestamp::parse(input).map_err(|e| report(e.into()))?;
        self.write_time(&block)
    }

    /// Write the fixed test time (2020-07-09, Friday, 18:56:00)
    pub fn write_default_time(&mut self) -> Result<usize, Ds1307Error> {
        self.write_time(&RegisterBlock::DEFAULT_TEST_TIME)
    }

    /// Destroy the driver and return the bus and pins
    pub fn release(self) -> (I2C, PINS) {
        (self.i2c, self.pins)
    }
}

fn write_phase<I2C: I2cBus>(
    i2c: &mut I2C,
    config: &Ds1307Config,
    phase: Phase,
    data: &[u8],
) -> Result<usize, Ds1307Error> {
    match i2c.write(config.address, data, config.timeout_us) {
        Ok(0) => Err(report(Ds1307Error::ShortTransfer { phase })),
        Ok(count) => Ok(count),
        Err(error) => Err(report(Ds1307Error::Bus { phase, error })),
    }
}

fn read_phase<I2C: I2cBus>(
    i2c: &mut I2C,
    config: &Ds1307Config,
    phase: Phase,
    buf: &mut [u8],
) -> Result<usize, Ds1307Error> {
    match i2c.read(config.address, buf, config.timeout_us) {
        Ok(0) => Err(report(Ds1307Error::ShortTransfer { phase })),
        Ok(count) => Ok(count),
        Err(error) => Err(report(Ds1307Error::Bus { phase, error })),
    }
}

/// Log a failure on its way to the caller
fn report(err: Ds1307Error) -> Ds1307Error {
    #[cfg(feature = "defmt")]
    defmt::warn!("DS1307: {}", err);
    err
}
