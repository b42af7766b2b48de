//! I2C pin routing
//!
//! Every RP2040 GPIO can carry one I2C line: even pins carry SDA, odd pins
//! SCL, and the block alternates every two pins (GPIO0/1 on I2C0, GPIO2/3
//! on I2C1, GPIO4/5 on I2C0 again, ...). Pin numbers come from the board
//! config, so the pairing is checked at runtime before anything is muxed.

use embassy_rp::pac;
use tempora_hal::BusPins;

/// Maximum number of GPIO pins on RP2040
pub const GPIO_COUNT: u8 = 30;

/// IO_BANK0 function select for I2C
const FUNCSEL_I2C: u8 = 3;

/// IO_BANK0 function select that detaches the pad from every peripheral
const FUNCSEL_NULL: u8 = 0x1f;

/// Which line of which block a pin can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cLine {
    Sda(u8),
    Scl(u8),
}

/// I2C function of a GPIO, or `None` past the last pin
pub const fn i2c_line(pin: u8) -> Option<I2cLine> {
    if pin >= GPIO_COUNT {
        return None;
    }
    let bus = (pin / 2) % 2;
    if pin % 2 == 0 {
        Some(I2cLine::Sda(bus))
    } else {
        Some(I2cLine::Scl(bus))
    }
}

/// Error when assigning bus pins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range (0-29 valid)
    InvalidPin,
    /// Pin cannot carry this line of this block
    WrongFunction { pin: u8 },
}

/// SDA/SCL pair of one I2C block
pub struct Rp2040BusPins {
    sda: u8,
    scl: u8,
    sda_pull_up: bool,
    scl_pull_up: bool,
}

impl Rp2040BusPins {
    /// Check that `sda` and `scl` carry the right lines of block `bus`
    pub fn new(bus: u8, sda: u8, scl: u8) -> Result<Self, PinError> {
        match i2c_line(sda) {
            Some(I2cLine::Sda(b)) if b == bus => {}
            Some(_) => return Err(PinError::WrongFunction { pin: sda }),
            None => return Err(PinError::InvalidPin),
        }
        match i2c_line(scl) {
            Some(I2cLine::Scl(b)) if b == bus => {}
            Some(_) => return Err(PinError::WrongFunction { pin: scl }),
            None => return Err(PinError::InvalidPin),
        }

        Ok(Self {
            sda,
            scl,
            sda_pull_up: true,
            scl_pull_up: true,
        })
    }

    /// Choose which lines get the internal pull-up while claimed
    ///
    /// Both are on by default. Boards with external resistors on the
    /// breakout can turn them off.
    pub fn with_pull_ups(mut self, sda: bool, scl: bool) -> Self {
        self.sda_pull_up = sda;
        self.scl_pull_up = scl;
        self
    }
}

fn route(pin: u8, funcsel: u8, pull_up: bool) {
    pac::PADS_BANK0.gpio(pin as usize).modify(|w| {
        w.set_ie(true);
        w.set_pue(pull_up);
        w.set_pde(false);
    });
    pac::IO_BANK0
        .gpio(pin as usize)
        .ctrl()
        .write(|w| w.set_funcsel(funcsel));
}

impl BusPins for Rp2040BusPins {
    fn claim(&mut self) {
        route(self.sda, FUNCSEL_I2C, self.sda_pull_up);
        route(self.scl, FUNCSEL_I2C, self.scl_pull_up);
    }

    fn release(&mut self) {
        route(self.sda, FUNCSEL_NULL, false);
        route(self.scl, FUNCSEL_NULL, false);
    }

    fn sda(&self) -> u8 {
        self.sda
    }

    fn scl(&self) -> u8 {
        self.scl
    }
}
