//! Board configuration types
//!
//! Describes where the RTC is wired and how patiently to talk to it.

use heapless::String;

use crate::registers::DS1307_ADDRESS;

/// Maximum length of a string value in the board file
pub const MAX_VALUE_LEN: usize = 24;

/// Pin configuration with optional inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinConfig {
    /// GPIO pin number (0-29 for RP2040)
    pub pin: u8,
    /// Pin is active-low (inverted)
    pub inverted: bool,
    /// Enable internal pull-up
    pub pull_up: bool,
}

impl PinConfig {
    /// Create a new pin config
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: false,
        }
    }

    /// Create a pin with pull-up enabled
    pub const fn with_pullup(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: true,
        }
    }
}

/// I2C bus wiring and timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusConfig {
    /// Peripheral instance (0 = I2C0, 1 = I2C1)
    pub bus: u8,
    /// Data line
    pub sda: PinConfig,
    /// Clock line
    pub scl: PinConfig,
    /// SCL frequency in kHz
    pub speed_khz: u16,
    /// Per-transfer timeout in microseconds
    pub timeout_us: u32,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            bus: 0,
            sda: PinConfig::with_pullup(16),
            scl: PinConfig::with_pullup(17),
            speed_khz: 100,
            timeout_us: 50_000,
        }
    }
}

impl BusConfig {
    /// SCL frequency in Hz
    pub const fn frequency_hz(&self) -> u32 {
        self.speed_khz as u32 * 1000
    }
}

/// RTC device settings and bring-up policy
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RtcConfig {
    /// 7-bit bus address
    pub address: u8,
    /// Presence probes before giving up
    pub probe_attempts: u8,
    /// Delay between failed probes in milliseconds
    pub probe_delay_ms: u32,
    /// Time to set after bring-up, as `YYMMDDWHHMM`
    pub set_time: Option<String<MAX_VALUE_LEN>>,
}

impl Default for RtcConfig {
    fn default() -> Self {
        Self {
            address: DS1307_ADDRESS,
            probe_attempts: 3,
            probe_delay_ms: 2000,
            set_time: None,
        }
    }
}

/// Complete board configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardConfig {
    /// RTC bus
    pub i2c: BusConfig,
    /// RTC device
    pub rtc: RtcConfig,
    /// On-board status LED
    pub status_led: PinConfig,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            i2c: BusConfig::default(),
            rtc: RtcConfig::default(),
            status_led: PinConfig::new(25),
        }
    }
}

impl BoardConfig {
    /// Create a configuration with every value at its default
    pub fn new() -> Self {
        Self::default()
    }
}
