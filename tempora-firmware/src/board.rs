//! Board wiring and configuration loading
//!
//! Pin assignment is board-specific: the peripherals below are wired in
//! `main` by type, so board.toml can only confirm them, not move them.

use defmt::*;
use tempora_core::config::{parse_config, BoardConfig};
use tempora_core::timestamp;

/// I2C block the RTC hangs off
pub const RTC_BUS: u8 = 0;
/// GPIO16 = I2C0 SDA
pub const RTC_SDA: u8 = 16;
/// GPIO17 = I2C0 SCL
pub const RTC_SCL: u8 = 17;
/// Pico on-board LED
pub const STATUS_LED: u8 = 25;

/// Written after bring-up when board.toml has no `set_time`
pub const FALLBACK_SET_TIME: &str = "24020441230";

/// Parse the embedded board file, falling back to defaults
pub fn load(text: &str) -> BoardConfig {
    match parse_config(text) {
        Ok(config) => {
            info!(
                "Board config: I2C{} @ {} kHz, RTC at {:#x}, timeout {} us",
                config.i2c.bus, config.i2c.speed_khz, config.rtc.address, config.i2c.timeout_us
            );
            config
        }
        Err(e) => {
            warn!("board.toml rejected ({}), using defaults", e);
            BoardConfig::default()
        }
    }
}

/// Warn about configured pins that differ from the wired ones
///
/// Returns true when board.toml agrees with the wiring.
pub fn check_wiring(config: &BoardConfig) -> bool {
    let mut agrees = true;

    if config.i2c.bus != RTC_BUS || config.i2c.sda.pin != RTC_SDA || config.i2c.scl.pin != RTC_SCL
    {
        warn!(
            "board.toml names I2C{} gpio{}/gpio{}, firmware is wired for I2C{} gpio{}/gpio{}",
            config.i2c.bus,
            config.i2c.sda.pin,
            config.i2c.scl.pin,
            RTC_BUS,
            RTC_SDA,
            RTC_SCL
        );
        agrees = false;
    }

    if config.status_led.pin != STATUS_LED {
        warn!(
            "board.toml names LED gpio{}, firmware is wired for gpio{}",
            config.status_led.pin, STATUS_LED
        );
        agrees = false;
    }

    agrees
}

/// Time string to write after the default test time
///
/// Out-of-range fields are reported but still written; the chip stores
/// whatever it is given.
pub fn set_time(config: &BoardConfig) -> &str {
    let text = config.rtc.set_time.as_deref().unwrap_or(FALLBACK_SET_TIME);

    match timestamp::parse(Some(text)) {
        Ok(block) => {
            if let Err(field) = block.check_ranges() {
                warn!("set_time {} has {} out of range", text, field);
            }
        }
        Err(e) => warn!("set_time {} is malformed: {}", text, e),
    }

    text
}
