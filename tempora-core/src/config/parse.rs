//! Simple TOML parser for the board configuration
//!
//! This is a minimal TOML parser that handles only the subset the board
//! file uses. It does NOT support the full TOML spec.
//!
//! Supported features:
//! - Key = value pairs (string, integer incl. `0x` hex)
//! - [section] headers
//! - Comments (# ...)
//!
//! Unknown keys are ignored so older firmware accepts newer board files.

use heapless::String;

use super::board::{BoardConfig, PinConfig, MAX_VALUE_LEN};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Invalid value type or out of range
    InvalidValue,
    /// Invalid pin string
    InvalidPin,
    /// String value longer than the config can hold
    ValueTooLong,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    I2c,
    Rtc,
    StatusLed,
}

/// Parse TOML text into a board configuration
///
/// Keys that are absent keep their defaults.
pub fn parse_config(input: &str) -> Result<BoardConfig, ParseError> {
    let mut config = BoardConfig::new();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        let Some((key, value)) = parse_key_value(line) else {
            continue;
        };

        apply_value(&mut config, section, key, value)?;
    }

    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "i2c" => Ok(Section::I2c),
        "rtc" => Ok(Section::Rtc),
        "status_led" => Ok(Section::StatusLed),
        _ => Err(ParseError::InvalidSection),
    }
}

fn apply_value(
    config: &mut BoardConfig,
    section: Section,
    key: &str,
    value: &str,
) -> Result<(), ParseError> {
    match (section, key) {
        (Section::I2c, "bus") => {
            let bus: u8 = parse_int(value)?;
            if bus > 1 {
                return Err(ParseError::InvalidValue);
            }
            config.i2c.bus = bus;
        }
        (Section::I2c, "sda_pin") => config.i2c.sda = parse_pin(value)?,
        (Section::I2c, "scl_pin") => config.i2c.scl = parse_pin(value)?,
        (Section::I2c, "speed_khz") => {
            let khz: u16 = parse_int(value)?;
            if khz == 0 {
                return Err(ParseError::InvalidValue);
            }
            config.i2c.speed_khz = khz;
        }
        (Section::I2c, "timeout_us") => config.i2c.timeout_us = parse_int(value)?,

        (Section::Rtc, "address") => {
            let address: u8 = parse_int(value)?;
            if address > 0x7F {
                return Err(ParseError::InvalidValue);
            }
            config.rtc.address = address;
        }
        (Section::Rtc, "probe_attempts") => config.rtc.probe_attempts = parse_int(value)?,
        (Section::Rtc, "probe_delay_ms") => config.rtc.probe_delay_ms = parse_int(value)?,
        (Section::Rtc, "set_time") => {
            let text = parse_string(value)?;
            let text: String<MAX_VALUE_LEN> =
                String::try_from(text).map_err(|_| ParseError::ValueTooLong)?;
            config.rtc.set_time = Some(text);
        }

        (Section::StatusLed, "pin") => config.status_led = parse_pin(value)?,

        _ => {}
    }

    Ok(())
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Remove inline comments
    let value = if let Some(hash_pos) = value.find('#') {
        // Make sure # is not inside a string
        let quote_count = value[..hash_pos].matches('"').count();
        if quote_count % 2 == 0 {
            value[..hash_pos].trim()
        } else {
            value
        }
    } else {
        value
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> Result<&str, ParseError> {
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        Ok(&value[1..value.len() - 1])
    } else {
        // Allow unquoted strings for simple values
        Ok(value)
    }
}

/// Parse a decimal or `0x` hex integer
fn parse_int<T: TryFrom<u32>>(value: &str) -> Result<T, ParseError> {
    let raw = if let Some(hex) = value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16)
    } else {
        value.parse::<u32>()
    };

    let raw = raw.map_err(|_| ParseError::InvalidValue)?;
    T::try_from(raw).map_err(|_| ParseError::InvalidValue)
}

/// Parse a pin string like "gpio16", "!gpio25", "^gpio17"
fn parse_pin(value: &str) -> Result<PinConfig, ParseError> {
    let value = parse_string(value)?;
    let mut inverted = false;
    let mut pull_up = false;
    let mut s = value;

    // Check for modifiers
    while !s.is_empty() {
        if let Some(rest) = s.strip_prefix('!') {
            inverted = true;
            s = rest;
        } else if let Some(rest) = s.strip_prefix('^') {
            pull_up = true;
            s = rest;
        } else {
            break;
        }
    }

    let Some(num) = s.strip_prefix("gpio") else {
        return Err(ParseError::InvalidPin);
    };

    let pin: u8 = num.parse().map_err(|_| ParseError::InvalidPin)?;
    if pin >= 30 {
        return Err(ParseError::InvalidPin);
    }

    Ok(PinConfig {
        pin,
        inverted,
        pull_up,
    })
}
