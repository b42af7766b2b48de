//! DS1307 timekeeping register block
//!
//! The first seven registers of the chip hold the time and date as packed
//! BCD. They are always transferred as one block starting at register 0:
//!
//! ```text
//! Addr │ Bit 7 │ Bit 6 │ Bit 5 │ Bit 4 │ Bits 3-0
//! ─────┼───────┼───────┼───────┴───────┼─────────────
//! 0x00 │  CH   │   10 seconds (0-5)     │ seconds
//! 0x01 │   0   │   10 minutes (0-5)     │ minutes
//! 0x02 │   0   │ 12/24 │  hours high   │ hours
//! 0x03 │   0   │   0   │   0   │   0   │ 0 │ day (0-6)
//! 0x04 │   0   │   0   │  10 date (0-3)│ date
//! 0x05 │   0   │   0   │   0   │10 mon │ month
//! 0x06 │        10 years (0-9)         │ years
//! ```
//!
//! Encoding masks each field to its width, so out-of-range digits are
//! truncated exactly as a hardware bit field would truncate them.

use crate::weekday::Weekday;

/// DS1307 register addresses
pub mod reg {
    /// Seconds and clock-halt flag
    pub const SECONDS: u8 = 0x00;
    /// Minutes
    pub const MINUTES: u8 = 0x01;
    /// Hours and 12/24 mode
    pub const HOURS: u8 = 0x02;
    /// Day of week
    pub const DAY: u8 = 0x03;
    /// Date of month
    pub const DATE: u8 = 0x04;
    /// Month
    pub const MONTH: u8 = 0x05;
    /// Year within century
    pub const YEAR: u8 = 0x06;
    /// Square-wave output control
    pub const CONTROL: u8 = 0x07;
}

/// Fixed 7-bit bus address of the DS1307
pub const DS1307_ADDRESS: u8 = 0x68;

/// Number of timekeeping registers
pub const BLOCK_LEN: usize = 7;

/// Register pointer byte plus the block, as sent by a time write
pub const WRITE_FRAME_LEN: usize = BLOCK_LEN + 1;

/// Clock-halt flag in the seconds register
const CLOCK_HALT: u8 = 1 << 7;
/// 12-hour mode select in the hours register
const HOUR_MODE_12: u8 = 1 << 6;
/// Units digit of every BCD field
const UNITS_MASK: u8 = 0x0F;

/// Tens-digit widths, one per register
const SECONDS_TENS: u8 = 0x07;
const MINUTES_TENS: u8 = 0x07;
const HOURS_HIGH: u8 = 0x03;
const DAY_MASK: u8 = 0x07;
const DATE_TENS: u8 = 0x03;
const MONTH_TENS: u8 = 0x01;
const YEAR_TENS: u8 = 0x0F;

/// A two-digit BCD field, stored one digit per nibble
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bcd {
    /// High (tens) digit
    pub tens: u8,
    /// Low (units) digit
    pub units: u8,
}

impl Bcd {
    /// Create a BCD pair from its two digits
    pub const fn new(tens: u8, units: u8) -> Self {
        Self { tens, units }
    }

    /// Pack into one register byte, masking the tens digit to `tens_mask`
    const fn pack(self, tens_mask: u8) -> u8 {
        ((self.tens & tens_mask) << 4) | (self.units & UNITS_MASK)
    }

    /// Unpack from one register byte
    const fn unpack(byte: u8, tens_mask: u8) -> Self {
        Self {
            tens: (byte >> 4) & tens_mask,
            units: byte & UNITS_MASK,
        }
    }

    /// Decimal value (`tens * 10 + units`)
    ///
    /// Saturates at 255 when the digits are not BCD.
    pub const fn value(self) -> u8 {
        self.tens.saturating_mul(10).saturating_add(self.units)
    }

    /// Both digits are in 0-9
    pub const fn is_valid(self) -> bool {
        self.tens <= 9 && self.units <= 9
    }
}

/// Interpretation of the hours register high field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HourMode {
    /// High field is the tens digit (0-2)
    #[default]
    TwentyFour,
    /// High field bit 1 is PM, bit 0 the tens digit (0-1)
    Twelve,
}

/// Field that failed a range check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RangeError {
    Seconds,
    Minutes,
    Hours,
    Weekday,
    Date,
    Month,
    Year,
}

/// In-memory copy of the seven timekeeping registers
///
/// Fields hold raw digits; nothing is converted until the block is
/// encoded with [`RegisterBlock::to_bytes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterBlock {
    /// Seconds (tens 0-5)
    pub seconds: Bcd,
    /// Oscillator stopped when set
    pub clock_halt: bool,
    /// Minutes (tens 0-5)
    pub minutes: Bcd,
    /// Hours; `tens` is the 2-bit high field
    pub hours: Bcd,
    /// How `hours.tens` is interpreted
    pub hour_mode: HourMode,
    /// Day of week, 3-bit raw value
    pub day: u8,
    /// Date of month (tens 0-3)
    pub date: Bcd,
    /// Month (tens 0-1)
    pub month: Bcd,
    /// Year within the 2000s (tens 0-9)
    pub year: Bcd,
}

impl RegisterBlock {
    /// Known test time: 2020-07-09, Friday, 18:56:00
    pub const DEFAULT_TEST_TIME: Self = Self {
        seconds: Bcd::new(0, 0),
        clock_halt: false,
        minutes: Bcd::new(5, 6),
        hours: Bcd::new(1, 8),
        hour_mode: HourMode::TwentyFour,
        day: Weekday::Friday.to_register(),
        date: Bcd::new(0, 9),
        month: Bcd::new(0, 7),
        year: Bcd::new(2, 0),
    };

    /// Decode the seven registers, in register order
    ///
    /// Reserved bits are ignored.
    pub const fn from_bytes(bytes: &[u8; BLOCK_LEN]) -> Self {
        Self {
            seconds: Bcd::unpack(bytes[0], SECONDS_TENS),
            clock_halt: bytes[0] & CLOCK_HALT != 0,
            minutes: Bcd::unpack(bytes[1], MINUTES_TENS),
            hours: Bcd::unpack(bytes[2], HOURS_HIGH),
            hour_mode: if bytes[2] & HOUR_MODE_12 != 0 {
                HourMode::Twelve
            } else {
                HourMode::TwentyFour
            },
            day: bytes[3] & DAY_MASK,
            date: Bcd::unpack(bytes[4], DATE_TENS),
            month: Bcd::unpack(bytes[5], MONTH_TENS),
            year: Bcd::unpack(bytes[6], YEAR_TENS),
        }
    }

    /// Encode into the seven registers, in register order
    ///
    /// Reserved bits are written as zero.
    pub const fn to_bytes(&self) -> [u8; BLOCK_LEN] {
        let halt = if self.clock_halt { CLOCK_HALT } else { 0 };
        let mode = match self.hour_mode {
            HourMode::TwentyFour => 0,
            HourMode::Twelve => HOUR_MODE_12,
        };

        [
            halt | self.seconds.pack(SECONDS_TENS),
            self.minutes.pack(MINUTES_TENS),
            mode | self.hours.pack(HOURS_HIGH),
            self.day & DAY_MASK,
            self.date.pack(DATE_TENS),
            self.month.pack(MONTH_TENS),
            self.year.pack(YEAR_TENS),
        ]
    }

    /// Build the 8-byte write transaction: register pointer, then the block
    pub const fn write_frame(&self) -> [u8; WRITE_FRAME_LEN] {
        let block = self.to_bytes();
        [
            reg::SECONDS,
            block[0],
            block[1],
            block[2],
            block[3],
            block[4],
            block[5],
            block[6],
        ]
    }

    /// Day of week, if the raw value names one
    pub fn weekday(&self) -> Option<Weekday> {
        Weekday::from_register(self.day)
    }

    /// Seconds as a decimal number
    pub const fn seconds(&self) -> u8 {
        self.seconds.value()
    }

    /// Minutes as a decimal number
    pub const fn minutes(&self) -> u8 {
        self.minutes.value()
    }

    /// Hours as shown on the clock face
    ///
    /// 0-23 in 24-hour mode, 1-12 in 12-hour mode (see [`Self::is_pm`]).
    pub const fn hours(&self) -> u8 {
        match self.hour_mode {
            HourMode::TwentyFour => self.hours.value(),
            HourMode::Twelve => ((self.hours.tens & 0x01) * 10).saturating_add(self.hours.units),
        }
    }

    /// PM flag in 12-hour mode, `None` in 24-hour mode
    pub const fn is_pm(&self) -> Option<bool> {
        match self.hour_mode {
            HourMode::TwentyFour => None,
            HourMode::Twelve => Some(self.hours.tens & 0x02 != 0),
        }
    }

    /// Date of month as a decimal number
    pub const fn date(&self) -> u8 {
        self.date.value()
    }

    /// Month as a decimal number
    pub const fn month(&self) -> u8 {
        self.month.value()
    }

    /// Full year, assuming the 2000s
    pub const fn year(&self) -> u16 {
        2000 + self.year.value() as u16
    }

    /// Check every field against its calendar range
    ///
    /// Writes never call this; it exists for callers that want to reject
    /// digit strings such as month `00` before they reach the chip. No
    /// month-length or leap-year checks are made.
    pub fn check_ranges(&self) -> Result<(), RangeError> {
        if !self.seconds.is_valid() || self.seconds() > 59 {
            return Err(RangeError::Seconds);
        }
        if !self.minutes.is_valid() || self.minutes() > 59 {
            return Err(RangeError::Minutes);
        }
        if !self.hours.is_valid() {
            return Err(RangeError::Hours);
        }
        let hours_ok = match self.hour_mode {
            HourMode::TwentyFour => self.hours() <= 23,
            HourMode::Twelve => (1..=12).contains(&self.hours()),
        };
        if !hours_ok {
            return Err(RangeError::Hours);
        }
        if self.weekday().is_none() {
            return Err(RangeError::Weekday);
        }
        if !self.date.is_valid() || !(1..=31).contains(&self.date()) {
            return Err(RangeError::Date);
        }
        if !self.month.is_valid() || !(1..=12).contains(&self.month()) {
            return Err(RangeError::Month);
        }
        if !self.year.is_valid() {
            return Err(RangeError::Year);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_test_time_bytes() {
        let bytes = RegisterBlock::DEFAULT_TEST_TIME.to_bytes();
        assert_eq!(bytes, [0x00, 0x56, 0x18, 0x05, 0x09, 0x07, 0x20]);
    }

    #[test]
    fn test_write_frame_is_pointer_then_block() {
        let block = RegisterBlock::DEFAULT_TEST_TIME;
        let frame = block.write_frame();
        assert_eq!(frame.len(), 8);
        assert_eq!(frame[0], reg::SECONDS);
        assert_eq!(&frame[1..], &block.to_bytes());
    }

    #[test]
    fn test_decode_flags_and_modes() {
        // CH set, 12-hour mode, PM, 11 o'clock
        let block = RegisterBlock::from_bytes(&[0x80 | 0x45, 0x30, 0x40 | 0x20 | 0x11, 0x02, 0x31, 0x12, 0x99]);

        assert!(block.clock_halt);
        assert_eq!(block.seconds, Bcd::new(4, 5));
        assert_eq!(block.minutes(), 30);
        assert_eq!(block.hour_mode, HourMode::Twelve);
        assert_eq!(block.hours(), 11);
        assert_eq!(block.is_pm(), Some(true));
        assert_eq!(block.weekday(), Some(Weekday::Tuesday));
        assert_eq!(block.date(), 31);
        assert_eq!(block.month(), 12);
        assert_eq!(block.year(), 2099);
    }

    #[test]
    fn test_decode_ignores_reserved_bits() {
        // Reserved bits set in minutes, hours, day, date, month
        let block = RegisterBlock::from_bytes(&[0x00, 0x80, 0x80, 0xF8 | 0x03, 0xC0 | 0x15, 0xE0 | 0x09, 0x00]);

        assert_eq!(block.minutes, Bcd::new(0, 0));
        assert_eq!(block.hours, Bcd::new(0, 0));
        assert_eq!(block.hour_mode, HourMode::TwentyFour);
        assert_eq!(block.day, 3);
        assert_eq!(block.date, Bcd::new(1, 5));
        assert_eq!(block.month, Bcd::new(0, 9));
    }

    #[test]
    fn test_encode_truncates_to_field_width() {
        let block = RegisterBlock {
            seconds: Bcd::new(9, 9),
            minutes: Bcd::new(9, 9),
            hours: Bcd::new(9, 9),
            day: 9,
            date: Bcd::new(9, 9),
            month: Bcd::new(9, 9),
            year: Bcd::new(9, 9),
            ..Default::default()
        };
        let bytes = block.to_bytes();

        assert_eq!(bytes, [0x19, 0x19, 0x19, 0x01, 0x19, 0x19, 0x99]);
        // No stray bits reach CH, the mode bit, or reserved bits
        assert_eq!(bytes[0] & CLOCK_HALT, 0);
        assert_eq!(bytes[2] & (HOUR_MODE_12 | 0x80), 0);
    }

    #[test]
    fn test_encode_decode_preserves_flags() {
        let block = RegisterBlock {
            clock_halt: true,
            hour_mode: HourMode::Twelve,
            hours: Bcd::new(2, 7),
            ..RegisterBlock::DEFAULT_TEST_TIME
        };
        let decoded = RegisterBlock::from_bytes(&block.to_bytes());
        assert_eq!(decoded, block);
        assert_eq!(decoded.is_pm(), Some(true));
        assert_eq!(decoded.hours(), 7);
    }

    #[test]
    fn test_check_ranges() {
        assert_eq!(RegisterBlock::DEFAULT_TEST_TIME.check_ranges(), Ok(()));

        let bad_month = RegisterBlock {
            month: Bcd::new(0, 0),
            ..RegisterBlock::DEFAULT_TEST_TIME
        };
        assert_eq!(bad_month.check_ranges(), Err(RangeError::Month));

        let bad_day = RegisterBlock {
            day: 7,
            ..RegisterBlock::DEFAULT_TEST_TIME
        };
        assert_eq!(bad_day.check_ranges(), Err(RangeError::Weekday));

        let bad_hour = RegisterBlock {
            hours: Bcd::new(2, 4),
            ..RegisterBlock::DEFAULT_TEST_TIME
        };
        assert_eq!(bad_hour.check_ranges(), Err(RangeError::Hours));

        let twelve_zero = RegisterBlock {
            hour_mode: HourMode::Twelve,
            hours: Bcd::new(0, 0),
            ..RegisterBlock::DEFAULT_TEST_TIME
        };
        assert_eq!(twelve_zero.check_ranges(), Err(RangeError::Hours));

        let bad_nibble = RegisterBlock {
            seconds: Bcd::new(0, 0x0C),
            ..RegisterBlock::DEFAULT_TEST_TIME
        };
        assert_eq!(bad_nibble.check_ranges(), Err(RangeError::Seconds));
    }

    #[test]
    fn test_check_ranges_rejects_wide_digits() {
        // Caller-built blocks can hold any u8 per digit
        let wide_hours = RegisterBlock {
            hours: Bcd::new(30, 0),
            ..RegisterBlock::DEFAULT_TEST_TIME
        };
        assert_eq!(wide_hours.check_ranges(), Err(RangeError::Hours));

        let wide_twelve = RegisterBlock {
            hour_mode: HourMode::Twelve,
            hours: Bcd::new(1, 250),
            ..RegisterBlock::DEFAULT_TEST_TIME
        };
        assert_eq!(wide_twelve.check_ranges(), Err(RangeError::Hours));

        let wide_year = RegisterBlock {
            year: Bcd::new(30, 0),
            ..RegisterBlock::DEFAULT_TEST_TIME
        };
        assert_eq!(wide_year.check_ranges(), Err(RangeError::Year));
    }

    #[test]
    fn test_decimal_view_saturates() {
        assert_eq!(Bcd::new(30, 0).value(), 255);
        assert_eq!(Bcd::new(25, 9).value(), 255);
        assert_eq!(Bcd::new(9, 9).value(), 99);

        let block = RegisterBlock {
            hours: Bcd::new(30, 0),
            year: Bcd::new(30, 0),
            ..RegisterBlock::DEFAULT_TEST_TIME
        };
        assert_eq!(block.hours(), 255);
        assert_eq!(block.year(), 2255);

        let twelve = RegisterBlock {
            hour_mode: HourMode::Twelve,
            hours: Bcd::new(1, 250),
            ..RegisterBlock::DEFAULT_TEST_TIME
        };
        assert_eq!(twelve.hours(), 255);
    }
}
