//! Compact timestamp strings
//!
//! A timestamp is 11 ASCII digits laid out as `YYMMDDWHHMM`:
//!
//! ```text
//! index  0 1   2 3   4 5   6   7 8   9 10
//!        Y Y   M M   D D   W   H H   M  M
//! ```
//!
//! `W` is the day of week (0 = Sunday). Seconds cannot be expressed and
//! are always zero. Each digit is placed in its nibble at face value;
//! no range checking is done here (see [`RegisterBlock::check_ranges`]).

use heapless::String;

use crate::registers::{Bcd, HourMode, RegisterBlock};

/// Length of a timestamp string
pub const TIMESTAMP_LEN: usize = 11;

/// Timestamp parse errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FormatError {
    /// No timestamp was supplied
    Missing,
    /// Input is not exactly 11 bytes long
    WrongLength(usize),
    /// Non-digit byte at the given position
    InvalidDigit { position: usize, byte: u8 },
}

/// Parse a `YYMMDDWHHMM` timestamp into a register block
///
/// `None` stands for an absent timestamp, such as an unset config key.
/// The block comes back with seconds zeroed, the oscillator running and
/// 24-hour mode selected.
pub fn parse(input: Option<&str>) -> Result<RegisterBlock, FormatError> {
    let bytes = input.ok_or(FormatError::Missing)?.as_bytes();

    if bytes.len() != TIMESTAMP_LEN {
        return Err(FormatError::WrongLength(bytes.len()));
    }

    let mut digits = [0u8; TIMESTAMP_LEN];
    for (position, (&byte, digit)) in bytes.iter().zip(digits.iter_mut()).enumerate() {
        if !byte.is_ascii_digit() {
            return Err(FormatError::InvalidDigit { position, byte });
        }
        *digit = byte - b'0';
    }

    Ok(RegisterBlock {
        seconds: Bcd::new(0, 0),
        clock_halt: false,
        minutes: Bcd::new(digits[9], digits[10]),
        hours: Bcd::new(digits[7], digits[8]),
        hour_mode: HourMode::TwentyFour,
        day: digits[6],
        date: Bcd::new(digits[4], digits[5]),
        month: Bcd::new(digits[2], digits[3]),
        year: Bcd::new(digits[0], digits[1]),
    })
}

/// Render a register block back into `YYMMDDWHHMM` form
///
/// Nibbles above 9 have no digit and come out as `?`.
pub fn format(block: &RegisterBlock) -> String<TIMESTAMP_LEN> {
    let nibbles = [
        block.year.tens,
        block.year.units,
        block.month.tens,
        block.month.units,
        block.date.tens,
        block.date.units,
        block.day,
        block.hours.tens,
        block.hours.units,
        block.minutes.tens,
        block.minutes.units,
    ];

    let mut out = String::new();
    for nibble in nibbles {
        let c = char::from_digit(nibble as u32, 10).unwrap_or('?');
        // Capacity matches the nibble count
        let _ = out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registers::RegisterBlock;
    use crate::weekday::Weekday;
    use proptest::prelude::*;
    use std::format;

    #[test]
    fn test_parse_reference_timestamp() {
        // 2024-02-04, Thursday, 12:30
        let block = parse(Some("24020441230")).unwrap();

        assert_eq!(block.year, Bcd::new(2, 4));
        assert_eq!(block.month, Bcd::new(0, 2));
        assert_eq!(block.date, Bcd::new(0, 4));
        assert_eq!(block.weekday(), Some(Weekday::Thursday));
        assert_eq!(block.hours, Bcd::new(1, 2));
        assert_eq!(block.minutes, Bcd::new(3, 0));
        assert_eq!(block.seconds, Bcd::new(0, 0));
        assert!(!block.clock_halt);
        assert_eq!(block.hour_mode, HourMode::TwentyFour);
    }

    #[test]
    fn test_parse_missing() {
        assert_eq!(parse(None), Err(FormatError::Missing));
    }

    #[test]
    fn test_parse_wrong_length() {
        assert_eq!(parse(Some("")), Err(FormatError::WrongLength(0)));
        assert_eq!(parse(Some("2402044123")), Err(FormatError::WrongLength(10)));
        assert_eq!(parse(Some("240204412300")), Err(FormatError::WrongLength(12)));
    }

    #[test]
    fn test_parse_invalid_digit() {
        assert_eq!(
            parse(Some("2402044123a")),
            Err(FormatError::InvalidDigit {
                position: 10,
                byte: b'a'
            })
        );
        assert_eq!(
            parse(Some(" 4020441230")),
            Err(FormatError::InvalidDigit {
                position: 0,
                byte: b' '
            })
        );
        assert_eq!(
            parse(Some("24-20441230")),
            Err(FormatError::InvalidDigit {
                position: 2,
                byte: b'-'
            })
        );
    }

    #[test]
    fn test_parse_accepts_out_of_range_digits() {
        // Month 00 and weekday 9 are still digits
        let block = parse(Some("24000491230")).unwrap();
        assert_eq!(block.month, Bcd::new(0, 0));
        assert_eq!(block.day, 9);
        assert!(block.check_ranges().is_err());
    }

    #[test]
    fn test_format_reference_timestamp() {
        let block = parse(Some("24020441230")).unwrap();
        assert_eq!(format(&block).as_str(), "24020441230");
        assert_eq!(format(&RegisterBlock::DEFAULT_TEST_TIME).as_str(), "20070951856");
    }

    #[test]
    fn test_format_marks_non_digit_nibbles() {
        let block = RegisterBlock {
            year: Bcd::new(0x0A, 0),
            ..RegisterBlock::DEFAULT_TEST_TIME
        };
        assert_eq!(format(&block).as_str(), "?0070951856");
    }

    /// Digits that fit their register field
    fn timestamp_digits() -> impl Strategy<Value = [u8; TIMESTAMP_LEN]> {
        (
            (0u8..=9, 0u8..=9),
            (0u8..=1, 0u8..=9),
            (0u8..=3, 0u8..=9),
            0u8..=7,
            (0u8..=3, 0u8..=9),
            (0u8..=7, 0u8..=9),
        )
            .prop_map(|(y, m, d, w, h, mi)| [y.0, y.1, m.0, m.1, d.0, d.1, w, h.0, h.1, mi.0, mi.1])
    }

    proptest! {
        #[test]
        fn prop_timestamp_survives_register_encoding(digits in timestamp_digits()) {
            let mut text: String<TIMESTAMP_LEN> = String::new();
            for d in digits {
                text.push((b'0' + d) as char).unwrap();
            }

            let block = parse(Some(text.as_str())).unwrap();
            let decoded = RegisterBlock::from_bytes(&block.to_bytes());

            prop_assert_eq!(format(&decoded), text);
            prop_assert_eq!(decoded.seconds, Bcd::new(0, 0));
        }

        #[test]
        fn prop_non_digit_is_rejected(position in 0usize..TIMESTAMP_LEN, byte in any::<u8>().prop_filter("non-digit ascii", |b| b.is_ascii() && !b.is_ascii_digit())) {
            let mut bytes = *b"24020441230";
            bytes[position] = byte;
            let text = core::str::from_utf8(&bytes).unwrap();

            prop_assert_eq!(parse(Some(text)), Err(FormatError::InvalidDigit { position, byte }));
        }
    }
}
