//! Day-of-week register values
//!
//! The chip stores the weekday as a free-running 3-bit counter; this
//! firmware uses 0 = Sunday through 6 = Saturday.

/// Three-letter display names, indexed by register value
const NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Day of the week
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Weekday {
    Sunday = 0,
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
}

impl Weekday {
    /// All weekdays in register order
    pub const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// Map a raw register value to a weekday
    ///
    /// Returns `None` for 7, the one 3-bit value with no weekday.
    pub fn from_register(value: u8) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }

    /// Register value for this weekday
    pub const fn to_register(self) -> u8 {
        self as u8
    }

    /// Short display name ("Sun", "Mon", ...)
    pub fn name(self) -> &'static str {
        NAMES[self as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_mapping() {
        assert_eq!(Weekday::from_register(0), Some(Weekday::Sunday));
        assert_eq!(Weekday::from_register(4), Some(Weekday::Thursday));
        assert_eq!(Weekday::from_register(6), Some(Weekday::Saturday));
        assert_eq!(Weekday::from_register(7), None);
    }

    #[test]
    fn test_names_follow_register_order() {
        for (i, day) in Weekday::ALL.iter().enumerate() {
            assert_eq!(day.to_register() as usize, i);
            assert_eq!(day.name(), NAMES[i]);
        }
        assert_eq!(Weekday::Friday.name(), "Fri");
    }
}
