//! DS1307 driver errors

use tempora_core::timestamp::FormatError;
use tempora_hal::BusError;

/// Bus transaction a failure happened in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Presence probe, pointer write
    ProbeWrite,
    /// Presence probe, one-byte read
    ProbeRead,
    /// Time read, register pointer write
    PointerWrite,
    /// Time read, seven-byte block read
    BlockRead,
    /// Time write, pointer plus block
    BlockWrite,
}

/// DS1307 driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ds1307Error {
    /// Bus could not run at exactly the requested clock rate
    InitMismatch { requested: u32, achieved: u32 },
    /// Bus reported an error
    Bus { phase: Phase, error: BusError },
    /// Transaction completed without moving a single byte
    ShortTransfer { phase: Phase },
    /// Timestamp string rejected before any bus traffic
    Format(FormatError),
    /// Chip never answered a presence probe
    PresenceTimeout { attempts: u8 },
}

impl From<FormatError> for Ds1307Error {
    fn from(e: FormatError) -> Self {
        Ds1307Error::Format(e)
    }
}

impl Ds1307Error {
    /// Bus phase the error came from, if it came from the bus
    pub fn phase(&self) -> Option<Phase> {
        match self {
            Ds1307Error::Bus { phase, .. } | Ds1307Error::ShortTransfer { phase } => Some(*phase),
            _ => None,
        }
    }
}
