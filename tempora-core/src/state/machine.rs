//! State machine definition

use super::events::LinkEvent;

/// Link states of one RTC handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkState {
    /// Bus not configured
    #[default]
    Uninitialized,
    /// Bus configured, chip not (or no longer) answering
    Initialized,
    /// Chip answered the last presence probe
    Present,
}

impl LinkState {
    /// Check if the chip answered the last probe
    pub fn is_present(&self) -> bool {
        matches!(self, LinkState::Present)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: LinkEvent) -> Self {
        use LinkEvent::*;
        use LinkState::*;

        match (self, event) {
            // Reconfiguring a live bus starts presence detection over
            (_, BusConfigured) => Initialized,
            (_, BusRejected) => Uninitialized,
            (_, BusReleased) => Uninitialized,

            (Initialized | Present, ProbeAnswered) => Present,
            (Present, ProbeFailed) => Initialized,

            // Probing an unconfigured bus says nothing about the chip
            _ => self,
        }
    }
}
