//! Events that trigger link state transitions

/// Events reported by the RTC transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkEvent {
    /// Bus configured at exactly the requested rate
    BusConfigured,
    /// Bus configuration failed or the rate was clamped
    BusRejected,
    /// Presence probe write and read both transferred data
    ProbeAnswered,
    /// Presence probe failed in either phase
    ProbeFailed,
    /// Bus shut down and lines released
    BusReleased,
}
