//! Presence polling
//!
//! The transport reports one probe result and never retries. Bring-up
//! code that wants to wait for a slow-starting chip uses this loop
//! instead: probe, back off, probe again, up to a fixed attempt count.

use embedded_hal::delay::DelayNs;
use tempora_core::config::RtcConfig;
use tempora_hal::{BusPins, I2cBus};

use super::ds1307::Ds1307;
use super::error::Ds1307Error;

/// Retry bound and backoff for presence polling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProbePolicy {
    /// Probes before giving up (0 is treated as 1)
    pub attempts: u8,
    /// Blocking delay after each failed probe, in milliseconds
    pub delay_ms: u32,
}

impl Default for ProbePolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            delay_ms: 2000,
        }
    }
}

impl From<&RtcConfig> for ProbePolicy {
    fn from(rtc: &RtcConfig) -> Self {
        Self {
            attempts: rtc.probe_attempts,
            delay_ms: rtc.probe_delay_ms,
        }
    }
}

/// Probe until the chip answers or the attempts run out
///
/// Returns the 1-based attempt that succeeded. No delay follows the final
/// failed attempt.
pub fn wait_for_presence<I2C, PINS, D>(
    rtc: &mut Ds1307<I2C, PINS>,
    delay: &mut D,
    policy: ProbePolicy,
) -> Result<u8, Ds1307Error>
where
    I2C: I2cBus,
    PINS: BusPins,
    D: DelayNs,
{
    let attempts = policy.attempts.max(1);

    for attempt in 1..=attempts {
        if rtc.probe() {
            return Ok(attempt);
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("DS1307 probe {}/{} failed", attempt, attempts);

        if attempt < attempts {
            delay.delay_ms(policy.delay_ms);
        }
    }

    Err(Ds1307Error::PresenceTimeout { attempts })
}
