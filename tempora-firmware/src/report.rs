//! Console output of the clock registers

use defmt::*;
use tempora_core::{timestamp, RegisterBlock, Weekday};

/// Print the block digit by digit, as the chip stores it
pub fn print_clock(block: &RegisterBlock) {
    let day = block.weekday().map(Weekday::name).unwrap_or("???");

    info!(
        " Date :: 20{}{}/{}{}/{}{} {}",
        block.year.tens,
        block.year.units,
        block.month.tens,
        block.month.units,
        block.date.tens,
        block.date.units,
        day
    );
    info!(
        " Time :: {}{}:{}{}:{}{}",
        block.hours.tens,
        block.hours.units,
        block.minutes.tens,
        block.minutes.units,
        block.seconds.tens,
        block.seconds.units
    );

    debug!(" As set_time :: {}", timestamp::format(block).as_str());

    if let Some(pm) = block.is_pm() {
        info!("         {}", if pm { "PM" } else { "AM" });
    }
    if block.clock_halt {
        warn!("Oscillator halted (CH set)");
    }
    if let Err(field) = block.check_ranges() {
        warn!("Register {} out of range", field);
    }
}
