//! Tempora - DS1307 bring-up firmware
//!
//! Brings up the RTC on a Raspberry Pi Pico, writes a known time, reads it
//! back, writes the configured time and reads it back again. Everything
//! goes to the defmt console.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::i2c::{self, I2c, InterruptHandler as I2cInterruptHandler};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Delay, Timer};
use {defmt_rtt as _, panic_probe as _};

use tempora_drivers::rtc::{wait_for_presence, Ds1307, Ds1307Config, ProbePolicy};
use tempora_hal_rp2040::{Rp2040BusPins, Rp2040I2c};

mod board;
mod report;

/// Embedded board configuration (compiled into firmware)
/// Edit board.toml and rebuild to customize
const BOARD_CONFIG: &str = include_str!("../board.toml");

bind_interrupts!(struct Irqs {
    I2C0_IRQ => I2cInterruptHandler<I2C0>;
});

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    Timer::after_millis(100).await;

    info!("Tempora RTC test starting...");

    let config = board::load(BOARD_CONFIG);
    board::check_wiring(&config);

    let led_on = if config.status_led.inverted {
        Level::Low
    } else {
        Level::High
    };
    let mut led = Output::new(p.PIN_25, led_on);

    let mut bus_config = i2c::Config::default();
    bus_config.frequency = config.i2c.frequency_hz();
    bus_config.sda_pullup = config.i2c.sda.pull_up;
    bus_config.scl_pullup = config.i2c.scl.pull_up;
    let bus = I2c::new_async(p.I2C0, p.PIN_17, p.PIN_16, Irqs, bus_config);
    let bus = Rp2040I2c::new(bus, board::RTC_BUS);

    let pins = match Rp2040BusPins::new(board::RTC_BUS, board::RTC_SDA, board::RTC_SCL) {
        Ok(pins) => pins.with_pull_ups(config.i2c.sda.pull_up, config.i2c.scl.pull_up),
        Err(e) => {
            error!("RTC pins unusable: {}", e);
            halt().await
        }
    };

    let mut rtc = Ds1307::new(bus, pins, Ds1307Config::from(&config));

    match rtc.init() {
        Ok(()) => info!("RTC INIT Success"),
        Err(e) => {
            error!("RTC INIT Failure: {}", e);
            halt().await
        }
    }

    let policy = ProbePolicy::from(&config.rtc);
    match wait_for_presence(&mut rtc, &mut Delay, policy) {
        Ok(attempt) => info!("DS1307 answered on attempt {}/{}", attempt, policy.attempts),
        Err(e) => {
            error!("DS1307 not found: {}", e);
            rtc.deinit();
            halt().await
        }
    }

    Timer::after_secs(1).await;
    match rtc.write_default_time() {
        Ok(_) => info!("Default time written"),
        Err(e) => error!("Default time write failed: {}", e),
    }

    Timer::after_secs(1).await;
    read_and_print(&mut rtc);

    Timer::after_secs(10).await;
    let set_time = board::set_time(&config);
    match rtc.write_timestamp(Some(set_time)) {
        Ok(_) => info!("Time set to {}", set_time),
        Err(e) => error!("Time write failed: {}", e),
    }

    Timer::after_secs(1).await;
    read_and_print(&mut rtc);

    rtc.deinit();
    led.set_level(Level::from(!bool::from(led_on)));
    info!("RTC test complete");

    halt().await
}

fn read_and_print<I2C, PINS>(rtc: &mut Ds1307<I2C, PINS>)
where
    I2C: tempora_hal::I2cBus,
    PINS: tempora_hal::BusPins,
{
    match rtc.read_time() {
        Ok(block) => report::print_clock(&block),
        Err(e) => error!("Time read failed: {}", e),
    }
}

/// Park the executor once there is nothing left to do
async fn halt() -> ! {
    loop {
        Timer::after_secs(60).await;
    }
}
