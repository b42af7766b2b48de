//! Build script for tempora-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates board.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
}

/// Validate board.toml at compile time
///
/// The firmware parses the same text at boot and falls back to defaults
/// on error; catching mistakes here keeps that fallback for flash
/// corruption rather than typos.
fn validate_config() {
    println!("cargo:rerun-if-changed=board.toml");

    let config_path = Path::new("board.toml");
    if !config_path.exists() {
        fail("board.toml not found", &["Create one in the tempora-firmware directory.".into()]);
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read board.toml", &[e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => fail(
            "Invalid TOML syntax in board.toml",
            &e.to_string().lines().map(String::from).collect::<Vec<_>>(),
        ),
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_i2c(&config, &mut errors);
    validate_rtc(&config, &mut errors);
    validate_status_led(&config, &mut errors);

    if !errors.is_empty() {
        fail("Invalid board configuration", &errors);
    }

    println!("cargo:warning=board.toml validated successfully");
}

/// Abort the build with a boxed error listing
fn fail(title: &str, lines: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        lines
            .iter()
            .map(|line| {
                let truncated = if line.len() > 62 {
                    format!("{}...", &line[..59])
                } else {
                    line.clone()
                };
                format!("║  • {:<62} ║", truncated)
            })
            .collect::<Vec<_>>()
            .join("\n")
    );
}

fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(table) = config.as_table() else {
        return;
    };

    for (name, value) in table {
        if !["i2c", "rtc", "status_led"].contains(&name.as_str()) {
            errors.push(format!("unknown section [{}]", name));
        } else if !value.is_table() {
            errors.push(format!("[{}] must be a table", name));
        }
    }
}

fn section<'a>(config: &'a toml::Value, name: &str) -> Option<&'a toml::value::Table> {
    config.get(name).and_then(|s| s.as_table())
}

/// Check an integer key against an inclusive range
fn check_int(
    table: &toml::value::Table,
    section: &str,
    key: &str,
    range: std::ops::RangeInclusive<i64>,
    errors: &mut Vec<String>,
) {
    match table.get(key) {
        None => {}
        Some(toml::Value::Integer(v)) if range.contains(v) => {}
        Some(toml::Value::Integer(_)) => errors.push(format!(
            "[{}] {} must be {}-{}",
            section,
            key,
            range.start(),
            range.end()
        )),
        Some(_) => errors.push(format!("[{}] {} must be an integer", section, key)),
    }
}

/// Check a pin string like "gpio16", "^gpio17" or "!gpio25"
fn check_pin(table: &toml::value::Table, section: &str, key: &str, errors: &mut Vec<String>) {
    let Some(value) = table.get(key) else {
        return;
    };
    let Some(text) = value.as_str() else {
        errors.push(format!("[{}] {} must be a string", section, key));
        return;
    };

    let number = text.trim_start_matches(['!', '^']).strip_prefix("gpio");
    match number.and_then(|n| n.parse::<u8>().ok()) {
        Some(pin) if pin < 30 => {}
        _ => errors.push(format!("[{}] {} '{}' is not gpio0-gpio29", section, key, text)),
    }
}

fn validate_i2c(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(i2c) = section(config, "i2c") else {
        return;
    };

    check_int(i2c, "i2c", "bus", 0..=1, errors);
    check_int(i2c, "i2c", "speed_khz", 1..=1000, errors);
    check_int(i2c, "i2c", "timeout_us", 0..=u32::MAX as i64, errors);
    check_pin(i2c, "i2c", "sda_pin", errors);
    check_pin(i2c, "i2c", "scl_pin", errors);
}

fn validate_rtc(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(rtc) = section(config, "rtc") else {
        return;
    };

    check_int(rtc, "rtc", "address", 0..=0x7F, errors);
    check_int(rtc, "rtc", "probe_attempts", 1..=255, errors);
    check_int(rtc, "rtc", "probe_delay_ms", 0..=u32::MAX as i64, errors);

    match rtc.get("set_time") {
        None => {}
        Some(toml::Value::String(text)) => {
            if text.len() != 11 || !text.bytes().all(|b| b.is_ascii_digit()) {
                errors.push(format!(
                    "[rtc] set_time '{}' must be 11 digits (YYMMDDWHHMM)",
                    text
                ));
            }
        }
        Some(_) => errors.push("[rtc] set_time must be a string".into()),
    }
}

fn validate_status_led(config: &toml::Value, errors: &mut Vec<String>) {
    if let Some(led) = section(config, "status_led") {
        check_pin(led, "status_led", "pin", errors);
    }
}
