//! Build script for repcount-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates device.toml at compile time
//! - Compiles the validated config and pin selection into the firmware

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use repcount_core::config::{
    parse_pin_string, ConfigError, DeviceConfig, DisplayConfig, PinConfig, SleepMode,
    TimingConfig,
};
use serde::Deserialize;

/// Layout of device.toml
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct DeviceFile {
    #[serde(default)]
    initial_level: bool,
    #[serde(default)]
    sleep_mode: SleepMode,
    #[serde(default)]
    timing: TimingConfig,
    pins: PinsSection,
    #[serde(default)]
    display: DisplayConfig,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct PinsSection {
    button: String,
    wake: Option<String>,
}

fn main() {
    setup_linker();
    let config = load_config();
    generate_config(&config);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Read, parse and validate device.toml
fn load_config() -> DeviceConfig {
    println!("cargo:rerun-if-changed=device.toml");

    let config_path = Path::new("device.toml");

    if !config_path.exists() {
        fail(
            "device.toml not found!",
            &[
                "The firmware requires a device.toml configuration file.".into(),
                "Please create one in the repcount-firmware directory.".into(),
            ],
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read device.toml", &[format!("Error: {}", e)]),
    };

    let file: DeviceFile = match toml::from_str(&content) {
        Ok(file) => file,
        Err(e) => fail(
            "Invalid device.toml",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        ),
    };

    let mut errors = Vec::new();

    let button = parse_pin(&file.pins.button, "pins.button", &mut errors);
    let wake = match &file.pins.wake {
        Some(wake) => parse_pin(wake, "pins.wake", &mut errors),
        None => button,
    };

    if !errors.is_empty() {
        fail("Invalid pin configuration", &errors);
    }

    let config = DeviceConfig {
        timing: file.timing,
        button,
        wake,
        initial_level: file.initial_level,
        sleep_mode: file.sleep_mode,
        display: file.display,
    };

    if let Err(e) = config.validate() {
        fail("Invalid device configuration", &[describe(e)]);
    }

    println!("cargo:warning=device.toml validated successfully");
    config
}

fn parse_pin(value: &str, key: &str, errors: &mut Vec<String>) -> PinConfig {
    match parse_pin_string(value) {
        Some(pin) => pin,
        None => {
            errors.push(format!(
                "{} = '{}' is not a pin (expected gpioN, !gpioN or ^gpioN)",
                key, value
            ));
            PinConfig::default()
        }
    }
}

fn describe(error: ConfigError) -> String {
    match error {
        ConfigError::ZeroDebounce => "timing.debounce_ms must be greater than 0".into(),
        ConfigError::ZeroFrameInterval => "timing.frame_interval_ms must be greater than 0".into(),
        ConfigError::ZeroSleepInterval => "timing.sleep_interval_ms must be greater than 0".into(),
        ConfigError::DebounceTooLong => {
            "timing.debounce_ms must be shorter than timing.sleep_interval_ms".into()
        }
        ConfigError::InvalidPin(pin) => format!("gpio{} does not exist on the RP2040", pin),
        ConfigError::WakePinConflict(pin) => {
            format!("pins.wake uses gpio{} with a different prefix than pins.button", pin)
        }
    }
}

/// Write the config constant and pin macros to OUT_DIR
fn generate_config(config: &DeviceConfig) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let separate_wake = !config.shares_wake_pin();

    let mut out = String::new();
    out.push_str("// Generated by build.rs from device.toml\n\n");
    out.push_str(&format!(
        "pub const DEVICE_CONFIG: ::repcount_core::config::DeviceConfig = \
         ::repcount_core::config::DeviceConfig {{\n\
         \x20   timing: ::repcount_core::config::TimingConfig {{\n\
         \x20       debounce_ms: {},\n\
         \x20       frame_interval_ms: {},\n\
         \x20       sleep_interval_ms: {},\n\
         \x20       wake_guard_ms: {},\n\
         \x20   }},\n\
         \x20   button: {},\n\
         \x20   wake: {},\n\
         \x20   initial_level: {},\n\
         \x20   sleep_mode: ::repcount_core::config::SleepMode::{:?},\n\
         \x20   display: ::repcount_core::config::DisplayConfig {{ i2c_address: {:#04x} }},\n\
         }};\n\n",
        config.timing.debounce_ms,
        config.timing.frame_interval_ms,
        config.timing.sleep_interval_ms,
        config.timing.wake_guard_ms,
        pin_literal(&config.button),
        pin_literal(&config.wake),
        config.initial_level,
        config.sleep_mode,
        config.display.i2c_address,
    ));
    out.push_str(&pin_macro("button_pin", config.button.pin));
    if separate_wake {
        out.push_str(&pin_macro("wake_pin", config.wake.pin));
    }

    fs::write(out_dir.join("device_config.rs"), out).unwrap();

    println!("cargo:rustc-check-cfg=cfg(separate_wake_pin)");
    println!("cargo:rustc-check-cfg=cfg(button_active_low)");
    if separate_wake {
        println!("cargo:rustc-cfg=separate_wake_pin");
    }
    if config.button.inverted {
        println!("cargo:rustc-cfg=button_active_low");
    }
}

fn pin_literal(pin: &PinConfig) -> String {
    format!(
        "::repcount_core::config::PinConfig {{ pin: {}, inverted: {}, pull_up: {} }}",
        pin.pin, pin.inverted, pin.pull_up
    )
}

/// Macro selecting the peripheral for a configured GPIO
fn pin_macro(name: &str, pin: u8) -> String {
    format!(
        "macro_rules! {} {{\n    ($p:ident) => {{\n        $p.PIN_{}\n    }};\n}}\n\n",
        name, pin
    )
}

/// Abort the build with a boxed message
fn fail(title: &str, lines: &[String]) -> ! {
    let body = lines
        .iter()
        .map(|line| {
            let truncated = if line.chars().count() > 62 {
                format!("{}...", line.chars().take(59).collect::<String>())
            } else {
                line.to_string()
            };
            format!("║  • {:<62} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n");

    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title, body
    );
}
