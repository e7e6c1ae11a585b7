//! Run configuration.
//!
//! Settings are layered the way the classic serial tools do it:
//! compiled-in defaults, then `/etc/gpsread.toml`, then a per-user
//! `~/.gpsread.toml`, then command line flags. Validation happens once,
//! after the layers are merged.

use clap::Parser;
use serde::Deserialize;

use std::path::{Path, PathBuf};
use std::{env, fs, io};

use crate::err::ConfigError;
use crate::format::PosUnit;

/// Seconds to wait for a fix before giving up.
pub const DEFAULT_TIMEOUT: u64 = 15;
/// NMEA talkers mostly still default to 4800 baud.
pub const DEFAULT_BAUD: u32 = 4800;
#[cfg(target_os = "macos")]
pub const DEFAULT_DEVICE: &str = "/dev/tty.usbserial";
#[cfg(not(target_os = "macos"))]
pub const DEFAULT_DEVICE: &str = "/dev/ttyUSB0";
pub const DEFAULT_UNIT: PosUnit = PosUnit::LlDecimal;

/// The standard POSIX serial line rates.
const VALID_BAUDS: [u32; 15] = [
    50, 75, 110, 134, 150, 200, 300, 600, 1200, 1800, 2400, 4800, 9600, 19200, 38400,
];

/// Command line options. Anything not given here falls back to the
/// config files and then to the compiled-in defaults.
#[derive(Debug, Default, Parser)]
#[command(version, about = "Read, parse and display a position fix from a serial GPS.")]
pub struct Cli {
    /// Time to wait for the GPS, in seconds [default: 15]
    #[arg(short, long)]
    pub timeout: Option<u64>,
    /// GPS device baudrate [default: 4800]
    #[arg(short, long)]
    pub baudrate: Option<u32>,
    /// GPS tty device
    #[arg(short, long)]
    pub device: Option<String>,
    /// Units to show the position in [default: LLDECIMAL]
    #[arg(short, long)]
    pub units: Option<String>,
}

/// One optional override per setting, as read from a config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    timeout: Option<u64>,
    baudrate: Option<u32>,
    device: Option<String>,
    units: Option<String>,
}

/// The resolved, validated configuration for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub timeout: u64,
    pub baudrate: u32,
    pub device: String,
    pub unit: PosUnit,
}

impl Settings {
    /// Merges defaults, the system and user config files and the
    /// command line, then validates the result.
    pub fn resolve(cli: Cli) -> Result<Settings, ConfigError> {
        let mut files = Vec::new();
        for path in config_paths() {
            if let Some(file) = load_file(&path)? {
                files.push(file);
            }
        }
        merge(files, cli)
    }
}

fn merge(files: Vec<FileConfig>, cli: Cli) -> Result<Settings, ConfigError> {
    let mut timeout = DEFAULT_TIMEOUT;
    let mut baudrate = DEFAULT_BAUD;
    let mut device = DEFAULT_DEVICE.to_owned();
    let mut unit_name: Option<String> = None;

    for file in files {
        if let Some(t) = file.timeout {
            timeout = t;
        }
        if let Some(b) = file.baudrate {
            baudrate = b;
        }
        if let Some(d) = file.device {
            device = d;
        }
        if let Some(u) = file.units {
            unit_name = Some(u);
        }
    }
    if let Some(t) = cli.timeout {
        timeout = t;
    }
    if let Some(b) = cli.baudrate {
        baudrate = b;
    }
    if let Some(d) = cli.device {
        device = d;
    }
    if let Some(u) = cli.units {
        unit_name = Some(u);
    }

    let unit = match unit_name {
        Some(name) => match PosUnit::from_name(&name) {
            Some(unit) => unit,
            None => return Err(ConfigError::InvalidUnit(name)),
        },
        None => DEFAULT_UNIT,
    };
    if !is_valid_baud(baudrate) {
        return Err(ConfigError::InvalidBaud(baudrate));
    }
    // A usable tty path looks like "/dev/tty...", 8 characters at least.
    if device.len() < 8 {
        return Err(ConfigError::InvalidDevice(device));
    }

    Ok(Settings {
        timeout,
        baudrate,
        device,
        unit,
    })
}

/// `/etc/gpsread.toml`, then the per-user file.
fn config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("/etc/gpsread.toml")];
    if let Some(home) = env::var_os("HOME") {
        paths.push(Path::new(&home).join(".gpsread.toml"));
    }
    paths
}

/// Reads one config file. A missing file is fine, a malformed one is
/// a startup error naming the file.
fn load_file(path: &Path) -> Result<Option<FileConfig>, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(ref e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(ConfigError::File(
                path.display().to_string(),
                e.to_string(),
            ))
        }
    };
    match toml::from_str(&text) {
        Ok(file) => Ok(Some(file)),
        Err(e) => Err(ConfigError::File(
            path.display().to_string(),
            e.to_string(),
        )),
    }
}

pub fn is_valid_baud(baud: u32) -> bool {
    VALID_BAUDS.contains(&baud)
}
