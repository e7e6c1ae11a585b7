//! Reads one position fix from a serial GPS and prints it.

use clap::Parser;
use log::{debug, info};

use std::process;
use std::time::Duration;

use gpsread::config::{Cli, Settings};
use gpsread::err::AppError;
use gpsread::{format, read_fix, TAG_LENGTH};

/// The sentence type carrying the fix data.
const GGA_TAG: &[u8; TAG_LENGTH] = b"GPGGA";

/// Upper bound for a single blocking read, so the reader loop keeps
/// polling and the deadline stays live.
const READ_TIMEOUT: Duration = Duration::from_millis(100);

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    if let Err(e) = run(Cli::parse()) {
        eprintln!("{}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let settings = Settings::resolve(cli)?;
    debug!("resolved settings: {:?}", settings);

    let mut port = serialport::new(settings.device.as_str(), settings.baudrate)
        .data_bits(serialport::DataBits::Eight)
        .timeout(READ_TIMEOUT)
        .open()?;
    info!(
        "reading {} at {} baud, giving up after {}s",
        settings.device, settings.baudrate, settings.timeout
    );

    let fix = read_fix(&mut port, GGA_TAG, Duration::from_secs(settings.timeout))?;
    print!("{}", format::format_fix(&fix, settings.unit));
    Ok(())
}
