use std::{io, num, str};

quick_error! {
    /// Reasons a framed sentence is rejected by the field parser.
    ///
    /// All of these are recoverable: the reader loop discards the
    /// sentence and resumes waiting for the next `$`.
    #[derive(Debug)]
    pub enum ParseError {
        NoFix {
            display("sentence carries no position fix")
        }
        MissingFields(count: usize) {
            display("sentence has only {} fields", count)
        }
        InvalidValue(msg: &'static str) {
            display("invalid value: {}", msg)
        }
        InvalidCoord(val: f64, max: f64) {
            display("coordinate {} should be between {} and {}", val, max * -1.0, max)
        }
        Time(err: chrono::format::ParseError) {
            from()
            display("failed to parse UTC field: {}", err)
            cause(err)
        }
        Degrees(err: num::ParseIntError) {
            from()
            display("failed to parse degrees: {}", err)
            cause(err)
        }
        Minutes(err: num::ParseFloatError) {
            from()
            display("failed to parse minutes: {}", err)
            cause(err)
        }
        Encoding(err: str::Utf8Error) {
            from()
            display("sentence is not valid ASCII: {}", err)
            cause(err)
        }
    }
}

quick_error! {
    /// Errors that abort the reader loop.
    #[derive(Debug)]
    pub enum ReadError {
        Io(err: io::Error) {
            from()
            display("error reading GPS device: {}", err)
            cause(err)
        }
        TimedOut {
            display("Timed out trying to read GPS.")
        }
    }
}

quick_error! {
    /// Rejected settings, reported once at startup.
    #[derive(Debug)]
    pub enum ConfigError {
        InvalidBaud(baud: u32) {
            display("Invalid baudrate: {}", baud)
        }
        InvalidDevice(path: String) {
            display("Problem with GPS tty value: {}", path)
        }
        InvalidUnit(name: String) {
            display("Invalid position unit: {}", name)
        }
        File(path: String, detail: String) {
            display("Problem with config file '{}': {}", path, detail)
        }
    }
}

quick_error! {
    /// Anything that ends a run before a fix has been printed.
    #[derive(Debug)]
    pub enum AppError {
        Config(err: ConfigError) {
            from()
            display("{}", err)
            cause(err)
        }
        Device(err: serialport::Error) {
            from()
            display("Can't access GPS device: {}", err)
            cause(err)
        }
        Read(err: ReadError) {
            from()
            display("{}", err)
            cause(err)
        }
    }
}
