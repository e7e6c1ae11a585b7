//! Reads a single position fix from a serial NMEA 0183 GPS receiver.
//!
//! The crate frames `$...<CR>` delimited sentences out of a raw byte
//! stream, parses the *GGA* sentence, and renders the resulting fix in a
//! handful of formats, including an Ordnance Survey (OSGB) National Grid
//! reference.

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
#[macro_use]
extern crate log;
#[macro_use]
extern crate quick_error;

pub mod config;
pub mod err;
pub mod format;
mod framer;
pub mod osgb;
pub mod parser;

pub use crate::err::{AppError, ConfigError, ParseError, ReadError};
pub use crate::framer::{read_fix, Framer, Sentence, MAX_SENTENCE_LEN, TAG_LENGTH};
pub use crate::parser::{Fix, FixQuality};
