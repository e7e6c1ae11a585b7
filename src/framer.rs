//! Sentence framing for the raw byte stream of a serial GPS.
//!
//! NMEA 0183 sentences arrive as `$...<CR><LF>`. The framer scans for
//! the `$`, accumulates everything up to the carriage return into a
//! bounded buffer, and the reader loop hands complete candidate
//! sentences to the field parser until one of them yields a fix.

use arrayvec::ArrayVec;

use std::time::{Duration, Instant};
use std::{io, mem, thread};

use crate::err::ReadError;
use crate::parser::{self, Fix};

/// Sentences longer than this are discarded and framing resets.
pub const MAX_SENTENCE_LEN: usize = 256;
/// Length of the sentence tag, e.g. `GPGGA`.
pub const TAG_LENGTH: usize = 5;
/// How long to yield when the device has nothing for us.
const POLL_INTERVAL: Duration = Duration::from_micros(250);

/// A complete sentence body, `$` and `<CR>` stripped.
pub type Sentence = ArrayVec<[u8; MAX_SENTENCE_LEN]>;

#[derive(Debug)]
enum State {
    WaitingForStart,
    Accumulating,
}

/// Reassembles `$` delimited sentences from a byte stream, one byte at
/// a time.
#[derive(Debug)]
pub struct Framer {
    state: State,
    buf: Sentence,
}

impl Framer {
    pub fn new() -> Self {
        Framer {
            state: State::WaitingForStart,
            buf: ArrayVec::new(),
        }
    }

    /// Feed a single byte to the state machine. Returns the accumulated
    /// sentence body when `byte` completes one.
    ///
    /// An overlong sentence is dropped on the floor and the framer goes
    /// back to waiting for the next `$`.
    pub fn push(&mut self, byte: u8) -> Option<Sentence> {
        match self.state {
            State::WaitingForStart => {
                if byte == b'$' {
                    self.state = State::Accumulating;
                    self.buf.clear();
                }
                None
            }
            State::Accumulating => {
                if byte == b'\r' {
                    self.state = State::WaitingForStart;
                    return Some(mem::replace(&mut self.buf, ArrayVec::new()));
                }
                if self.buf.try_push(byte).is_err() {
                    debug!("sentence exceeded {} bytes, resetting", MAX_SENTENCE_LEN);
                    self.state = State::WaitingForStart;
                    self.buf.clear();
                }
                None
            }
        }
    }
}

impl Default for Framer {
    fn default() -> Self {
        Framer::new()
    }
}

/// Reads bytes from `input` until one sentence with the given tag has
/// been framed and parsed into a usable fix, or `timeout` has elapsed.
///
/// Reads are polled: a read that yields no data sleeps briefly and
/// retries, and the deadline is checked on every iteration. Sentences
/// with the wrong tag, a malformed body or no fix yet are discarded and
/// framing resumes with the next `$`. Only a hard I/O error aborts the
/// loop early.
pub fn read_fix<R: io::Read>(
    input: &mut R,
    tag: &[u8; TAG_LENGTH],
    timeout: Duration,
) -> Result<Fix, ReadError> {
    let deadline = Instant::now() + timeout;
    let mut framer = Framer::new();
    let mut byte = [0u8; 1];
    loop {
        if Instant::now() >= deadline {
            return Err(ReadError::TimedOut);
        }
        match input.read(&mut byte) {
            Ok(0) => {
                thread::sleep(POLL_INTERVAL);
                continue;
            }
            Ok(_) => (),
            Err(ref e) if is_retryable(e.kind()) => {
                thread::sleep(POLL_INTERVAL);
                continue;
            }
            Err(e) => return Err(ReadError::Io(e)),
        }
        let sentence = match framer.push(byte[0]) {
            Some(s) => s,
            None => continue,
        };
        if sentence.len() < TAG_LENGTH || sentence[..TAG_LENGTH] != tag[..] {
            continue;
        }
        match parser::parse(&sentence) {
            Ok(fix) => return Ok(fix),
            Err(e) => debug!("discarding sentence: {}", e),
        }
    }
}

/// "No data available" comes back from a non-blocking or short-timeout
/// read in several guises; none of them is fatal.
fn is_retryable(kind: io::ErrorKind) -> bool {
    match kind {
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut | io::ErrorKind::Interrupted => true,
        _ => false,
    }
}
