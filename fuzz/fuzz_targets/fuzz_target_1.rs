#![no_main]
#[macro_use]
extern crate libfuzzer_sys;
extern crate gpsread;

use gpsread::{parser, Framer};

fuzz_target!(|data: &[u8]| {
    let mut framer = Framer::new();
    for &byte in data {
        if let Some(sentence) = framer.push(byte) {
            let _ = parser::parse(&sentence);
        }
    }
});
