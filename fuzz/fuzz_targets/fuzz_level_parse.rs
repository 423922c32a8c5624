//! Fuzz target for level name parsing.
//!
//! Tests that arbitrary strings cannot cause panics when parsed as level
//! names - only Ok or Err.

#![no_main]

use libfuzzer_sys::fuzz_target;
use logcast::Level;

fuzz_target!(|data: &str| {
    let _ = data.parse::<Level>();
});
