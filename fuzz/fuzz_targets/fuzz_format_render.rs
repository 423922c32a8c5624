//! Fuzz target for record rendering.
//!
//! Tests that arbitrary text and identity fields cannot cause panics in
//! either formatter, and that the JSON form stays parseable.

#![no_main]

use chrono::Utc;
use libfuzzer_sys::fuzz_target;
use logcast::{DefaultFormatter, Formatter, JsonFormatter, Level, Origin, Record};

fuzz_target!(|input: (u8, &str, &str, &str, u32)| {
    let (level_byte, text, type_name, operation, line) = input;
    let level = match level_byte % 7 {
        0 => Level::None,
        1 => Level::Debug,
        2 => Level::Fine,
        3 => Level::Info,
        4 => Level::Warning,
        5 => Level::Error,
        _ => Level::Severe,
    };

    let record = Record::new(
        level,
        text,
        Utc::now(),
        Origin::new(type_name, operation, line),
    );

    // render() must never panic on any input
    let rendered = DefaultFormatter.render(&record);
    assert!(rendered.contains(level.as_str()));

    let json = JsonFormatter.render(&record);
    let _: serde_json::Value = serde_json::from_str(&json).expect("JSON form must parse");
});
