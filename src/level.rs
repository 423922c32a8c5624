//! Log severity levels.
//!
//! Levels are totally ordered by ordinal position; comparisons never go
//! through the string form. `None` is the bottom sentinel and only shows up
//! as a degenerate filter reference, never as a meaningful message level.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Severity of a log record, ordered from `None` (bottom) to `Severe`.
#[repr(u8)]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Level {
    None,
    Debug,
    Fine,
    Info,
    Warning,
    Error,
    Severe,
}

impl Level {
    /// Upper-case name of the level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Debug => "DEBUG",
            Self::Fine => "FINE",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Severe => "SEVERE",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a level name does not parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown log level: {0}")]
pub struct ParseLevelError(pub String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "NONE" => Ok(Self::None),
            "DEBUG" => Ok(Self::Debug),
            "FINE" => Ok(Self::Fine),
            "INFO" => Ok(Self::Info),
            "WARNING" => Ok(Self::Warning),
            "ERROR" => Ok(Self::Error),
            "SEVERE" => Ok(Self::Severe),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}
