//! Pipeline configuration from environment variables.
//!
//! All values are loaded from `LOGCAST_*` environment variables with
//! sensible defaults. Invalid values fall back to defaults without crashing.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |---|---|---|
//! | `LOGCAST_ENABLED` | true | Global logging gate |
//! | `LOGCAST_DEBUG_ENABLED` | true | `Debug`-level gate |
//! | `LOGCAST_DEFAULT_LEVEL` | info | Level used when a call omits one |
//! | `LOGCAST_STORE_HISTORY` | false | Retain published records |
//! | `LOGCAST_HISTORY_LIMIT` | unset | History cap (unset or 0 = unbounded) |

use crate::level::Level;

/// Initial state for a [`Pipeline`](crate::Pipeline).
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub enabled: bool,
    pub debug_enabled: bool,
    pub default_level: Level,
    pub store_history: bool,
    /// `None` leaves the history buffer unbounded once retention is on.
    pub history_limit: Option<usize>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            debug_enabled: true,
            default_level: Level::Info,
            store_history: false,
            history_limit: None,
        }
    }
}

impl PipelineConfig {
    /// Load configuration from `LOGCAST_*` environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            enabled: parse_bool("LOGCAST_ENABLED", defaults.enabled),
            debug_enabled: parse_bool("LOGCAST_DEBUG_ENABLED", defaults.debug_enabled),
            default_level: parse_level("LOGCAST_DEFAULT_LEVEL", defaults.default_level),
            store_history: parse_bool("LOGCAST_STORE_HISTORY", defaults.store_history),
            history_limit: parse_limit("LOGCAST_HISTORY_LIMIT"),
        }
    }
}

/// Parse a boolean env var, returning `default` on missing or invalid.
fn parse_bool(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(val) => match val.to_ascii_lowercase().as_str() {
            "1" | "true" | "on" => true,
            "0" | "false" | "off" => false,
            _ => default,
        },
        Err(_) => default,
    }
}

/// Parse a level name env var, returning `default` on missing or invalid.
fn parse_level(key: &str, default: Level) -> Level {
    std::env::var(key)
        .ok()
        .and_then(|val| val.parse::<Level>().ok())
        .unwrap_or(default)
}

/// Parse the history cap; unset, invalid, or zero all mean unbounded.
fn parse_limit(key: &str) -> Option<usize> {
    std::env::var(key)
        .ok()
        .and_then(|val| val.parse::<usize>().ok())
        .filter(|&limit| limit > 0)
}
