// ABOUTME: Helpers for reading typed values from environment variables
// ABOUTME: Falls back to defaults and logs values that fail to parse

use std::env;
use std::str::FromStr;

use tracing::warn;

/// Read a string variable, treating empty values as unset.
pub fn env_string(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Read a string variable or return the default.
pub fn env_string_or(name: &str, default: &str) -> String {
    env_string(name).unwrap_or_else(|| default.to_string())
}

/// Read a boolean flag. Accepts `true/false`, `1/0`, `yes/no` (case-insensitive).
pub fn env_flag(name: &str) -> bool {
    match env_string(name) {
        Some(value) => match value.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" => true,
            "false" | "0" | "no" => false,
            other => {
                warn!(variable = name, value = other, "Unrecognized boolean, using false");
                false
            }
        },
        None => false,
    }
}

/// Parse a variable into `T`, returning the raw value on failure so callers can report it.
pub fn env_parse<T: FromStr>(name: &str) -> Result<Option<T>, String> {
    match env_string(name) {
        Some(raw) => raw.trim().parse::<T>().map(Some).map_err(|_| raw),
        None => Ok(None),
    }
}
