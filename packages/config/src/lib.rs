// ABOUTME: Configuration constants for the club data manager
// ABOUTME: Environment variable names, option identifiers and admin labels

pub mod constants;
pub mod env;

pub use env::{env_flag, env_parse, env_string, env_string_or};
