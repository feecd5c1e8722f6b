//! Configuration loading and parsing for remap-theme.
//!
//! This module handles:
//! - TOML config file parsing
//! - Rule and style override definitions
//! - The built-in default rule set

pub mod parser;
pub mod types;

pub use parser::{default_config_path, load_config, parse_config_file, parse_config_str};
pub use types::{Config, LoadedConfig, Rule, StyleOverride, default_rules};
