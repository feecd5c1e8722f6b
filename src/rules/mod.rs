//! Rule matching for remap-theme.
//!
//! This module handles:
//! - Compiling host and user patterns
//! - Selecting every rule that matches a resource address, in table order

pub mod matcher;

pub use matcher::{CompiledRule, RuleTable};
