//! The styling-system side of remap-theme.
//!
//! This module handles:
//! - Attribute bundles and their merge rules
//! - A registry of named, inheritable base styles
//! - Per-view temporary overrides addressed by handles

pub mod attributes;
pub mod registry;
pub mod view;

pub use attributes::Attributes;
pub use registry::{PRIMARY_LABEL_STYLE, REMOTE_INDICATOR_STYLE, StyleRegistry};
pub use view::{OverrideHandle, StyleError, StyleSystem, ViewStyles};
