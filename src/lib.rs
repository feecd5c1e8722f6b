//! Remap-theme - remote-aware status label and style remapping for editor views.
//!
//! This library provides the core functionality for remap-theme, including:
//! - Configuration parsing for remap rules and extra base styles
//! - Rule matching against the `(host, user)` of the viewed resource
//! - Per-view style overrides that are released and reapplied on every pass
//! - Buffer label and remote indicator derivation
//!
//! # Example
//!
//! ```
//! use remap_theme::config::Config;
//! use remap_theme::engine::{LabelFn, StyledText};
//! use remap_theme::resource::ResourceAddress;
//! use remap_theme::session::{Session, ViewId};
//! use std::sync::Arc;
//!
//! let mut session = Session::from_config(&Config::default()).unwrap();
//!
//! let label: LabelFn = Arc::new(|_: &ResourceAddress| StyledText::plain("hosts"));
//! let indicator: LabelFn = Arc::new(|address: &ResourceAddress| {
//!     StyledText::plain(if address.is_remote() { "@" } else { "-" })
//! });
//!
//! let decoration = session.open_view(
//!     ViewId(1),
//!     "/ssh:root@server1.example.org:/etc/hosts",
//!     label,
//!     indicator,
//! );
//! assert_eq!(decoration.label.to_string(), "server1: hosts");
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod hooks;
pub mod resource;
pub mod rules;
pub mod session;
pub mod style;

pub use error::{RemapError, Result};
