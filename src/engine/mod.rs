//! The remap engine.
//!
//! This module handles:
//! - Per-view remapping state and the baseline/remapping provider switch
//! - Applying and releasing style overrides for matching rules
//! - Deriving the buffer label and remote indicator
//!
//! Each lifecycle event runs one synchronous pass: release the view's
//! previous overrides, match the rule table against the resource address,
//! apply the new overrides, then derive the label markup.

pub mod apply;
pub mod label;
pub mod state;
pub mod text;

pub use apply::apply_overrides;
pub use label::{Decoration, decorate, derive_buffer_label, derive_remote_indicator, short_host};
pub use state::{EngineState, LabelFn, LabelProvider};
pub use text::{Span, StyledText};
