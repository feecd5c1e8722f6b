use crate::style::registry::resolve_with;
use crate::style::{Attributes, StyleRegistry};
use std::sync::Arc;

/// Opaque handle for a temporary style override.
///
/// Releasing the handle restores the style's prior appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverrideHandle(u64);

/// Errors reported by a styling system when it refuses an override.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StyleError {
	#[error("Unknown style: {style}")]
	UnknownStyle { style: String },
}

/// The styling-system interface the remap engine drives.
///
/// An implementation scopes overrides to a single view.
pub trait StyleSystem {
	/// Apply `attributes` on top of `style` in this view.
	fn apply_override(
		&mut self,
		style: &str,
		attributes: &Attributes,
	) -> Result<OverrideHandle, StyleError>;

	/// Remove a previously applied override.
	///
	/// Returns `false` if the handle was already released. Never fails.
	fn release_override(&mut self, handle: OverrideHandle) -> bool;
}

#[derive(Debug, Clone)]
struct ActiveOverride {
	handle: OverrideHandle,
	style: String,
	attributes: Attributes,
}

/// Per-view override stack layered on a shared [`StyleRegistry`].
///
/// Overrides stack in application order, so the last applied override wins
/// for each attribute it sets.
#[derive(Debug, Clone)]
pub struct ViewStyles {
	registry: Arc<StyleRegistry>,
	overrides: Vec<ActiveOverride>,
	next_handle: u64,
}

impl ViewStyles {
	pub fn new(registry: Arc<StyleRegistry>) -> Self {
		Self {
			registry,
			overrides: Vec::new(),
			next_handle: 0,
		}
	}

	/// The shared base registry.
	pub fn registry(&self) -> &Arc<StyleRegistry> {
		&self.registry
	}

	/// Number of overrides currently applied in this view.
	pub fn active_count(&self) -> usize {
		self.overrides.len()
	}

	/// Names of the styles that currently carry overrides, in application order.
	pub fn overridden_styles(&self) -> Vec<&str> {
		let mut names: Vec<&str> = Vec::new();
		for active in &self.overrides {
			if !names.contains(&active.style.as_str()) {
				names.push(&active.style);
			}
		}
		names
	}

	/// Effective attributes of `style` in this view, overrides and inheritance included.
	pub fn resolve(&self, style: &str) -> Option<Attributes> {
		resolve_with(style, |name| self.own_attributes(name))
	}

	fn own_attributes(&self, style: &str) -> Option<Attributes> {
		let mut attributes = self.registry.get(style)?.clone();
		for active in self.overrides.iter().filter(|o| o.style == style) {
			attributes.merge(&active.attributes);
		}
		Some(attributes)
	}
}

impl StyleSystem for ViewStyles {
	fn apply_override(
		&mut self,
		style: &str,
		attributes: &Attributes,
	) -> Result<OverrideHandle, StyleError> {
		if !self.registry.contains(style) {
			return Err(StyleError::UnknownStyle {
				style: style.to_string(),
			});
		}

		let handle = OverrideHandle(self.next_handle);
		self.next_handle += 1;
		self.overrides.push(ActiveOverride {
			handle,
			style: style.to_string(),
			attributes: attributes.clone(),
		});
		Ok(handle)
	}

	fn release_override(&mut self, handle: OverrideHandle) -> bool {
		match self.overrides.iter().position(|o| o.handle == handle) {
			Some(index) => {
				self.overrides.remove(index);
				true
			}
			None => false,
		}
	}
}
