use crate::style::Attributes;
use std::collections::{BTreeMap, HashSet};

/// Style used for the buffer's identification label in the status line.
pub const PRIMARY_LABEL_STYLE: &str = "mode-line-buffer-id";

/// Style used for the remote/mode indicator in the status line.
pub const REMOTE_INDICATOR_STYLE: &str = "mode-line-highlight";

/// Registry of named base styles.
///
/// Styles may inherit unspecified attributes from another style through the
/// `inherit` attribute. The registry only holds base definitions; temporary
/// per-view overrides live in [`ViewStyles`](crate::style::ViewStyles).
#[derive(Debug, Clone, Default)]
pub struct StyleRegistry {
	styles: BTreeMap<String, Attributes>,
}

impl StyleRegistry {
	/// Create an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Create a registry with the status-line styles a typical editor defines.
	pub fn with_defaults() -> Self {
		let mut registry = Self::new();
		registry.define(
			"default",
			Attributes {
				foreground: Some("Black".to_string()),
				background: Some("White".to_string()),
				..Default::default()
			},
		);
		registry.define(
			"mode-line",
			Attributes {
				foreground: Some("Black".to_string()),
				background: Some("Grey75".to_string()),
				inherit: Some("default".to_string()),
				..Default::default()
			},
		);
		registry.define(
			PRIMARY_LABEL_STYLE,
			Attributes {
				bold: Some(true),
				inherit: Some("mode-line".to_string()),
				..Default::default()
			},
		);
		registry.define(
			REMOTE_INDICATOR_STYLE,
			Attributes {
				underline: Some(true),
				inherit: Some("mode-line".to_string()),
				..Default::default()
			},
		);
		registry.define(
			"background",
			Attributes {
				inherit: Some("default".to_string()),
				..Default::default()
			},
		);
		registry
	}

	/// Define or replace a base style.
	pub fn define(&mut self, name: impl Into<String>, attributes: Attributes) {
		self.styles.insert(name.into(), attributes);
	}

	/// Whether a style with this name is defined.
	pub fn contains(&self, name: &str) -> bool {
		self.styles.contains_key(name)
	}

	/// The base definition of a style, without inheritance applied.
	pub fn get(&self, name: &str) -> Option<&Attributes> {
		self.styles.get(name)
	}

	/// Names of all defined styles, sorted.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.styles.keys().map(String::as_str)
	}

	/// Resolve a style's effective attributes, following the inheritance chain.
	pub fn resolve(&self, name: &str) -> Option<Attributes> {
		resolve_with(name, |style| self.get(style).cloned())
	}
}

/// Resolve `name` through its `inherit` chain using `lookup` for each link.
///
/// Cycles and dangling parents end the chain silently.
pub(crate) fn resolve_with<F>(name: &str, lookup: F) -> Option<Attributes>
where
	F: Fn(&str) -> Option<Attributes>,
{
	let mut resolved = lookup(name)?;
	let mut seen: HashSet<String> = HashSet::from([name.to_string()]);
	let mut parent = resolved.inherit.clone();

	while let Some(parent_name) = parent {
		if !seen.insert(parent_name.clone()) {
			break;
		}
		let Some(parent_attrs) = lookup(&parent_name) else {
			break;
		};
		resolved.inherit_from(&parent_attrs);
		parent = parent_attrs.inherit.clone();
	}

	Some(resolved)
}
