use serde::Deserialize;
use std::fmt;

/// A bundle of visual attributes attached to a named style.
///
/// Every field is optional: an unset field means "not specified here" and
/// falls through to the inherited style (or to whatever an earlier override
/// left in place).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct Attributes {
	/// Foreground color name.
	pub foreground: Option<String>,

	/// Background color name.
	pub background: Option<String>,

	/// Swap foreground and background when rendering.
	pub inverse_video: Option<bool>,

	pub bold: Option<bool>,

	pub italic: Option<bool>,

	pub underline: Option<bool>,

	/// Name of the style to inherit unspecified attributes from.
	pub inherit: Option<String>,
}

impl Attributes {
	/// Merge `other` on top of `self`. Fields set in `other` win.
	pub fn merge(&mut self, other: &Attributes) {
		fn take<T: Clone>(slot: &mut Option<T>, value: &Option<T>) {
			if value.is_some() {
				slot.clone_from(value);
			}
		}

		take(&mut self.foreground, &other.foreground);
		take(&mut self.background, &other.background);
		take(&mut self.inverse_video, &other.inverse_video);
		take(&mut self.bold, &other.bold);
		take(&mut self.italic, &other.italic);
		take(&mut self.underline, &other.underline);
		take(&mut self.inherit, &other.inherit);
	}

	/// Fill fields that are unset in `self` from `parent`.
	pub fn inherit_from(&mut self, parent: &Attributes) {
		let mut merged = parent.clone();
		merged.merge(self);
		merged.inherit = self.inherit.clone();
		*self = merged;
	}

	/// Whether no attribute is specified.
	pub fn is_empty(&self) -> bool {
		*self == Attributes::default()
	}

	/// Effective inverse-video flag, treating unset as off.
	pub fn is_inverse(&self) -> bool {
		self.inverse_video.unwrap_or(false)
	}
}

impl fmt::Display for Attributes {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut parts: Vec<String> = Vec::new();

		if let Some(ref color) = self.foreground {
			parts.push(format!("foreground={}", color));
		}
		if let Some(ref color) = self.background {
			parts.push(format!("background={}", color));
		}
		if let Some(flag) = self.inverse_video {
			parts.push(format!("inverse_video={}", flag));
		}
		if let Some(flag) = self.bold {
			parts.push(format!("bold={}", flag));
		}
		if let Some(flag) = self.italic {
			parts.push(format!("italic={}", flag));
		}
		if let Some(flag) = self.underline {
			parts.push(format!("underline={}", flag));
		}
		if let Some(ref parent) = self.inherit {
			parts.push(format!("inherit={}", parent));
		}

		if parts.is_empty() {
			write!(f, "(unspecified)")
		} else {
			write!(f, "{}", parts.join(" "))
		}
	}
}
