use crate::error::RemapError;
use crate::style::{Attributes, PRIMARY_LABEL_STYLE, StyleRegistry};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Top-level configuration from a `remap-theme.toml` file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
	/// Whether remapping is turned on for newly decorated views.
	#[serde(default = "default_enabled")]
	pub enabled: bool,

	/// Remap rules, evaluated first to last. Every matching rule applies.
	/// When absent, the built-in rule set from [`default_rules`] is used.
	#[serde(default)]
	pub rules: Option<Vec<Rule>>,

	/// Extra base style definitions layered onto the built-in registry.
	#[serde(default)]
	pub styles: BTreeMap<String, Attributes>,
}

fn default_enabled() -> bool {
	true
}

impl Default for Config {
	fn default() -> Self {
		Self {
			enabled: default_enabled(),
			rules: None,
			styles: BTreeMap::new(),
		}
	}
}

/// A rule remapping styles for resources whose address matches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct Rule {
	/// Regex pattern to match the remote host. Absent matches any host.
	pub host_pattern: Option<String>,

	/// Regex pattern to match the remote user. Absent matches any user.
	pub user_pattern: Option<String>,

	/// Attribute sets to merge onto existing named styles, applied in order.
	#[serde(default)]
	pub overrides: Vec<StyleOverride>,
}

/// One `(style, attributes)` pair of a rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct StyleOverride {
	/// Name of the style to remap.
	pub style: String,

	/// Attributes merged onto that style while the rule matches.
	#[serde(default)]
	pub attributes: Attributes,
}

/// A loaded configuration with its source path for display.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
	/// The parsed configuration.
	pub config: Config,

	/// The path this config was loaded from, if any.
	pub path: Option<PathBuf>,
}

impl Rule {
	/// Whether any of this rule's overrides targets `style`.
	pub fn targets(&self, style: &str) -> bool {
		self.overrides.iter().any(|o| o.style == style)
	}

	/// Validate that every override names a style.
	pub fn validate(&self, index: usize) -> Result<(), RemapError> {
		if self.overrides.iter().any(|o| o.style.trim().is_empty()) {
			return Err(RemapError::EmptyStyleName { index });
		}
		Ok(())
	}
}

impl Config {
	/// Validate all rules in this config.
	pub fn validate(&self) -> Result<(), RemapError> {
		for (index, rule) in self.rules.iter().flatten().enumerate() {
			rule.validate(index + 1)?;
		}
		Ok(())
	}

	/// Built-in styles plus the ones this config defines.
	pub fn build_registry(&self) -> StyleRegistry {
		let mut registry = StyleRegistry::with_defaults();
		for (name, attributes) in &self.styles {
			registry.define(name.clone(), attributes.clone());
		}
		registry
	}

	/// The configured rules, or the built-in set when none are configured.
	pub fn effective_rules(&self, registry: &StyleRegistry) -> Vec<Rule> {
		match self.rules {
			Some(ref rules) => rules.clone(),
			None => default_rules(registry),
		}
	}
}

/// The built-in rule set: highlight the buffer label for `root` on any host.
///
/// The label is drawn in inverse video unless the registry already renders it
/// inverted, in which case the rule turns inversion off instead.
pub fn default_rules(registry: &StyleRegistry) -> Vec<Rule> {
	let already_inverse = registry
		.resolve(PRIMARY_LABEL_STYLE)
		.is_some_and(|attrs| attrs.is_inverse());

	vec![Rule {
		host_pattern: None,
		user_pattern: Some("^root$".to_string()),
		overrides: vec![StyleOverride {
			style: PRIMARY_LABEL_STYLE.to_string(),
			attributes: Attributes {
				inverse_video: Some(!already_inverse),
				..Default::default()
			},
		}],
	}]
}
