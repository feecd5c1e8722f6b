use crate::config::types::{Config, LoadedConfig};
use crate::error::{RemapError, Result};
use std::path::{Path, PathBuf};

/// Parse a config file from the given path.
pub fn parse_config_file(path: &Path) -> Result<Config> {
	let content = std::fs::read_to_string(path).map_err(|source| RemapError::ConfigReadError {
		path: path.to_path_buf(),
		source,
	})?;

	parse_config_str(&content, path)
}

/// Parse a config from a string (useful for testing).
pub fn parse_config_str(content: &str, path: &Path) -> Result<Config> {
	let config: Config =
		toml::from_str(content).map_err(|source| RemapError::ConfigParseError {
			path: path.to_path_buf(),
			source,
		})?;

	// Validate the parsed config
	config.validate()?;

	Ok(config)
}

/// Get the path to the user's config file.
pub fn default_config_path() -> Result<PathBuf> {
	let config_dir = dirs::config_dir().ok_or(RemapError::ConfigDirectoryNotFound)?;
	Ok(config_dir.join("remap-theme.toml"))
}

/// Load the config at `path`, or the user's config file when `path` is `None`.
///
/// A missing user config is not an error: the built-in defaults apply.
/// An explicitly named file must exist.
pub fn load_config(path: Option<&Path>) -> Result<LoadedConfig> {
	if let Some(path) = path {
		let config = parse_config_file(path)?;
		return Ok(LoadedConfig {
			config,
			path: Some(path.to_path_buf()),
		});
	}

	let user_path = default_config_path()?;
	if user_path.exists() {
		let config = parse_config_file(&user_path)?;
		tracing::debug!(path = %user_path.display(), "Loaded user config");
		Ok(LoadedConfig {
			config,
			path: Some(user_path),
		})
	} else {
		Ok(LoadedConfig::default())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::style::PRIMARY_LABEL_STYLE;

	#[test]
	fn test_parse_empty_config() {
		let content = "";
		let path = PathBuf::from("test.toml");
		let config = parse_config_str(content, &path).unwrap();

		assert!(config.enabled);
		assert!(config.rules.is_none());
		assert!(config.styles.is_empty());
	}

	#[test]
	fn test_parse_disabled() {
		let path = PathBuf::from("test.toml");
		let config = parse_config_str("enabled = false", &path).unwrap();
		assert!(!config.enabled);
	}

	#[test]
	fn test_parse_rules_array_of_tables() {
		let content = r#"
[[rules]]
user_pattern = "^root$"

[[rules.overrides]]
style = "mode-line-buffer-id"
attributes = { inverse_video = true }

[[rules]]
host_pattern = "^foo$"
overrides = [{ style = "background", attributes = { background = "Red" } }]
"#;
		let path = PathBuf::from("test.toml");
		let config = parse_config_str(content, &path).unwrap();
		let rules = config.rules.unwrap();

		assert_eq!(rules.len(), 2);

		let rule1 = &rules[0];
		assert!(rule1.host_pattern.is_none());
		assert_eq!(rule1.user_pattern, Some("^root$".to_string()));
		assert_eq!(rule1.overrides[0].style, PRIMARY_LABEL_STYLE);
		assert_eq!(rule1.overrides[0].attributes.inverse_video, Some(true));

		let rule2 = &rules[1];
		assert_eq!(rule2.host_pattern, Some("^foo$".to_string()));
		assert!(rule2.user_pattern.is_none());
		assert_eq!(
			rule2.overrides[0].attributes.background,
			Some("Red".to_string())
		);
	}

	#[test]
	fn test_parse_empty_rule_list() {
		let path = PathBuf::from("test.toml");
		let config = parse_config_str("rules = []", &path).unwrap();
		assert_eq!(config.rules, Some(Vec::new()));
	}

	#[test]
	fn test_parse_styles_table() {
		let content = r#"
[styles.warning]
foreground = "Orange"
inherit = "mode-line"
"#;
		let path = PathBuf::from("test.toml");
		let config = parse_config_str(content, &path).unwrap();
		let registry = config.build_registry();

		let warning = registry.resolve("warning").unwrap();
		assert_eq!(warning.foreground.as_deref(), Some("Orange"));
		assert_eq!(warning.background.as_deref(), Some("Grey75"));
	}

	#[test]
	fn test_parse_error_keeps_path() {
		let path = PathBuf::from("broken.toml");
		let result = parse_config_str("rules = 3", &path);
		match result.unwrap_err() {
			RemapError::ConfigParseError { path, .. } => {
				assert_eq!(path, PathBuf::from("broken.toml"));
			}
			other => panic!("Expected ConfigParseError, got {:?}", other),
		}
	}

	#[test]
	fn test_misspelled_rule_key_is_rejected() {
		let content = r#"
[[rules]]
host_patern = "^prod$"
overrides = [{ style = "background", attributes = { background = "Red" } }]
"#;
		match parse_config_str(content, Path::new("typo.toml")).unwrap_err() {
			RemapError::ConfigParseError { path, source } => {
				assert_eq!(path, PathBuf::from("typo.toml"));
				assert!(source.to_string().contains("host_patern"));
			}
			other => panic!("Expected ConfigParseError, got {:?}", other),
		}
	}

	#[test]
	fn test_unknown_override_and_top_level_keys_are_rejected() {
		let override_typo = r#"
[[rules]]
overrides = [{ style = "background", attribute = { bold = true } }]
"#;
		assert!(matches!(
			parse_config_str(override_typo, Path::new("typo.toml")),
			Err(RemapError::ConfigParseError { .. })
		));
		assert!(matches!(
			parse_config_str("enable = false\n", Path::new("typo.toml")),
			Err(RemapError::ConfigParseError { .. })
		));
	}

	#[test]
	fn test_load_explicit_missing_file() {
		let dir = tempfile::tempdir().unwrap();
		let missing = dir.path().join("missing.toml");
		assert!(matches!(
			load_config(Some(&missing)),
			Err(RemapError::ConfigReadError { .. })
		));
	}

	#[test]
	fn test_load_explicit_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("remap-theme.toml");
		std::fs::write(&path, "enabled = false\nrules = []\n").unwrap();

		let loaded = load_config(Some(&path)).unwrap();
		assert_eq!(loaded.path.as_deref(), Some(path.as_path()));
		assert!(!loaded.config.enabled);
	}

	#[test]
	fn test_default_config_path() {
		if let Ok(path) = default_config_path() {
			assert!(path.ends_with("remap-theme.toml"));
		}
	}
}
