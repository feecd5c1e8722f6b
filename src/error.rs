use std::path::PathBuf;

/// Library-level structured errors for remap-theme.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum RemapError {
	#[error("Failed to read config file: {path}")]
	ConfigReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse config file: {path}")]
	ConfigParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Invalid regex pattern in rule: {pattern}")]
	InvalidRegex {
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error("Rule {index} has an override with an empty style name")]
	EmptyStyleName { index: usize },

	#[error("Failed to resolve config directory")]
	ConfigDirectoryNotFound,
}

/// Result type alias using RemapError.
pub type Result<T> = std::result::Result<T, RemapError>;
