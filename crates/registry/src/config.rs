//! Registry configuration.
//!
//! ```toml
//! builtins = true
//!
//! [search]
//! depth_cap = 10
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Upper bound on composition depth when no config overrides it.
pub const DEFAULT_DEPTH_CAP: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
	/// Hard cap on chain depth. The effective bound is the smaller of this and
	/// half the number of candidate converters.
	pub depth_cap: usize,
}

impl Default for SearchConfig {
	fn default() -> Self {
		Self {
			depth_cap: DEFAULT_DEPTH_CAP,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
	/// Preload the primitive conversion table.
	pub builtins: bool,
	pub search: SearchConfig,
}

impl Default for RegistryConfig {
	fn default() -> Self {
		Self {
			builtins: true,
			search: SearchConfig::default(),
		}
	}
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("failed to read {}: {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("invalid registry config: {0}")]
	Parse(#[from] toml::de::Error),
}

impl RegistryConfig {
	pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(input)?)
	}

	pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let input = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		Self::from_toml_str(&input)
	}
}
