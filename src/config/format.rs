/* src/config/format.rs */

use std::path::Path;

use serde::de::DeserializeOwned;

use super::ConfigError;

/// Supported settings file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
	Json,
	Toml,
}

impl Format {
	pub fn extensions(&self) -> &'static [&'static str] {
		match self {
			Self::Json => &["json"],
			Self::Toml => &["toml"],
		}
	}

	/// Picks the format from the file extension.
	pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
		let ext = path
			.extension()
			.and_then(|ext| ext.to_str())
			.unwrap_or_default();

		[Self::Json, Self::Toml]
			.into_iter()
			.find(|format| format.extensions().contains(&ext))
			.ok_or_else(|| ConfigError::UnsupportedFormat(path.display().to_string()))
	}

	pub fn parse<T: DeserializeOwned>(&self, input: &[u8]) -> Result<T, ConfigError> {
		match self {
			Self::Json => {
				serde_json::from_slice(input).map_err(|e| ConfigError::Parse(e.to_string()))
			}
			Self::Toml => {
				let text = std::str::from_utf8(input).map_err(|e| ConfigError::Parse(e.to_string()))?;
				toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))
			}
		}
	}
}
