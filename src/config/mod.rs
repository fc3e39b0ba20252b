/* src/config/mod.rs */

//!
//! File-based settings for wiring a coordinator.

mod error;
mod format;

pub use error::ConfigError;
pub use format::Format;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use validator::Validate;

use crate::refresh::RefreshConfig;

const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Top-level settings.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Settings {
	#[validate(nested)]
	pub remote: RemoteSettings,
	#[serde(default)]
	#[validate(nested)]
	pub store: StoreSettings,
	#[serde(default)]
	pub refresh: RefreshConfig,
}

/// Where and how to reach the remote API.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RemoteSettings {
	#[validate(url)]
	pub base_url: String,
	#[validate(length(min = 1))]
	pub api_key: String,
	#[serde(default = "default_timeout_ms")]
	#[validate(range(min = 1, max = 120_000))]
	pub timeout_ms: u64,
	/// Optional ISO-3166 filter passed through to the API.
	#[serde(default)]
	pub country: Option<String>,
}

/// Location of the local cache.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(default)]
pub struct StoreSettings {
	pub path: PathBuf,
	#[validate(length(min = 1))]
	pub table: String,
}

impl Default for StoreSettings {
	fn default() -> Self {
		Self {
			path: PathBuf::from("revalidate.db"),
			table: "countries".to_string(),
		}
	}
}

fn default_timeout_ms() -> u64 {
	DEFAULT_TIMEOUT_MS
}

impl RemoteSettings {
	pub fn timeout(&self) -> Duration {
		Duration::from_millis(self.timeout_ms)
	}
}

impl Settings {
	/// Reads, parses and validates a settings file.
	pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let format = Format::from_path(path)?;
		let bytes = tokio::fs::read(path).await?;
		let settings = Self::parse(&bytes, format)?;

		#[cfg(feature = "logging")]
		tracing::debug!(path = %path.display(), ?format, "settings loaded");

		Ok(settings)
	}

	/// Parses and validates settings from raw bytes.
	pub fn parse(input: &[u8], format: Format) -> Result<Self, ConfigError> {
		let settings: Self = format.parse(input)?;
		settings.validate()?;
		Ok(settings)
	}
}
