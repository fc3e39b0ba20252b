/* src/config/error.rs */

/// Errors raised while loading [`Settings`](super::Settings).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("io error: {0}")]
	Io(#[from] std::io::Error),

	#[error("parse error: {0}")]
	Parse(String),

	/// The file extension maps to no known format.
	#[error("unsupported config format: {0}")]
	UnsupportedFormat(String),

	#[error("validation failed: {0}")]
	Validation(#[from] validator::ValidationErrors),
}
