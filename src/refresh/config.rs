/* src/refresh/config.rs */

use serde::{Deserialize, Serialize};

/// Policies for the error paths of a refresh cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
	/// Emit `Loading(false)` after an `Error` so loading indicators settle.
	/// Off by default: an `Error` ends the cycle.
	pub loading_after_error: bool,

	/// Turn local store failures into an `Error` item. When off, the failure
	/// is only logged and the cycle closes with `Loading(false)`.
	pub map_store_errors: bool,
}

impl Default for RefreshConfig {
	fn default() -> Self {
		Self {
			loading_after_error: false,
			map_store_errors: true,
		}
	}
}
