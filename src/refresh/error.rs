/* src/refresh/error.rs */

use thiserror::Error;

/// Errors raised while assembling a [`Coordinator`](super::Coordinator).
///
/// Failures during a cycle are never raised; they arrive as
/// [`RefreshResult::Error`](super::RefreshResult::Error) items.
#[derive(Debug, Error)]
pub enum RefreshError {
	#[error("Builder error: {0}")]
	Builder(String),
}
