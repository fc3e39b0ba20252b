/* src/remote/error.rs */

/// Message used when a transient failure carries no detail.
pub const UNREACHABLE_MESSAGE: &str = "Couldn't reach server";

/// Message used when a protocol failure carries no detail.
pub const PROTOCOL_MESSAGE: &str = "Something went wrong";

/// Failure of a remote fetch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteError {
	/// Connectivity or timeout class failure.
	#[error("{}", .0.as_deref().unwrap_or(UNREACHABLE_MESSAGE))]
	Transient(Option<String>),

	/// The server answered, but not with a usable collection.
	#[error("{}", .0.as_deref().unwrap_or(PROTOCOL_MESSAGE))]
	Protocol(Option<String>),
}

impl RemoteError {
	pub fn transient(detail: impl Into<String>) -> Self {
		Self::Transient(Some(detail.into()))
	}

	pub fn protocol(detail: impl Into<String>) -> Self {
		Self::Protocol(Some(detail.into()))
	}

	/// The user-facing message: the detail when present, otherwise the
	/// default text for this kind of failure.
	pub fn user_message(&self) -> String {
		self.to_string()
	}

	pub fn is_transient(&self) -> bool {
		matches!(self, Self::Transient(_))
	}
}
