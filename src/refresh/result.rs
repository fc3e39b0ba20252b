/* src/refresh/result.rs */

/// One step of a refresh cycle as seen by the consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshResult<T> {
	/// A cycle started (`true`) or finished (`false`).
	Loading(bool),
	/// The best-known full collection at this point.
	Success(Vec<T>),
	/// The refresh failed. The last `Success` remains the good state.
	Error(String),
}

impl<T> RefreshResult<T> {
	pub fn is_loading(&self) -> bool {
		matches!(self, Self::Loading(true))
	}

	pub fn as_success(&self) -> Option<&[T]> {
		match self {
			Self::Success(records) => Some(records),
			_ => None,
		}
	}

	pub fn error_message(&self) -> Option<&str> {
		match self {
			Self::Error(message) => Some(message),
			_ => None,
		}
	}

	/// Maps every record of a `Success`, leaving other variants untouched.
	pub fn map<U, F>(self, f: F) -> RefreshResult<U>
	where
		F: FnMut(T) -> U,
	{
		match self {
			Self::Loading(active) => RefreshResult::Loading(active),
			Self::Success(records) => RefreshResult::Success(records.into_iter().map(f).collect()),
			Self::Error(message) => RefreshResult::Error(message),
		}
	}
}
