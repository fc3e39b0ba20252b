/* src/store/error.rs */

/// Errors raised by a local store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
	/// Failure reported by the SQLite engine.
	#[cfg(feature = "sqlite")]
	#[error("sqlite error: {0}")]
	Sqlite(#[from] rusqlite::Error),

	/// A stored row could not be encoded or decoded.
	#[error("serialization error: {0}")]
	Serde(#[from] serde_json::Error),

	/// The table name is not a plain SQL identifier.
	#[error("invalid table name: {table}")]
	InvalidTable { table: String },

	/// A thread panicked while holding the store's connection.
	#[error("store lock poisoned")]
	Poisoned,

	/// The blocking task running a store operation was cancelled or panicked.
	#[cfg(feature = "sqlite")]
	#[error("store task failed: {0}")]
	Join(#[from] tokio::task::JoinError),

	#[error("{0}")]
	Custom(String),
}
