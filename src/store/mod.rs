/* src/store/mod.rs */

//!
//! Local stores holding the cached collection.
//!
//! Every store exposes the same two primitives: a full read and an atomic
//! replace. There is no incremental upsert; a replace is observed by readers
//! either entirely or not at all. With the `events` feature a store can also
//! be watched: [`LocalStore::changes`] yields one [`StoreEvent`] per
//! committed replace.

mod error;
mod memory;

#[cfg(feature = "events")]
mod event;

#[cfg(feature = "sqlite")]
mod sqlite;

pub use error::StoreError;
pub use memory::{DEFAULT_EVENT_CAPACITY, MemoryStore, Snapshot};

#[cfg(feature = "events")]
pub use event::{EventStream, StoreEvent};

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;

use async_trait::async_trait;

/// A durable collection that can be read whole and replaced atomically.
#[async_trait]
pub trait LocalStore<T>: Send + Sync
where
	T: Send + 'static,
{
	/// Reads the entire collection in stored order.
	async fn read_all(&self) -> Result<Vec<T>, StoreError>;

	/// Clears the collection and inserts `records` as one transaction.
	///
	/// Concurrent readers see either the previous collection or `records`,
	/// never an empty intermediate state.
	async fn replace_all(&self, records: Vec<T>) -> Result<(), StoreError>;

	/// Returns true if the collection holds no records.
	async fn is_empty(&self) -> Result<bool, StoreError> {
		Ok(self.read_all().await?.is_empty())
	}

	/// Subscribes to committed replaces, if this store publishes them.
	///
	/// Events are sent only once the new collection is visible to
	/// [`read_all`](LocalStore::read_all).
	#[cfg(feature = "events")]
	fn changes(&self) -> Option<tokio::sync::broadcast::Receiver<StoreEvent<T>>> {
		None
	}
}
