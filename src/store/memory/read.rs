/* src/store/memory/read.rs */

use std::sync::Arc;

#[cfg(feature = "events")]
use super::super::{EventStream, StoreEvent};
use super::{MemoryStore, Snapshot};

impl<T> MemoryStore<T>
where
	T: Clone + Send + Sync + 'static,
{
	/// Returns the current snapshot. This is a wait-free operation.
	pub fn snapshot(&self) -> Arc<Snapshot<T>> {
		self.inner.load_full()
	}

	/// Returns the shared record list of the current snapshot.
	pub fn records(&self) -> Arc<Vec<T>> {
		Arc::clone(&self.inner.load().records)
	}

	/// Returns the number of records.
	pub fn len(&self) -> usize {
		self.inner.load().records.len()
	}

	/// Returns the version of the current snapshot.
	pub fn version(&self) -> u64 {
		self.inner.load().version
	}

	/// Subscribes to replace events.
	#[cfg(feature = "events")]
	pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<StoreEvent<T>> {
		self.events.subscribe()
	}

	/// Subscribes to replace events as a [`futures_util::Stream`].
	#[cfg(feature = "events")]
	pub fn stream(&self) -> EventStream<T> {
		EventStream::new(self.subscribe())
	}
}
