/* src/store/memory/replace.rs */

use std::cell::Cell;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;

#[cfg(feature = "events")]
use super::super::StoreEvent;
use super::super::{LocalStore, StoreError};
use super::{MemoryStore, Snapshot};

impl<T> MemoryStore<T>
where
	T: Clone + Send + Sync + 'static,
{
	/// Atomically replaces every record and returns the new version.
	///
	/// # Notes
	///
	/// - The version is derived from the snapshot being replaced, so versions
	///   are strictly increasing in publication order.
	/// - Events are emitted after the swap. Under concurrent replaces the
	///   event order may interleave, but each event's `old`/`new` pair is the
	///   exact transition performed by that swap.
	pub fn replace(&self, records: Vec<T>) -> u64 {
		let records = Arc::new(records);

		// Capture the version inside rcu, a retry may see a newer snapshot.
		let version = Cell::new(0);
		let previous = self.inner.rcu(|current| {
			version.set(current.version + 1);
			Snapshot {
				records: Arc::clone(&records),
				version: version.get(),
				replaced_at: Instant::now(),
			}
		});
		let version = version.get();

		#[cfg(feature = "events")]
		{
			let _ = self.events.send(StoreEvent::Replaced {
				old: Arc::clone(&previous.records),
				new: records,
				version,
			});
		}

		#[cfg(not(feature = "events"))]
		{
			let _ = previous;
		}

		version
	}
}

#[async_trait]
impl<T> LocalStore<T> for MemoryStore<T>
where
	T: Clone + Send + Sync + 'static,
{
	async fn read_all(&self) -> Result<Vec<T>, StoreError> {
		Ok(self.inner.load().records.as_ref().clone())
	}

	async fn replace_all(&self, records: Vec<T>) -> Result<(), StoreError> {
		self.replace(records);
		Ok(())
	}

	async fn is_empty(&self) -> Result<bool, StoreError> {
		Ok(self.inner.load().records.is_empty())
	}

	#[cfg(feature = "events")]
	fn changes(&self) -> Option<tokio::sync::broadcast::Receiver<StoreEvent<T>>> {
		Some(self.subscribe())
	}
}
