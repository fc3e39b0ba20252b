/* src/store/memory/mod.rs */

mod read;
mod replace;

use std::sync::Arc;
use std::time::Instant;

use arc_swap::ArcSwap;

#[cfg(feature = "events")]
use super::StoreEvent;

/// Default event channel capacity.
pub const DEFAULT_EVENT_CAPACITY: usize = 100;

/// One published state of a [`MemoryStore`].
#[derive(Debug, Clone)]
pub struct Snapshot<T> {
	/// The records, in insertion order.
	pub records: Arc<Vec<T>>,
	/// Incremented once per replace. Zero for a fresh store.
	pub version: u64,
	/// When this snapshot was published.
	pub replaced_at: Instant,
}

impl<T> Snapshot<T> {
	fn new(records: Vec<T>, version: u64) -> Self {
		Self {
			records: Arc::new(records),
			version,
			replaced_at: Instant::now(),
		}
	}
}

/// In-process store with lock-free reads and atomic whole-collection replace.
///
/// Uses the RCU (Read-Copy-Update) pattern: a replace builds the next
/// [`Snapshot`] aside and publishes it with a single compare-and-swap, so
/// readers never see a cleared-but-not-refilled collection.
pub struct MemoryStore<T> {
	pub(crate) inner: ArcSwap<Snapshot<T>>,
	#[cfg(feature = "events")]
	pub(crate) events: tokio::sync::broadcast::Sender<StoreEvent<T>>,
}

impl<T> MemoryStore<T>
where
	T: Clone + Send + Sync + 'static,
{
	/// Creates a new empty store with default event channel capacity.
	pub fn new() -> Self {
		Self::with_records(Vec::new())
	}

	/// Creates a store pre-filled with `records` at version 0.
	pub fn with_records(records: impl IntoIterator<Item = T>) -> Self {
		Self {
			inner: ArcSwap::from_pointee(Snapshot::new(records.into_iter().collect(), 0)),
			#[cfg(feature = "events")]
			events: tokio::sync::broadcast::channel(DEFAULT_EVENT_CAPACITY).0,
		}
	}

	/// Creates a new empty store with custom event channel capacity.
	///
	/// Note: Events may be dropped if subscribers process slower than
	/// the replace rate and the channel fills up.
	#[cfg(feature = "events")]
	pub fn with_event_capacity(capacity: usize) -> Self {
		Self {
			inner: ArcSwap::from_pointee(Snapshot::new(Vec::new(), 0)),
			events: tokio::sync::broadcast::channel(capacity).0,
		}
	}
}

impl<T> Default for MemoryStore<T>
where
	T: Clone + Send + Sync + 'static,
{
	fn default() -> Self {
		Self::new()
	}
}

impl<T> std::fmt::Debug for MemoryStore<T>
where
	T: std::fmt::Debug,
{
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let snapshot = self.inner.load();
		f.debug_struct("MemoryStore")
			.field("records", &snapshot.records)
			.field("version", &snapshot.version)
			.finish_non_exhaustive()
	}
}
