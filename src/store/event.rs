/* src/store/event.rs */

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;

/// Events emitted by a store on change.
#[derive(Debug)]
pub enum StoreEvent<T> {
	/// The whole collection was replaced.
	Replaced {
		old: Arc<Vec<T>>,
		new: Arc<Vec<T>>,
		version: u64,
	},
}

impl<T> Clone for StoreEvent<T> {
	fn clone(&self) -> Self {
		match self {
			Self::Replaced { old, new, version } => Self::Replaced {
				old: Arc::clone(old),
				new: Arc::clone(new),
				version: *version,
			},
		}
	}
}

/// Store events as a stream. Lagging subscribers receive an error item
/// and then continue with the newest events.
pub struct EventStream<T> {
	inner: BroadcastStream<StoreEvent<T>>,
}

impl<T> EventStream<T>
where
	T: Clone + Send + Sync + 'static,
{
	pub(crate) fn new(rx: broadcast::Receiver<StoreEvent<T>>) -> Self {
		Self {
			inner: BroadcastStream::new(rx),
		}
	}
}

impl<T> futures_util::Stream for EventStream<T>
where
	T: Clone + Send + Sync + 'static,
{
	type Item = Result<StoreEvent<T>, BroadcastStreamRecvError>;

	fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
		Pin::new(&mut self.inner).poll_next(cx)
	}
}
