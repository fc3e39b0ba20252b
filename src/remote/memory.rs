/* src/remote/memory.rs */

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use super::{RemoteError, RemoteSource};

/// A scripted in-memory source useful for testing and offline embedding.
///
/// Each fetch pops the next queued response; once the queue is drained the
/// fallback response is returned forever.
pub struct MemoryRemote<T> {
	queue: Mutex<VecDeque<Result<Vec<T>, RemoteError>>>,
	fallback: Result<Vec<T>, RemoteError>,
	delay: Option<Duration>,
	calls: AtomicUsize,
}

impl<T> MemoryRemote<T>
where
	T: Clone + Send + Sync,
{
	/// A source that always returns `records`.
	pub fn new(records: Vec<T>) -> Self {
		Self::with_fallback(Ok(records))
	}

	/// A source that always fails with `error`.
	pub fn failing(error: RemoteError) -> Self {
		Self::with_fallback(Err(error))
	}

	fn with_fallback(fallback: Result<Vec<T>, RemoteError>) -> Self {
		Self {
			queue: Mutex::new(VecDeque::new()),
			fallback,
			delay: None,
			calls: AtomicUsize::new(0),
		}
	}

	/// Queues a one-shot response served before the fallback.
	pub fn push(mut self, response: Result<Vec<T>, RemoteError>) -> Self {
		if let Ok(queue) = self.queue.get_mut() {
			queue.push_back(response);
		}
		self
	}

	/// Sleeps for `delay` before answering each fetch.
	pub fn with_delay(mut self, delay: Duration) -> Self {
		self.delay = Some(delay);
		self
	}

	/// Number of fetches started so far.
	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl<T> RemoteSource<T> for MemoryRemote<T>
where
	T: Clone + Send + Sync,
{
	async fn fetch_all(&self) -> Result<Vec<T>, RemoteError> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		if let Some(delay) = self.delay {
			tokio::time::sleep(delay).await;
		}

		let queued = match self.queue.lock() {
			Ok(mut queue) => queue.pop_front(),
			Err(_) => None,
		};
		queued.unwrap_or_else(|| self.fallback.clone())
	}
}
