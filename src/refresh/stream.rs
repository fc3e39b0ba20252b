/* src/refresh/stream.rs */

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_util::stream::{self, BoxStream, Stream};

use super::{RefreshConfig, RefreshResult};
use crate::remote::RemoteSource;
use crate::store::{LocalStore, StoreError};

/// Message emitted when the local store fails during a cycle.
pub const STORE_MESSAGE: &str = "Couldn't update local cache";

/// Position of a cycle between two emissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
	Begin,
	ReadCache,
	Revalidate,
	Settle,
	Done,
}

struct Cycle<T, S: ?Sized, R: ?Sized> {
	store: Arc<S>,
	remote: Arc<R>,
	config: RefreshConfig,
	force_remote: bool,
	stage: Stage,
	_record: std::marker::PhantomData<fn() -> T>,
}

impl<T, S, R> Cycle<T, S, R>
where
	T: Send + 'static,
	S: LocalStore<T> + ?Sized,
	R: RemoteSource<T> + ?Sized,
{
	/// Runs the cycle up to its next emission. `None` ends the stream.
	async fn advance(&mut self) -> Option<RefreshResult<T>> {
		match std::mem::replace(&mut self.stage, Stage::Done) {
			Stage::Begin => {
				self.stage = Stage::ReadCache;
				Some(RefreshResult::Loading(true))
			}
			Stage::ReadCache => {
				let cached = match self.store.read_all().await {
					Ok(cached) => cached,
					Err(e) => return self.store_failure(e),
				};

				self.stage = if !cached.is_empty() && !self.force_remote {
					#[cfg(feature = "logging")]
					tracing::debug!(records = cached.len(), "serving cached collection without revalidation");
					Stage::Settle
				} else {
					Stage::Revalidate
				};
				Some(RefreshResult::Success(cached))
			}
			Stage::Revalidate => {
				let fetched = match self.remote.fetch_all().await {
					Ok(fetched) => fetched,
					Err(e) => {
						#[cfg(feature = "logging")]
						tracing::warn!(error = %e, transient = e.is_transient(), "remote fetch failed; cache left untouched");
						return self.fail(e.user_message());
					}
				};

				#[cfg(feature = "logging")]
				let fetched_len = fetched.len();

				if let Err(e) = self.store.replace_all(fetched).await {
					return self.store_failure(e);
				}

				#[cfg(feature = "logging")]
				tracing::info!(records = fetched_len, "local cache replaced from remote");

				match self.store.read_all().await {
					Ok(refreshed) => {
						self.stage = Stage::Settle;
						Some(RefreshResult::Success(refreshed))
					}
					Err(e) => self.store_failure(e),
				}
			}
			Stage::Settle => Some(RefreshResult::Loading(false)),
			Stage::Done => None,
		}
	}

	fn fail(&mut self, message: String) -> Option<RefreshResult<T>> {
		if self.config.loading_after_error {
			self.stage = Stage::Settle;
		}
		Some(RefreshResult::Error(message))
	}

	fn store_failure(&mut self, error: StoreError) -> Option<RefreshResult<T>> {
		#[cfg(feature = "logging")]
		tracing::error!(%error, "local store failed during refresh");

		if self.config.map_store_errors {
			self.fail(STORE_MESSAGE.to_string())
		} else {
			// No error item reaches the consumer, so the cycle still closes.
			let _ = error;
			self.stage = Stage::Done;
			Some(RefreshResult::Loading(false))
		}
	}
}

/// One lazy, cold refresh cycle.
///
/// Nothing touches the store or the remote until the first poll. Dropping the
/// stream cancels the cycle at its current suspension point, so a fetch that
/// completes after the drop is never written to the store.
pub struct RefreshStream<T> {
	inner: BoxStream<'static, RefreshResult<T>>,
}

impl<T> RefreshStream<T>
where
	T: Send + 'static,
{
	pub(crate) fn new<S, R>(
		store: Arc<S>,
		remote: Arc<R>,
		config: RefreshConfig,
		force_remote: bool,
	) -> Self
	where
		S: LocalStore<T> + ?Sized + 'static,
		R: RemoteSource<T> + ?Sized + 'static,
	{
		let cycle = Cycle {
			store,
			remote,
			config,
			force_remote,
			stage: Stage::Begin,
			_record: std::marker::PhantomData,
		};

		let inner = stream::unfold(cycle, |mut cycle| async move {
			let item = cycle.advance().await?;
			Some((item, cycle))
		});

		Self {
			inner: Box::pin(inner),
		}
	}
}

impl<T> Stream for RefreshStream<T> {
	type Item = RefreshResult<T>;

	fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
		self.inner.as_mut().poll_next(cx)
	}
}

impl<T> std::fmt::Debug for RefreshStream<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RefreshStream").finish_non_exhaustive()
	}
}
