/* src/refresh/coordinator.rs */

//!
//! Cache-first coordinator for one collection.

use std::marker::PhantomData;
use std::sync::Arc;

use futures_util::StreamExt;

use super::{RefreshConfig, RefreshError, RefreshResult, RefreshStream};
use crate::remote::RemoteSource;
use crate::store::LocalStore;

/// Serves a collection from a local store and revalidates it against a
/// remote source.
///
/// # Clone Semantics
///
/// Clones share the same store and remote source. Cycles started from
/// different clones are independent streams over the same store.
pub struct Coordinator<T, S: ?Sized, R: ?Sized> {
	store: Arc<S>,
	remote: Arc<R>,
	config: RefreshConfig,
	_record: PhantomData<fn() -> T>,
}

impl<T, S: ?Sized, R: ?Sized> Clone for Coordinator<T, S, R> {
	fn clone(&self) -> Self {
		Self {
			store: self.store.clone(),
			remote: self.remote.clone(),
			config: self.config,
			_record: PhantomData,
		}
	}
}

/// Builder for [`Coordinator`].
pub struct CoordinatorBuilder<T, S: ?Sized, R: ?Sized> {
	store: Option<Arc<S>>,
	remote: Option<Arc<R>>,
	config: RefreshConfig,
	_record: PhantomData<fn() -> T>,
}

impl<T, S, R> CoordinatorBuilder<T, S, R>
where
	T: Send + 'static,
	S: LocalStore<T> + ?Sized + 'static,
	R: RemoteSource<T> + ?Sized + 'static,
{
	pub fn new() -> Self {
		Self {
			store: None,
			remote: None,
			config: RefreshConfig::default(),
			_record: PhantomData,
		}
	}

	pub fn store(mut self, store: Arc<S>) -> Self {
		self.store = Some(store);
		self
	}

	pub fn remote(mut self, remote: Arc<R>) -> Self {
		self.remote = Some(remote);
		self
	}

	pub fn config(mut self, config: RefreshConfig) -> Self {
		self.config = config;
		self
	}

	pub fn build(self) -> Result<Coordinator<T, S, R>, RefreshError> {
		let store = self
			.store
			.ok_or_else(|| RefreshError::Builder("store is required".to_string()))?;
		let remote = self
			.remote
			.ok_or_else(|| RefreshError::Builder("remote is required".to_string()))?;

		Ok(Coordinator {
			store,
			remote,
			config: self.config,
			_record: PhantomData,
		})
	}
}

impl<T, S, R> Default for CoordinatorBuilder<T, S, R>
where
	T: Send + 'static,
	S: LocalStore<T> + ?Sized + 'static,
	R: RemoteSource<T> + ?Sized + 'static,
{
	fn default() -> Self {
		Self::new()
	}
}

impl<T, S, R> Coordinator<T, S, R>
where
	T: Send + 'static,
	S: LocalStore<T> + ?Sized + 'static,
	R: RemoteSource<T> + ?Sized + 'static,
{
	pub fn builder() -> CoordinatorBuilder<T, S, R> {
		CoordinatorBuilder::new()
	}

	pub fn new(store: Arc<S>, remote: Arc<R>) -> Self {
		Self {
			store,
			remote,
			config: RefreshConfig::default(),
			_record: PhantomData,
		}
	}

	pub fn with_config(mut self, config: RefreshConfig) -> Self {
		self.config = config;
		self
	}

	/// Starts a new cycle.
	///
	/// Emits `Loading(true)`, then the cached collection. When the cache is
	/// non-empty and `force_remote` is false the cycle ends with
	/// `Loading(false)` without contacting the remote. Otherwise the remote
	/// collection replaces the cache atomically and is re-emitted, or the
	/// failure is emitted as `Error` with the cache untouched.
	pub fn refresh(&self, force_remote: bool) -> RefreshStream<T> {
		RefreshStream::new(
			Arc::clone(&self.store),
			Arc::clone(&self.remote),
			self.config,
			force_remote,
		)
	}

	/// Runs a whole cycle and returns every emission.
	pub async fn collect(&self, force_remote: bool) -> Vec<RefreshResult<T>> {
		self.refresh(force_remote).collect().await
	}

	pub fn store(&self) -> &Arc<S> {
		&self.store
	}

	pub fn remote(&self) -> &Arc<R> {
		&self.remote
	}

	pub fn config(&self) -> RefreshConfig {
		self.config
	}
}

impl<T, S: ?Sized, R: ?Sized> std::fmt::Debug for Coordinator<T, S, R> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Coordinator")
			.field("config", &self.config)
			.finish_non_exhaustive()
	}
}
