/* src/remote/mod.rs */

//!
//! Remote sources returning the authoritative collection in one call.

mod error;
mod memory;

#[cfg(feature = "http")]
mod http;

pub use error::RemoteError;
pub use memory::MemoryRemote;

#[cfg(feature = "http")]
pub use http::{Envelope, HttpRemote};

use async_trait::async_trait;

/// Abstract remote source that fetches the full collection.
#[async_trait]
pub trait RemoteSource<T>: Send + Sync {
	/// Fetches every record. No partial results: either the whole collection
	/// or an error.
	async fn fetch_all(&self) -> Result<Vec<T>, RemoteError>;
}
