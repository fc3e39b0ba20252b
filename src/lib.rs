/* src/lib.rs */

//!
//! Stale-while-revalidate caching for a single collection.
//!
//! This crate integrates four components:
//!
//! - **store**: Local stores with whole-collection atomic replace.
//! - **remote**: Sources that fetch the authoritative collection.
//! - **refresh**: The cache-first cycle (`Coordinator`, `RefreshStream`).
//! - **view**: A UI-facing view model over the cycle.
//!
//! ## Feature Flags
//!
//! - `full`: Enables all features.
//! - `events`: Change events and event streams for the bundled stores.
//! - `logging`: `tracing` diagnostics.
//! - `sqlite`: `SqliteStore`.
//! - `http`: `HttpRemote`.
//! - `config`: `Settings` loaded from JSON or TOML.
//! - `holidays`: Country list binding for a public-holiday API.
//!
//! ## Basic Usage
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use futures_util::StreamExt;
//! use revalidate::refresh::Coordinator;
//! use revalidate::remote::MemoryRemote;
//! use revalidate::store::MemoryStore;
//!
//! # async fn demo() {
//! let store = Arc::new(MemoryStore::<String>::new());
//! let remote = Arc::new(MemoryRemote::new(vec!["KE".to_string(), "NG".to_string()]));
//! let coordinator: Coordinator<String, _, _> = Coordinator::new(store, remote);
//!
//! let mut cycle = coordinator.refresh(false);
//! while let Some(step) = cycle.next().await {
//! 	println!("{step:?}");
//! }
//! # }
//! ```

pub mod refresh;
pub mod remote;
pub mod store;
pub mod view;

#[cfg(feature = "config")]
pub mod config;

#[cfg(feature = "holidays")]
pub mod holidays;

pub use refresh::{Coordinator, RefreshConfig, RefreshResult, RefreshStream};
pub use remote::{RemoteError, RemoteSource};
pub use store::{LocalStore, StoreError};
