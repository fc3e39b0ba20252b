/* src/refresh/mod.rs */

//!
//! The stale-while-revalidate cycle.
//!
//! - [`Coordinator`] - Owns a store and a remote source, starts cycles
//! - [`RefreshStream`] - One lazy cycle of [`RefreshResult`] items
//! - [`RefreshConfig`] - Error-path policies

mod config;
mod coordinator;
mod error;
mod result;
mod stream;

pub use config::RefreshConfig;
pub use coordinator::{Coordinator, CoordinatorBuilder};
pub use error::RefreshError;
pub use result::RefreshResult;
pub use stream::{RefreshStream, STORE_MESSAGE};
