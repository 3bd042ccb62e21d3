// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Quotascope Fetch
//!
//! Usage fetching for the Quotascope application.
//!
//! This crate owns everything asynchronous about getting usage data:
//!
//! - [`UsageClient`] - HTTP client for the platform usage endpoint, with
//!   retry/backoff and auth handling
//! - [`UsageWatcher`] - a background poll task exposing the latest
//!   `{usage, error, is_loading}` snapshot through a watch channel
//! - [`FetchError`] - error taxonomy for fetch operations
//!
//! The rendering side never awaits a request: it reads whatever
//! [`UsageView`] the watcher last published and re-renders when the channel
//! signals a change.
//!
//! ## Example
//!
//! ```ignore
//! use quotascope_fetch::{FetchSettings, UsageClient, UsageWatcher};
//!
//! let client = UsageClient::new(FetchSettings::default())?;
//! let watcher = UsageWatcher::spawn(client, Some("acme-prod".into()), cadence);
//! let mut rx = watcher.subscribe();
//! while rx.changed().await.is_ok() {
//!     render(&rx.borrow());
//! }
//! ```

pub mod client;
pub mod error;
pub mod retry;
pub mod watcher;

// Re-export key types at crate root
pub use client::{FetchSettings, UsageClient};
pub use error::FetchError;
pub use retry::RetryStrategy;
pub use watcher::{fetch_once, FetchFailure, UsageView, UsageWatcher};
