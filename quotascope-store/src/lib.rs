// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Quotascope Store
//!
//! State management for the Quotascope application.
//!
//! This crate provides:
//!
//! - **`UsageStore`**: Observable state for per-project usage summaries
//! - **`SettingsStore`**: User preferences with persistence
//! - **Persistence**: File I/O helpers for JSON data
//!
//! ## Usage
//!
//! ```ignore
//! use quotascope_store::{SettingsStore, UsageStore};
//!
//! let usage = UsageStore::new();
//! let settings = SettingsStore::load_default().await?;
//!
//! usage.set_summary("acme-prod", summary).await;
//!
//! let mut rx = usage.subscribe();
//! while rx.changed().await.is_ok() {
//!     println!("Usage updated!");
//! }
//! ```

pub mod error;
pub mod persistence;
pub mod settings_store;
pub mod usage_store;

pub use error::StoreError;
pub use persistence::{
    default_config_dir, default_settings_path, ensure_dir, load_json, load_json_or_default,
    save_json,
};
pub use settings_store::{LogLevel, RefreshCadence, Settings, SettingsStore};
pub use usage_store::UsageStore;
#[cfg(test)]
mod persistence_tests;
