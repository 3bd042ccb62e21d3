// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Quotascope Core
//!
//! Core types, models, and traits for the Quotascope application.
//!
//! This crate provides the foundational abstractions used across all other
//! Quotascope crates, including:
//!
//! - The static category/feature catalog for project resource quotas
//! - Per-feature usage data and ratio/threshold derivation
//! - Byte formatting for bar labels
//! - Error types
//! - The `UsageSource` trait the fetch layer implements
//!
//! ## Key Types
//!
//! ### Catalog Types
//! - [`FeatureKey`] - Enum of all metered resource features
//! - [`UsageFeature`] - A feature with its display title
//! - [`UsageCategory`] - A titled group of features sharing one panel block
//!
//! ### Usage Types
//! - [`FeatureUsage`] - Consumed bytes vs. allotted limit for one feature
//! - [`UsageSummary`] - Total mapping from feature key to usage data
//! - [`BarLevel`] - Bar fill style derived from the usage ratio

pub mod error;
pub mod format;
pub mod models;
pub mod traits;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{
    // Catalog types
    catalog,
    FeatureKey,
    UsageCategory,
    UsageFeature,
    // Usage types
    BarLevel,
    FeatureUsage,
    UsageSummary,
    USAGE_APPROACHING_THRESHOLD,
};

// Re-export helpers and traits
pub use format::format_bytes;
pub use traits::UsageSource;
