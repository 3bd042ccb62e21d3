//! Trait definitions for Quotascope.
//!
//! This module defines the seam between the rendering side and whatever
//! fetches usage data.

use crate::error::CoreError;
use crate::models::UsageSummary;

/// A source of project usage data.
///
/// Implementors are responsible for:
/// - Talking to the platform (or a fixture) to obtain current usage
/// - Decoding and normalizing the response into a [`UsageSummary`]
///
/// The project ref is optional; a source queried without one reports usage
/// for the caller's default project scope.
pub trait UsageSource: Send + Sync {
    /// Fetches the current usage summary.
    ///
    /// This is an async operation that may involve network requests.
    fn fetch_summary(
        &self,
        project_ref: Option<&str>,
    ) -> impl std::future::Future<Output = Result<UsageSummary, CoreError>> + Send;
}
