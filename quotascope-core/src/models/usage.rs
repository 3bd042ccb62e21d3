//! Usage-related types.
//!
//! This module contains the data fetched for metered features:
//! - [`FeatureUsage`] - Consumed bytes vs. allotted limit for one feature
//! - [`UsageSummary`] - Total mapping from feature key to usage data
//! - [`BarLevel`] - Bar fill style derived from the usage ratio

use serde::{Deserialize, Serialize};

use super::catalog::{FeatureKey, UsageCategory};

/// Ratio at or above which a feature is flagged as nearing its limit.
pub const USAGE_APPROACHING_THRESHOLD: f64 = 0.8;

// ============================================================================
// Feature Usage
// ============================================================================

/// Consumed bytes and allotted limit for a single feature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureUsage {
    /// Bytes consumed.
    pub usage: u64,
    /// Bytes allowed by the plan.
    pub limit: u64,
}

impl FeatureUsage {
    /// Creates a new feature usage entry.
    pub fn new(usage: u64, limit: u64) -> Self {
        Self { usage, limit }
    }

    /// Returns usage divided by limit.
    ///
    /// A zero limit yields 0.0 so that no NaN or infinity ever reaches the
    /// percentage text or bar fill.
    #[allow(clippy::cast_precision_loss)]
    pub fn ratio(&self) -> f64 {
        if self.limit > 0 {
            self.usage as f64 / self.limit as f64
        } else {
            0.0
        }
    }

    /// Returns the usage ratio as a percentage (0-100, may exceed 100).
    pub fn percent(&self) -> f64 {
        self.ratio() * 100.0
    }

    /// Returns true if usage has reached or passed the limit.
    pub fn is_exceeded(&self) -> bool {
        self.ratio() >= 1.0
    }

    /// Returns true if the ratio has reached the given approaching threshold.
    pub fn is_approaching(&self, threshold: f64) -> bool {
        self.ratio() >= threshold
    }

    /// Selects the bar style for this entry.
    pub fn level(&self, threshold: f64) -> BarLevel {
        BarLevel::for_ratio(self.ratio(), threshold)
    }
}

// ============================================================================
// Bar Level
// ============================================================================

/// Fill style for a usage bar.
///
/// Selection priority: exceeded beats approaching beats neutral. Both
/// boundaries are inclusive: a ratio of exactly 1 is `Danger`, a ratio
/// exactly at the threshold is `Warning`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarLevel {
    /// Within normal range; brand fill.
    Neutral,
    /// At or above the approaching threshold.
    Warning,
    /// At or above the limit.
    Danger,
}

impl BarLevel {
    /// Selects the level for a usage ratio against an approaching threshold.
    pub fn for_ratio(ratio: f64, threshold: f64) -> Self {
        if ratio >= 1.0 {
            Self::Danger
        } else if ratio >= threshold {
            Self::Warning
        } else {
            Self::Neutral
        }
    }
}

// ============================================================================
// Usage Summary
// ============================================================================

/// Usage data for every metered feature of a project.
///
/// This is a total mapping over [`FeatureKey`]: one field per key. Fields
/// default to zero usage/zero limit when absent from the payload, so a
/// partial response decodes to a renderable summary instead of faulting on
/// lookup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UsageSummary {
    /// Database disk size.
    pub db_size: FeatureUsage,
    /// Database egress traffic.
    pub db_egress: FeatureUsage,
    /// Object storage size.
    pub storage_size: FeatureUsage,
    /// Object storage egress traffic.
    pub storage_egress: FeatureUsage,
}

impl UsageSummary {
    /// Returns the usage entry for a feature key.
    pub fn get(&self, key: FeatureKey) -> FeatureUsage {
        match key {
            FeatureKey::DbSize => self.db_size,
            FeatureKey::DbEgress => self.db_egress,
            FeatureKey::StorageSize => self.storage_size,
            FeatureKey::StorageEgress => self.storage_egress,
        }
    }

    /// Returns true if any feature in the category is strictly over its
    /// limit.
    ///
    /// The category badge uses a strict comparison: a feature sitting exactly
    /// at its limit colors its own bar red but does not raise the badge.
    pub fn category_exceeded(&self, category: &UsageCategory) -> bool {
        category
            .features
            .iter()
            .any(|feature| self.get(feature.key).ratio() > 1.0)
    }

    /// Returns the highest usage ratio across all features.
    pub fn max_ratio(&self) -> f64 {
        FeatureKey::all()
            .iter()
            .map(|key| self.get(*key).ratio())
            .fold(0.0_f64, f64::max)
    }

    /// Returns true if any feature has reached the approaching threshold.
    pub fn is_approaching_limit(&self, threshold: f64) -> bool {
        FeatureKey::all()
            .iter()
            .any(|key| self.get(*key).is_approaching(threshold))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::catalog;

    #[test]
    fn test_ratio_basic() {
        let entry = FeatureUsage::new(20_773_283, 524_288_000);
        let ratio = entry.ratio();
        assert!((ratio - 0.039_621).abs() < 1e-4);
        assert!(!entry.is_exceeded());
        assert!(!entry.is_approaching(USAGE_APPROACHING_THRESHOLD));
        assert_eq!(entry.level(USAGE_APPROACHING_THRESHOLD), BarLevel::Neutral);
    }

    #[test]
    fn test_ratio_exceeded() {
        let entry = FeatureUsage::new(624_288_000, 524_288_000);
        assert!(entry.ratio() > 1.0);
        assert!(entry.is_exceeded());
        assert_eq!(entry.level(USAGE_APPROACHING_THRESHOLD), BarLevel::Danger);
        // 119.07% to two decimals is asserted at the render layer.
        assert!((entry.percent() - 119.073_486).abs() < 1e-3);
    }

    #[test]
    fn test_zero_limit_yields_zero_ratio() {
        let entry = FeatureUsage::new(1024, 0);
        assert_eq!(entry.ratio(), 0.0);
        assert_eq!(entry.percent(), 0.0);
        assert!(!entry.is_exceeded());
        assert_eq!(entry.level(USAGE_APPROACHING_THRESHOLD), BarLevel::Neutral);
    }

    #[test]
    fn test_level_boundaries() {
        // Exactly at the limit: danger.
        assert_eq!(BarLevel::for_ratio(1.0, 0.8), BarLevel::Danger);
        // Exactly at the threshold: warning.
        assert_eq!(BarLevel::for_ratio(0.8, 0.8), BarLevel::Warning);
        // Just below the threshold: neutral.
        assert_eq!(BarLevel::for_ratio(0.799_999, 0.8), BarLevel::Neutral);
        // Over the limit: danger, not warning.
        assert_eq!(BarLevel::for_ratio(1.5, 0.8), BarLevel::Danger);
    }

    #[test]
    fn test_category_badge_is_strict() {
        let mut summary = UsageSummary::default();
        summary.db_size = FeatureUsage::new(100, 100); // exactly at limit
        summary.db_egress = FeatureUsage::new(10, 100);

        let database = &catalog()[0];
        assert!(!summary.category_exceeded(database));

        summary.db_size = FeatureUsage::new(101, 100);
        assert!(summary.category_exceeded(database));
    }

    #[test]
    fn test_badge_per_category() {
        let summary = UsageSummary {
            storage_size: FeatureUsage::new(624_288_000, 524_288_000),
            ..Default::default()
        };

        let database = &catalog()[0];
        let storage = &catalog()[1];
        assert!(!summary.category_exceeded(database));
        assert!(summary.category_exceeded(storage));
    }

    #[test]
    fn test_max_ratio() {
        let summary = UsageSummary {
            db_size: FeatureUsage::new(50, 100),
            storage_egress: FeatureUsage::new(90, 100),
            ..Default::default()
        };
        assert!((summary.max_ratio() - 0.9).abs() < f64::EPSILON);
        assert!(summary.is_approaching_limit(USAGE_APPROACHING_THRESHOLD));
    }

    #[test]
    fn test_get_is_total() {
        let summary = UsageSummary::default();
        for key in FeatureKey::all() {
            // A default summary answers every key with the zero fallback.
            assert_eq!(summary.get(*key), FeatureUsage::default());
        }
    }
}
