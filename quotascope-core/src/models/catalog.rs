//! Static category/feature catalog.
//!
//! The catalog defines which resource features are metered and how they are
//! grouped into panel categories. It is fixed at compile time: categories
//! render in catalog order, features in the order listed per category.

use serde::{Deserialize, Serialize};

// ============================================================================
// Feature Key
// ============================================================================

/// Metered resource features.
///
/// Keys serialize camelCase to match the platform usage payload
/// (`dbSize`, `dbEgress`, ...). Keeping this a closed enum means every key
/// referenced by the catalog has a slot in [`crate::UsageSummary`] - there is
/// no string lookup that can miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FeatureKey {
    /// Database disk size.
    DbSize,
    /// Database egress traffic.
    DbEgress,
    /// Object storage size.
    StorageSize,
    /// Object storage egress traffic.
    StorageEgress,
}

impl FeatureKey {
    /// Returns all feature keys in catalog order.
    pub fn all() -> &'static [FeatureKey] {
        &[
            Self::DbSize,
            Self::DbEgress,
            Self::StorageSize,
            Self::StorageEgress,
        ]
    }

    /// Returns the wire name for this key (camelCase, as in the API payload).
    pub fn api_name(&self) -> &'static str {
        match self {
            Self::DbSize => "dbSize",
            Self::DbEgress => "dbEgress",
            Self::StorageSize => "storageSize",
            Self::StorageEgress => "storageEgress",
        }
    }
}

// ============================================================================
// Feature & Category
// ============================================================================

/// One measurable resource feature within a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageFeature {
    /// The metric this feature reads from the usage summary.
    pub key: FeatureKey,
    /// Display label for the panel row.
    pub title: &'static str,
}

/// A titled group of related features sharing one panel block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageCategory {
    /// Display title for the block header.
    pub title: &'static str,
    /// Single-glyph icon shown next to the title.
    pub icon: char,
    /// Features rendered as rows, in order.
    pub features: &'static [UsageFeature],
}

/// The fixed catalog of usage categories.
///
/// Rendering order is the order of this slice.
pub fn catalog() -> &'static [UsageCategory] {
    &[
        UsageCategory {
            title: "Database",
            icon: '▤',
            features: &[
                UsageFeature {
                    key: FeatureKey::DbSize,
                    title: "Database size",
                },
                UsageFeature {
                    key: FeatureKey::DbEgress,
                    title: "Database egress",
                },
            ],
        },
        UsageCategory {
            title: "Storage",
            icon: '▦',
            features: &[
                UsageFeature {
                    key: FeatureKey::StorageSize,
                    title: "Storage size",
                },
                UsageFeature {
                    key: FeatureKey::StorageEgress,
                    title: "Storage egress",
                },
            ],
        },
    ]
}

// ============================================================================
// Tests
// ============================================================================
