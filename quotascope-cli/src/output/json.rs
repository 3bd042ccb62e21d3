//! JSON output formatting.

use anyhow::Result;
use chrono::{DateTime, Utc};
use quotascope_core::{catalog, format_bytes, BarLevel, FeatureKey, UsageSummary};
use quotascope_fetch::UsageView;
use serde::Serialize;

// ============================================================================
// Output Types
// ============================================================================

/// JSON output for a panel snapshot.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelOutput {
    pub is_loading: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetched_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<CategoryOutput>>,
}

/// One category block.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryOutput {
    pub title: String,
    pub exceeded: bool,
    pub features: Vec<FeatureOutput>,
}

/// One feature row.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureOutput {
    pub key: FeatureKey,
    pub title: String,
    pub usage: u64,
    pub limit: u64,
    pub ratio: f64,
    pub percent: String,
    pub level: BarLevel,
    pub usage_label: String,
    pub limit_label: String,
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter with optional pretty printing.
pub struct JsonFormatter {
    pretty: bool,
    threshold: f64,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool, threshold: f64) -> Self {
        Self { pretty, threshold }
    }

    /// Formats a view snapshot as JSON.
    pub fn format_view(&self, view: &UsageView) -> Result<String> {
        let output = PanelOutput {
            is_loading: view.is_loading,
            error: view
                .error
                .as_ref()
                .map(|e| e.message.clone().unwrap_or_else(|| "unknown".to_string())),
            fetched_at: view.fetched_at,
            categories: view.usage.as_ref().map(|s| self.categories(s)),
        };

        let json = if self.pretty {
            serde_json::to_string_pretty(&output)?
        } else {
            serde_json::to_string(&output)?
        };

        Ok(json)
    }

    fn categories(&self, summary: &UsageSummary) -> Vec<CategoryOutput> {
        catalog()
            .iter()
            .map(|category| CategoryOutput {
                title: category.title.to_string(),
                exceeded: summary.category_exceeded(category),
                features: category
                    .features
                    .iter()
                    .map(|feature| {
                        let entry = summary.get(feature.key);
                        FeatureOutput {
                            key: feature.key,
                            title: feature.title.to_string(),
                            usage: entry.usage,
                            limit: entry.limit,
                            ratio: entry.ratio(),
                            percent: format!("{:.2}", entry.percent()),
                            level: entry.level(self.threshold),
                            usage_label: format_bytes(entry.usage),
                            limit_label: format_bytes(entry.limit),
                        }
                    })
                    .collect(),
            })
            .collect()
    }
}
