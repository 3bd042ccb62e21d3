//! CLI output formatting tests.
//!
//! These tests verify the panel's three rendering states, bar/level
//! selection, and the JSON output shape.

#[cfg(test)]
mod panel_renderer_tests {
    use super::super::panel::PanelRenderer;
    use quotascope_core::{BarLevel, FeatureUsage, UsageSummary, USAGE_APPROACHING_THRESHOLD};
    use quotascope_fetch::{FetchFailure, UsageView};

    const RED: &str = "\x1b[31m";
    const YELLOW: &str = "\x1b[33m";
    const GREEN: &str = "\x1b[32m";

    fn renderer() -> PanelRenderer {
        PanelRenderer::new(false, USAGE_APPROACHING_THRESHOLD)
    }

    fn color_renderer() -> PanelRenderer {
        PanelRenderer::new(true, USAGE_APPROACHING_THRESHOLD)
    }

    /// The dashboard's reference data set.
    fn loaded_summary() -> UsageSummary {
        UsageSummary {
            db_size: FeatureUsage::new(20_773_283, 524_288_000),
            db_egress: FeatureUsage::new(400_000_000, 524_288_000),
            storage_size: FeatureUsage::new(624_288_000, 524_288_000),
            storage_egress: FeatureUsage::new(2048, 524_288_000),
        }
    }

    fn loaded_view() -> UsageView {
        UsageView {
            usage: Some(loaded_summary()),
            ..Default::default()
        }
    }

    #[test]
    fn test_spark_bar_empty() {
        let bar = renderer().spark_bar(0, 100, BarLevel::Neutral);
        assert_eq!(bar, "░░░░░░░░░░░░░░░░░░░░");
    }

    #[test]
    fn test_spark_bar_full() {
        let bar = renderer().spark_bar(100, 100, BarLevel::Neutral);
        assert_eq!(bar, "████████████████████");
    }

    #[test]
    fn test_spark_bar_half() {
        let bar = renderer().spark_bar(50, 100, BarLevel::Neutral);
        assert_eq!(bar, "██████████░░░░░░░░░░");
    }

    #[test]
    fn test_spark_bar_overflow_clamps_to_full() {
        let bar = renderer().spark_bar(150, 100, BarLevel::Danger);
        assert_eq!(bar, "████████████████████");
    }

    #[test]
    fn test_spark_bar_zero_limit_is_empty() {
        let bar = renderer().spark_bar(1024, 0, BarLevel::Neutral);
        assert_eq!(bar, "░░░░░░░░░░░░░░░░░░░░");
    }

    #[test]
    fn test_spark_bar_level_colors() {
        let r = color_renderer();
        assert!(r.spark_bar(50, 100, BarLevel::Neutral).contains(GREEN));
        assert!(r.spark_bar(85, 100, BarLevel::Warning).contains(YELLOW));
        assert!(r.spark_bar(120, 100, BarLevel::Danger).contains(RED));
    }

    #[test]
    fn test_loaded_panel_percent_text() {
        let output = renderer().render(&loaded_view());
        assert!(output.contains("3.96 %"), "dbSize row: {output}");
        assert!(output.contains("76.29 %"), "dbEgress row: {output}");
        assert!(output.contains("119.07 %"), "storageSize row: {output}");
        assert!(output.contains("0.00 %"), "storageEgress row: {output}");
    }

    #[test]
    fn test_loaded_panel_byte_labels() {
        let output = renderer().render(&loaded_view());
        assert!(output.contains("19.81 MB of 500 MB"));
        assert!(output.contains("595.37 MB of 500 MB"));
        assert!(output.contains("2 KB of 500 MB"));
    }

    #[test]
    fn test_badge_only_on_exceeded_category() {
        let output = renderer().render(&loaded_view());
        // Only the Storage category is over a limit.
        assert_eq!(output.matches("[Exceeded usage]").count(), 1);

        let storage_header = output.find("Storage").unwrap();
        let badge = output.find("[Exceeded usage]").unwrap();
        assert!(badge > storage_header);
    }

    #[test]
    fn test_no_badge_when_within_limits() {
        let view = UsageView {
            usage: Some(UsageSummary {
                db_size: FeatureUsage::new(10, 100),
                ..Default::default()
            }),
            ..Default::default()
        };
        let output = renderer().render(&view);
        assert!(!output.contains("[Exceeded usage]"));
    }

    #[test]
    fn test_exactly_at_limit_colors_bar_but_no_badge() {
        // Ratio exactly 1: danger bar, but the badge comparison is strict.
        let view = UsageView {
            usage: Some(UsageSummary {
                db_size: FeatureUsage::new(100, 100),
                ..Default::default()
            }),
            ..Default::default()
        };
        let output = color_renderer().render(&view);
        assert!(output.contains(RED));
        assert!(!output.contains("[Exceeded usage]"));
        assert!(output.contains("100.00 %"));
    }

    #[test]
    fn test_exactly_at_threshold_is_warning() {
        let view = UsageView {
            usage: Some(UsageSummary {
                db_egress: FeatureUsage::new(80, 100),
                ..Default::default()
            }),
            ..Default::default()
        };
        let output = color_renderer().render(&view);
        assert!(output.contains(YELLOW));
        assert!(output.contains("80.00 %"));
    }

    #[test]
    fn test_categories_render_in_catalog_order() {
        let output = renderer().render(&loaded_view());
        let database = output.find("Database").unwrap();
        let storage = output.find("Storage").unwrap();
        assert!(database < storage);

        // Features keep their per-category order.
        let size = output.find("Database size").unwrap();
        let egress = output.find("Database egress").unwrap();
        assert!(size < egress);
    }

    #[test]
    fn test_loading_overlay_wraps_stale_content() {
        let view = UsageView {
            usage: Some(loaded_summary()),
            is_loading: true,
            ..Default::default()
        };
        let output = renderer().render(&view);
        assert!(output.starts_with('◌'));
        // Stale rows still render below the indicator.
        assert!(output.contains("3.96 %"));
    }

    #[test]
    fn test_loading_overlay_without_data() {
        let view = UsageView {
            is_loading: true,
            ..Default::default()
        };
        let output = renderer().render(&view);
        assert!(output.starts_with('◌'));
        assert!(output.contains("░░░"));
    }

    #[test]
    fn test_no_data_renders_placeholder_rows() {
        let view = UsageView::default();
        let output = renderer().render(&view);

        // Headers render, feature rows are replaced by shimmer lines.
        assert!(output.contains("Database"));
        assert!(output.contains("Storage"));
        assert!(!output.contains("Database size"));
        assert!(!output.contains('%'));
        assert!(output.contains("░░░"));
    }

    #[test]
    fn test_error_does_not_block_rendering() {
        let view = UsageView {
            usage: Some(loaded_summary()),
            error: Some(FetchFailure {
                seq: 1,
                message: Some("flaky".to_string()),
            }),
            ..Default::default()
        };
        // The panel keeps rendering stale data; the error travels through
        // the notification sink, not the table.
        let output = renderer().render(&view);
        assert!(output.contains("3.96 %"));
        assert!(!output.contains("flaky"));
    }
}

#[cfg(test)]
mod json_formatter_tests {
    use super::super::json::JsonFormatter;
    use quotascope_core::{FeatureUsage, UsageSummary, USAGE_APPROACHING_THRESHOLD};
    use quotascope_fetch::{FetchFailure, UsageView};

    fn formatter() -> JsonFormatter {
        JsonFormatter::new(false, USAGE_APPROACHING_THRESHOLD)
    }

    #[test]
    fn test_loaded_view_shape() {
        let view = UsageView {
            usage: Some(UsageSummary {
                db_size: FeatureUsage::new(20_773_283, 524_288_000),
                storage_size: FeatureUsage::new(624_288_000, 524_288_000),
                ..Default::default()
            }),
            ..Default::default()
        };

        let json = formatter().format_view(&view).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["isLoading"], false);
        assert!(value.get("error").is_none());

        let categories = value["categories"].as_array().unwrap();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0]["title"], "Database");
        assert_eq!(categories[0]["exceeded"], false);
        assert_eq!(categories[1]["exceeded"], true);

        let db_size = &categories[0]["features"][0];
        assert_eq!(db_size["key"], "dbSize");
        assert_eq!(db_size["percent"], "3.96");
        assert_eq!(db_size["level"], "neutral");
        assert_eq!(db_size["usageLabel"], "19.81 MB");

        let storage_size = &categories[1]["features"][0];
        assert_eq!(storage_size["percent"], "119.07");
        assert_eq!(storage_size["level"], "danger");
    }

    #[test]
    fn test_error_view_shape() {
        let view = UsageView {
            error: Some(FetchFailure {
                seq: 3,
                message: Some("rate limited".to_string()),
            }),
            ..Default::default()
        };

        let json = formatter().format_view(&view).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["error"], "rate limited");
        assert!(value.get("categories").is_none());
    }

    #[test]
    fn test_error_without_message_reads_unknown() {
        let view = UsageView {
            error: Some(FetchFailure {
                seq: 1,
                message: None,
            }),
            ..Default::default()
        };

        let json = formatter().format_view(&view).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["error"], "unknown");
    }
}
