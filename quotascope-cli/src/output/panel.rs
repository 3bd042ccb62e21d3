//! The usage panel: grouped category blocks with labeled progress bars.
//!
//! Renders one [`UsageView`] snapshot per call. Three states:
//!
//! 1. Loading - a refresh indicator wraps whatever (possibly stale) content
//!    state applies below.
//! 2. No data yet - category headers with a shimmer placeholder instead of
//!    feature rows.
//! 3. Loaded - one bordered block per category: header with icon, title and
//!    an "Exceeded usage" badge when a feature is over its limit, then one
//!    row per feature with percentage text and a color-leveled bar.

use quotascope_core::{
    catalog, format_bytes, BarLevel, FeatureUsage, UsageCategory, UsageFeature, UsageSummary,
};
use quotascope_fetch::UsageView;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";

// Bar characters
const BAR_FULL: char = '█';
const BAR_EMPTY: char = '░';

/// Width of category border rules.
const PANEL_WIDTH: usize = 64;

/// Width of the shimmer placeholder line.
const SHIMMER_WIDTH: usize = 40;

/// Panel renderer with optional colors.
pub struct PanelRenderer {
    use_colors: bool,
    threshold: f64,
    bar_width: usize,
}

impl PanelRenderer {
    /// Creates a new panel renderer.
    pub fn new(use_colors: bool, threshold: f64) -> Self {
        Self {
            use_colors,
            threshold,
            bar_width: 20,
        }
    }

    /// Set the progress bar width.
    #[allow(dead_code)]
    pub fn with_bar_width(mut self, width: usize) -> Self {
        self.bar_width = width;
        self
    }

    /// Renders the full panel for a view snapshot.
    pub fn render(&self, view: &UsageView) -> String {
        let mut lines = Vec::new();

        if view.is_loading {
            lines.push(format!("◌ {}", self.dim("Refreshing…")));
            lines.push(String::new());
        }

        let mut first = true;
        for category in catalog() {
            if !first {
                lines.push(String::new());
            }
            first = false;
            lines.extend(self.render_category(category, view.usage.as_ref()));
        }

        lines.join("\n")
    }

    /// Renders one category block.
    fn render_category(
        &self,
        category: &UsageCategory,
        summary: Option<&UsageSummary>,
    ) -> Vec<String> {
        let rule = "─".repeat(PANEL_WIDTH);
        let mut lines = Vec::new();

        lines.push(rule.clone());

        let mut header = format!(" {} {}", category.icon, self.bold(category.title));
        if let Some(summary) = summary {
            if summary.category_exceeded(category) {
                header.push_str("  ");
                header.push_str(&self.badge("Exceeded usage"));
            }
        }
        lines.push(header);
        lines.push(rule);

        match summary {
            None => {
                // Shimmer placeholder until data arrives.
                lines.push(format!(
                    " {}",
                    self.dim(&BAR_EMPTY.to_string().repeat(SHIMMER_WIDTH))
                ));
            }
            Some(summary) => {
                for feature in category.features {
                    lines.push(self.feature_row(feature, summary.get(feature.key)));
                }
            }
        }

        lines
    }

    /// Renders one feature row: title, percentage text, bar, byte labels.
    fn feature_row(&self, feature: &UsageFeature, entry: FeatureUsage) -> String {
        let level = entry.level(self.threshold);
        let percent = format!("{:.2} %", entry.percent());
        let bar = self.spark_bar(entry.usage, entry.limit, level);

        format!(
            " {:<18} {:>9}  {}  {} of {}",
            feature.title,
            percent,
            bar,
            format_bytes(entry.usage),
            format_bytes(entry.limit)
        )
    }

    /// Renders a horizontal bar filled to `value / max`, capped at full.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn spark_bar(&self, value: u64, max: u64, level: BarLevel) -> String {
        let ratio = if max > 0 {
            (value as f64 / max as f64).min(1.0)
        } else {
            0.0
        };
        let filled = (ratio * self.bar_width as f64).round() as usize;
        let empty = self.bar_width.saturating_sub(filled);

        let bar = format!(
            "{}{}",
            BAR_FULL.to_string().repeat(filled),
            BAR_EMPTY.to_string().repeat(empty)
        );

        self.level_color(level, &bar)
    }

    // ========================================================================
    // Color/style helpers
    // ========================================================================

    fn level_color(&self, level: BarLevel, text: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }

        match level {
            BarLevel::Danger => self.red(text),
            BarLevel::Warning => self.yellow(text),
            BarLevel::Neutral => self.green(text),
        }
    }

    fn badge(&self, text: &str) -> String {
        if self.use_colors {
            format!("{RED}[{text}]{RESET}")
        } else {
            format!("[{text}]")
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.use_colors {
            format!("{BOLD}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.use_colors {
            format!("{DIM}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn green(&self, text: &str) -> String {
        if self.use_colors {
            format!("{GREEN}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn yellow(&self, text: &str) -> String {
        if self.use_colors {
            format!("{YELLOW}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn red(&self, text: &str) -> String {
        if self.use_colors {
            format!("{RED}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}
