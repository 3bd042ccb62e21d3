//! User preferences store.
//!
//! Manages user settings with persistence and change notification.

use quotascope_core::USAGE_APPROACHING_THRESHOLD;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, RwLock};
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::persistence::{default_settings_path, load_json, save_json};

// ============================================================================
// Settings Types
// ============================================================================

/// User preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Default project ref to query when none is given on the command line.
    pub default_project: Option<String>,

    /// Platform API base URL override.
    pub api_base_url: Option<String>,

    /// Ratio at which a feature counts as approaching its limit.
    pub approaching_threshold: f64,

    /// Auto-refresh cadence for watch mode.
    pub refresh_cadence: RefreshCadence,

    /// Disable colored output.
    pub no_color: bool,

    /// Log level.
    pub log_level: LogLevel,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_project: None,
            api_base_url: None,
            approaching_threshold: USAGE_APPROACHING_THRESHOLD,
            refresh_cadence: RefreshCadence::default(),
            no_color: false,
            log_level: LogLevel::default(),
        }
    }
}

impl Settings {
    /// Returns the effective approaching threshold, clamped to (0, 1].
    ///
    /// A garbage value in the settings file falls back to the built-in
    /// default rather than disabling or inverting the highlighting.
    pub fn effective_threshold(&self) -> f64 {
        if self.approaching_threshold.is_finite()
            && self.approaching_threshold > 0.0
            && self.approaching_threshold <= 1.0
        {
            self.approaching_threshold
        } else {
            USAGE_APPROACHING_THRESHOLD
        }
    }
}

/// Refresh cadence options for watch mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RefreshCadence {
    /// Every thirty seconds.
    #[default]
    ThirtySeconds,
    /// Every minute.
    OneMinute,
    /// Every two minutes.
    TwoMinutes,
    /// Every five minutes.
    FiveMinutes,
}

impl RefreshCadence {
    /// Returns the cadence as a duration.
    pub fn as_duration(&self) -> Duration {
        match self {
            RefreshCadence::ThirtySeconds => Duration::from_secs(30),
            RefreshCadence::OneMinute => Duration::from_secs(60),
            RefreshCadence::TwoMinutes => Duration::from_secs(120),
            RefreshCadence::FiveMinutes => Duration::from_secs(300),
        }
    }

    /// All available cadences.
    pub fn all() -> &'static [RefreshCadence] {
        &[
            RefreshCadence::ThirtySeconds,
            RefreshCadence::OneMinute,
            RefreshCadence::TwoMinutes,
            RefreshCadence::FiveMinutes,
        ]
    }
}

impl std::fmt::Display for RefreshCadence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RefreshCadence::ThirtySeconds => write!(f, "30 seconds"),
            RefreshCadence::OneMinute => write!(f, "1 minute"),
            RefreshCadence::TwoMinutes => write!(f, "2 minutes"),
            RefreshCadence::FiveMinutes => write!(f, "5 minutes"),
        }
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    /// Error level logging.
    Error,
    /// Warning level logging.
    #[default]
    Warn,
    /// Info level logging.
    Info,
    /// Debug level logging.
    Debug,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
        }
    }
}

// ============================================================================
// Settings Store
// ============================================================================

/// Persistent store for user settings with change notification.
pub struct SettingsStore {
    settings: Arc<RwLock<Settings>>,
    path: PathBuf,
    notify: watch::Sender<u64>,
    version: Arc<RwLock<u64>>,
}

impl SettingsStore {
    /// Creates a new settings store with defaults.
    pub fn new(path: PathBuf) -> Self {
        let (notify, _) = watch::channel(0);
        Self {
            settings: Arc::new(RwLock::new(Settings::default())),
            path,
            notify,
            version: Arc::new(RwLock::new(0)),
        }
    }

    /// Loads settings from the default path.
    ///
    /// # Errors
    ///
    /// Returns error if settings cannot be loaded from disk.
    pub async fn load_default() -> Result<Self, StoreError> {
        Self::load(default_settings_path()).await
    }

    /// Loads settings from a path.
    ///
    /// A missing or unreadable file yields defaults rather than an error;
    /// the panel should render even with a broken config.
    pub async fn load(path: PathBuf) -> Result<Self, StoreError> {
        let settings = if path.exists() {
            info!(path = %path.display(), "Loading settings");
            load_json(&path).await.unwrap_or_else(|e| {
                warn!(error = %e, "Failed to load settings, using defaults");
                Settings::default()
            })
        } else {
            debug!(path = %path.display(), "Settings file not found, using defaults");
            Settings::default()
        };

        let (notify, _) = watch::channel(0);
        Ok(Self {
            settings: Arc::new(RwLock::new(settings)),
            path,
            notify,
            version: Arc::new(RwLock::new(0)),
        })
    }

    /// Gets a copy of the current settings.
    pub async fn get(&self) -> Settings {
        self.settings.read().await.clone()
    }

    /// Updates settings and notifies subscribers.
    pub async fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut Settings),
    {
        {
            let mut settings = self.settings.write().await;
            f(&mut settings);
        }
        self.notify_change().await;
    }

    /// Saves settings to disk.
    ///
    /// # Errors
    ///
    /// Returns error if settings cannot be written to disk.
    pub async fn save(&self) -> Result<(), StoreError> {
        let settings = self.settings.read().await;
        save_json(&self.path, &*settings).await?;
        info!(path = %self.path.display(), "Settings saved");
        Ok(())
    }

    /// Subscribes to settings changes.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.notify.subscribe()
    }

    /// Notifies subscribers of a change.
    async fn notify_change(&self) {
        let mut version = self.version.write().await;
        *version += 1;
        let _ = self.notify.send(*version);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_threshold_clamps_garbage() {
        let mut settings = Settings::default();
        assert!((settings.effective_threshold() - 0.8).abs() < f64::EPSILON);

        settings.approaching_threshold = 0.9;
        assert!((settings.effective_threshold() - 0.9).abs() < f64::EPSILON);

        settings.approaching_threshold = 0.0;
        assert!((settings.effective_threshold() - 0.8).abs() < f64::EPSILON);

        settings.approaching_threshold = 1.5;
        assert!((settings.effective_threshold() - 0.8).abs() < f64::EPSILON);

        settings.approaching_threshold = f64::NAN;
        assert!((settings.effective_threshold() - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn test_cadence_durations() {
        assert_eq!(
            RefreshCadence::ThirtySeconds.as_duration(),
            Duration::from_secs(30)
        );
        assert_eq!(
            RefreshCadence::FiveMinutes.as_duration(),
            Duration::from_secs(300)
        );
    }
}
