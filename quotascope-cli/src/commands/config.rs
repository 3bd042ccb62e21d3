//! Config command - manage configuration.

use anyhow::Result;
use clap::{Args, Subcommand};
use quotascope_store::{default_config_dir, default_settings_path, RefreshCadence, SettingsStore};
use tracing::info;

use crate::{Cli, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration.
    Show,

    /// Show configuration paths.
    Path,

    /// Set the default project ref.
    Project {
        /// Project ref, or "none" to clear.
        project: String,
    },

    /// Set the approaching threshold (ratio in (0, 1]).
    Threshold {
        /// Threshold ratio, e.g. 0.8.
        threshold: f64,
    },

    /// Set refresh cadence.
    Refresh {
        /// Cadence: 30s, 1m, 2m, 5m.
        cadence: String,
    },

    /// Reset to defaults.
    Reset,
}

/// Runs the config command.
pub async fn run(args: &ConfigArgs, cli: &Cli) -> Result<()> {
    match &args.action {
        ConfigAction::Show => show_config(cli).await,
        ConfigAction::Path => show_paths(cli),
        ConfigAction::Project { project } => set_project(project).await,
        ConfigAction::Threshold { threshold } => set_threshold(*threshold).await,
        ConfigAction::Refresh { cadence } => set_refresh(cadence).await,
        ConfigAction::Reset => reset_config().await,
    }
}

async fn show_config(cli: &Cli) -> Result<()> {
    let store = SettingsStore::load_default().await?;
    let settings = store.get().await;

    match cli.format {
        OutputFormat::Text => {
            println!("Quotascope Configuration");
            println!("{}", "─".repeat(40));
            println!();
            println!(
                "Default project: {}",
                settings.default_project.as_deref().unwrap_or("(none)")
            );
            println!(
                "API base URL:    {}",
                settings.api_base_url.as_deref().unwrap_or("(default)")
            );
            println!("Threshold:       {}", settings.effective_threshold());
            println!("Refresh cadence: {}", settings.refresh_cadence);
            println!("Colors disabled: {}", settings.no_color);
        }
        OutputFormat::Json => {
            let json = if cli.pretty {
                serde_json::to_string_pretty(&settings)?
            } else {
                serde_json::to_string(&settings)?
            };
            println!("{json}");
        }
    }

    Ok(())
}

fn show_paths(cli: &Cli) -> Result<()> {
    let config_dir = default_config_dir();
    let settings_path = default_settings_path();

    match cli.format {
        OutputFormat::Text => {
            println!("Configuration Paths");
            println!("{}", "─".repeat(40));
            println!();
            println!("Config dir:    {}", config_dir.display());
            println!("Settings file: {}", settings_path.display());
        }
        OutputFormat::Json => {
            let paths = serde_json::json!({
                "config_dir": config_dir.display().to_string(),
                "settings_file": settings_path.display().to_string(),
            });
            let json = if cli.pretty {
                serde_json::to_string_pretty(&paths)?
            } else {
                serde_json::to_string(&paths)?
            };
            println!("{json}");
        }
    }

    Ok(())
}

async fn set_project(project: &str) -> Result<()> {
    let store = SettingsStore::load_default().await?;
    let value = if project.eq_ignore_ascii_case("none") {
        None
    } else {
        Some(project.to_string())
    };

    store.update(|s| s.default_project = value.clone()).await;
    store.save().await?;

    info!(project, "Default project updated");
    match value {
        Some(p) => println!("Default project: {p}"),
        None => println!("Default project cleared"),
    }

    Ok(())
}

async fn set_threshold(threshold: f64) -> Result<()> {
    if !threshold.is_finite() || threshold <= 0.0 || threshold > 1.0 {
        anyhow::bail!("Threshold must be a ratio in (0, 1], got {threshold}");
    }

    let store = SettingsStore::load_default().await?;
    store.update(|s| s.approaching_threshold = threshold).await;
    store.save().await?;

    info!(threshold, "Approaching threshold updated");
    println!("Approaching threshold: {threshold}");

    Ok(())
}

async fn set_refresh(cadence: &str) -> Result<()> {
    let parsed = match cadence.to_lowercase().as_str() {
        "30s" => RefreshCadence::ThirtySeconds,
        "1m" => RefreshCadence::OneMinute,
        "2m" => RefreshCadence::TwoMinutes,
        "5m" => RefreshCadence::FiveMinutes,
        _ => anyhow::bail!("Unknown cadence: {cadence}. Valid options: 30s, 1m, 2m, 5m"),
    };

    let store = SettingsStore::load_default().await?;
    store.update(|s| s.refresh_cadence = parsed).await;
    store.save().await?;

    info!(cadence = %parsed, "Refresh cadence updated");
    println!("Refresh cadence: {parsed}");

    Ok(())
}

async fn reset_config() -> Result<()> {
    let store = SettingsStore::load_default().await?;
    store.update(|s| *s = quotascope_store::Settings::default()).await;
    store.save().await?;

    println!("Configuration reset to defaults");
    Ok(())
}
