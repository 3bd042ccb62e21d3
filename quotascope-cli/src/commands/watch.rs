//! Watch command - live usage panel with periodic refresh.

use std::io::{stdout, Write};
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use quotascope_fetch::UsageWatcher;
use quotascope_store::SettingsStore;
use tracing::info;

use crate::notify::{ErrorNotifier, StderrSink};
use crate::output::PanelRenderer;
use crate::Cli;

/// Arguments for watch command.
///
/// The project ref comes from the global `--project` flag.
#[derive(Args)]
pub struct WatchArgs {
    /// Refresh interval in seconds.
    #[arg(long, short)]
    pub interval: Option<u64>,

    /// Minimum interval to use.
    #[arg(long, default_value = "5")]
    pub min_interval: u64,
}

/// Runs the watch command.
pub async fn run(args: &WatchArgs, cli: &Cli) -> Result<()> {
    let settings = SettingsStore::load_default().await?.get().await;

    let cadence_secs = args
        .interval
        .unwrap_or_else(|| settings.refresh_cadence.as_duration().as_secs())
        .max(args.min_interval);

    let project = super::resolve_project(cli.project.as_ref(), &settings);
    let threshold = settings.effective_threshold();
    let use_colors = !cli.no_color && !settings.no_color;

    info!(interval = cadence_secs, project = ?project, "Starting watch mode");

    let client = super::build_client(&settings)?;
    let watcher = UsageWatcher::spawn(
        client,
        project.clone(),
        Duration::from_secs(cadence_secs),
    );

    let renderer = PanelRenderer::new(use_colors, threshold);
    let mut notifier = ErrorNotifier::new();
    let mut sink = StderrSink::new(use_colors);
    let mut rx = watcher.subscribe();

    // Redraw on every view transition: loading, loaded, failed.
    while rx.changed().await.is_ok() {
        let view = rx.borrow_and_update().clone();

        // Clear screen
        print!("\x1b[2J\x1b[H");
        stdout().flush()?;

        let now = chrono::Local::now();
        let scope = project.as_deref().unwrap_or("default project");
        println!(
            "Quotascope Watch - {scope} - {} (refresh: {cadence_secs}s)",
            now.format("%H:%M:%S")
        );
        println!();

        println!("{}", renderer.render(&view));
        println!();
        println!("Press Ctrl+C to exit");

        // One notification per distinct failure, regardless of redraws.
        notifier.observe(&view, &mut sink);
    }

    Ok(())
}
