//! Usage command - fetch usage and render the panel once.

use anyhow::Result;
use clap::Args;
use quotascope_fetch::fetch_once;
use quotascope_store::SettingsStore;
use tracing::info;

use crate::notify::{ErrorNotifier, StderrSink};
use crate::output::{JsonFormatter, PanelRenderer};
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the usage command.
///
/// The project ref comes from the global `--project` flag.
#[derive(Args, Default)]
pub struct UsageArgs {
    /// Approaching-threshold override (ratio in (0, 1]).
    #[arg(long)]
    pub threshold: Option<f64>,
}

/// Runs the usage command.
pub async fn run(args: &UsageArgs, cli: &Cli) -> Result<()> {
    let settings = SettingsStore::load_default().await?.get().await;

    let project = super::resolve_project(cli.project.as_ref(), &settings);
    let threshold = args.threshold.unwrap_or_else(|| settings.effective_threshold());

    info!(project = ?project, "Fetching usage");

    let client = super::build_client(&settings)?;
    let view = fetch_once(&client, project.as_deref()).await;

    // Side channel: the fetch failure surfaces as a notification, never as
    // a blocked panel.
    let mut notifier = ErrorNotifier::new();
    let mut sink = StderrSink::new(!cli.no_color && !settings.no_color);
    notifier.observe(&view, &mut sink);

    match cli.format {
        OutputFormat::Text => {
            let renderer = PanelRenderer::new(!cli.no_color && !settings.no_color, threshold);
            println!("{}", renderer.render(&view));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty, threshold);
            println!("{}", formatter.format_view(&view)?);
        }
    }

    if !view.has_data() {
        std::process::exit(ExitCode::FetchFailed as i32);
    }

    Ok(())
}
