//! CLI command implementations.

pub mod config;
pub mod usage;
pub mod watch;

use quotascope_fetch::{FetchSettings, UsageClient};
use quotascope_store::Settings;

/// Environment variable holding the platform API token.
pub const API_TOKEN_ENV: &str = "QUOTASCOPE_API_TOKEN";

/// Builds the usage client from settings and environment.
pub fn build_client(settings: &Settings) -> anyhow::Result<UsageClient> {
    let mut fetch_settings = FetchSettings::default();

    if let Some(base_url) = &settings.api_base_url {
        fetch_settings = fetch_settings.with_base_url(base_url);
    }
    if let Ok(token) = std::env::var(API_TOKEN_ENV) {
        if !token.is_empty() {
            fetch_settings = fetch_settings.with_api_token(token);
        }
    }

    Ok(UsageClient::new(fetch_settings)?)
}

/// Resolves the project ref from the global flag or settings.
pub fn resolve_project(global: Option<&String>, settings: &Settings) -> Option<String> {
    global
        .cloned()
        .or_else(|| settings.default_project.clone())
}
