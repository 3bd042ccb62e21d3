//! HTTP client for the platform usage endpoint.

use std::time::Duration;

use quotascope_core::{CoreError, UsageSource, UsageSummary};
use reqwest::{header, Client, StatusCode};
use tracing::{debug, warn};

use crate::error::FetchError;
use crate::retry::RetryStrategy;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default platform API base URL.
const DEFAULT_BASE_URL: &str = "https://api.quotascope.dev";

// ============================================================================
// Fetch Settings
// ============================================================================

/// Settings for usage fetch operations.
#[derive(Debug, Clone)]
pub struct FetchSettings {
    /// Platform API base URL, without trailing slash.
    pub base_url: String,
    /// Bearer token for authenticated endpoints.
    pub api_token: Option<String>,
    /// Timeout for each request.
    pub timeout: Duration,
    /// Retry behavior on transient failures.
    pub retry: RetryStrategy,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retry: RetryStrategy::default(),
        }
    }
}

impl FetchSettings {
    /// Creates settings against a custom base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        while self.base_url.ends_with('/') {
            self.base_url.pop();
        }
        self
    }

    /// Sets the bearer token.
    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the retry strategy.
    pub fn with_retry(mut self, retry: RetryStrategy) -> Self {
        self.retry = retry;
        self
    }
}

// ============================================================================
// Usage Client
// ============================================================================

/// HTTP client for fetching a project's usage summary.
#[derive(Debug, Clone)]
pub struct UsageClient {
    inner: Client,
    settings: FetchSettings,
}

impl UsageClient {
    /// Creates a new client from settings.
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let inner = Client::builder()
            .timeout(settings.timeout)
            .user_agent(concat!("quotascope/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { inner, settings })
    }

    /// Returns the endpoint URL for the given project scope.
    fn usage_url(&self, project_ref: Option<&str>) -> String {
        match project_ref {
            Some(r) => format!("{}/v1/projects/{r}/usage", self.settings.base_url),
            None => format!("{}/v1/usage", self.settings.base_url),
        }
    }

    /// Fetches the current usage summary for a project.
    ///
    /// Transient failures (connect errors, timeouts, 5xx, rate limiting with
    /// a short Retry-After) are retried per the configured strategy.
    pub async fn fetch_usage(
        &self,
        project_ref: Option<&str>,
    ) -> Result<UsageSummary, FetchError> {
        let url = self.usage_url(project_ref);
        let mut attempts = 0;
        let max_attempts = self.settings.retry.max_attempts;

        loop {
            attempts += 1;
            debug!(url = %url, attempt = attempts, "Fetching usage");

            let mut request = self.inner.get(&url);
            if let Some(token) = &self.settings.api_token {
                request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
            }

            match request.send().await {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        let body = response.text().await?;
                        return decode_summary(&body);
                    }

                    if status == StatusCode::TOO_MANY_REQUESTS {
                        let retry_after = response
                            .headers()
                            .get(header::RETRY_AFTER)
                            .and_then(|v| v.to_str().ok())
                            .and_then(|v| v.parse().ok());

                        if attempts < max_attempts {
                            let wait = retry_after
                                .unwrap_or(self.settings.retry.base_delay_secs);
                            warn!(wait_secs = wait, "Rate limited, waiting before retry");
                            tokio::time::sleep(Duration::from_secs(wait)).await;
                            continue;
                        }

                        return Err(FetchError::RateLimited { retry_after });
                    }

                    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                        return Err(FetchError::AuthenticationFailed(
                            "Invalid or expired credentials".to_string(),
                        ));
                    }

                    if self.settings.retry.retryable_status(status) && attempts < max_attempts {
                        let delay = self.settings.retry.delay_for_attempt(attempts);
                        warn!(
                            status = %status,
                            delay_secs = delay.as_secs(),
                            "Server error, retrying"
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }

                    return Err(FetchError::InvalidResponse(format!(
                        "Unexpected status code: {status}"
                    )));
                }
                Err(e) => {
                    if attempts < max_attempts && self.settings.retry.should_retry(&e) {
                        let delay = self.settings.retry.delay_for_attempt(attempts);
                        warn!(
                            error = %e,
                            delay_secs = delay.as_secs(),
                            "Request failed, retrying"
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    return Err(e.into());
                }
            }
        }
    }
}

impl UsageSource for UsageClient {
    fn fetch_summary(
        &self,
        project_ref: Option<&str>,
    ) -> impl std::future::Future<Output = Result<UsageSummary, CoreError>> + Send {
        async move {
            self.fetch_usage(project_ref)
                .await
                .map_err(|e| CoreError::FetchFailed(e.to_string()))
        }
    }
}

/// Decodes a usage payload into a summary.
fn decode_summary(body: &str) -> Result<UsageSummary, FetchError> {
    debug!(len = body.len(), "Decoding usage payload");
    serde_json::from_str(body)
        .map_err(|e| FetchError::InvalidResponse(format!("Invalid JSON: {e}")))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_url_with_and_without_ref() {
        let client = UsageClient::new(
            FetchSettings::default().with_base_url("https://api.example.com/"),
        )
        .unwrap();

        assert_eq!(
            client.usage_url(Some("acme-prod")),
            "https://api.example.com/v1/projects/acme-prod/usage"
        );
        assert_eq!(client.usage_url(None), "https://api.example.com/v1/usage");
    }

    #[test]
    fn test_decode_summary() {
        let body = r#"{
            "dbSize": { "usage": 20773283, "limit": 524288000 },
            "storageSize": { "usage": 624288000, "limit": 524288000 }
        }"#;
        let summary = decode_summary(body).unwrap();
        assert_eq!(summary.db_size.usage, 20_773_283);
        // Absent entries fall back to zero/zero.
        assert_eq!(summary.db_egress.limit, 0);
    }

    #[test]
    fn test_decode_summary_invalid_json() {
        let result = decode_summary("not json");
        assert!(matches!(result, Err(FetchError::InvalidResponse(_))));
    }
}
