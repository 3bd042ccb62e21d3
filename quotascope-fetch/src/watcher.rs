//! Reactive usage view.
//!
//! [`UsageWatcher`] is the fetch collaborator the panel subscribes to: a
//! background task that polls a [`UsageSource`] and publishes every state
//! transition (`loading` -> `loaded` / `failed`) as a [`UsageView`] snapshot
//! over a watch channel. Renderers read the latest snapshot; they never
//! await a request themselves.

use std::time::Duration;

use chrono::{DateTime, Utc};
use quotascope_core::{UsageSource, UsageSummary};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

// ============================================================================
// Usage View
// ============================================================================

/// A snapshot of the fetch collaborator's state.
///
/// `usage` keeps the last successfully loaded summary across refreshes and
/// failures, so a renderer can show stale data under a loading overlay or
/// after an error.
#[derive(Debug, Clone, Default)]
pub struct UsageView {
    /// Last successfully fetched summary, if any.
    pub usage: Option<UsageSummary>,
    /// Most recent failure, cleared by the next successful fetch.
    pub error: Option<FetchFailure>,
    /// True while a fetch is in flight.
    pub is_loading: bool,
    /// When `usage` was last refreshed.
    pub fetched_at: Option<DateTime<Utc>>,
}

impl UsageView {
    /// Returns true if a summary has ever been loaded.
    pub fn has_data(&self) -> bool {
        self.usage.is_some()
    }
}

/// A fetch failure with a distinct identity.
///
/// `seq` increases with every failed fetch; consumers keyed on it (the error
/// notifier) can tell a new failure from a re-observation of the same one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    /// Monotonic failure identity.
    pub seq: u64,
    /// Failure description, if the source provided one.
    pub message: Option<String>,
}

// ============================================================================
// Usage Watcher
// ============================================================================

/// Background poll task publishing [`UsageView`] snapshots.
pub struct UsageWatcher {
    rx: watch::Receiver<UsageView>,
    handle: JoinHandle<()>,
}

impl UsageWatcher {
    /// Spawns a watcher polling `source` every `cadence`.
    ///
    /// The first fetch starts immediately. The project ref is optional; the
    /// source decides what an unscoped query means.
    pub fn spawn<S>(source: S, project_ref: Option<String>, cadence: Duration) -> Self
    where
        S: UsageSource + 'static,
    {
        let (tx, rx) = watch::channel(UsageView::default());

        let handle = tokio::spawn(async move {
            let mut failure_seq = 0u64;
            let mut ticker = tokio::time::interval(cadence);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                tx.send_modify(|view| view.is_loading = true);

                match source.fetch_summary(project_ref.as_deref()).await {
                    Ok(summary) => {
                        debug!("Usage refresh succeeded");
                        tx.send_modify(|view| {
                            view.usage = Some(summary);
                            view.error = None;
                            view.is_loading = false;
                            view.fetched_at = Some(Utc::now());
                        });
                    }
                    Err(e) => {
                        failure_seq += 1;
                        let failure = FetchFailure {
                            seq: failure_seq,
                            message: Some(e.to_string()),
                        };
                        warn!(error = %e, seq = failure.seq, "Usage refresh failed");
                        tx.send_modify(|view| {
                            view.error = Some(failure);
                            view.is_loading = false;
                        });
                    }
                }

                if tx.receiver_count() == 0 {
                    debug!("All subscribers gone, stopping watcher");
                    break;
                }
            }
        });

        Self { rx, handle }
    }

    /// Returns a receiver for view snapshots.
    pub fn subscribe(&self) -> watch::Receiver<UsageView> {
        self.rx.clone()
    }

    /// Returns the current snapshot.
    pub fn current(&self) -> UsageView {
        self.rx.borrow().clone()
    }
}

impl Drop for UsageWatcher {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Performs a single fetch and returns the terminal view.
///
/// One-shot convenience for CLI runs that do not keep a watcher alive.
pub async fn fetch_once<S: UsageSource>(source: &S, project_ref: Option<&str>) -> UsageView {
    match source.fetch_summary(project_ref).await {
        Ok(summary) => UsageView {
            usage: Some(summary),
            error: None,
            is_loading: false,
            fetched_at: Some(Utc::now()),
        },
        Err(e) => UsageView {
            usage: None,
            error: Some(FetchFailure {
                seq: 1,
                message: Some(e.to_string()),
            }),
            is_loading: false,
            fetched_at: None,
        },
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use quotascope_core::{CoreError, FeatureUsage};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Source replaying a scripted sequence of results, then repeating the
    /// final default.
    struct ScriptedSource {
        responses: Mutex<VecDeque<Result<UsageSummary, CoreError>>>,
    }

    impl ScriptedSource {
        fn new(responses: Vec<Result<UsageSummary, CoreError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
            }
        }
    }

    impl UsageSource for ScriptedSource {
        fn fetch_summary(
            &self,
            _project_ref: Option<&str>,
        ) -> impl std::future::Future<Output = Result<UsageSummary, CoreError>> + Send {
            let next = self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Ok(UsageSummary::default()));
            async move { next }
        }
    }

    fn loaded_summary() -> UsageSummary {
        UsageSummary {
            db_size: FeatureUsage::new(10, 100),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_watcher_publishes_loaded_view() {
        let source = ScriptedSource::new(vec![Ok(loaded_summary())]);
        let watcher = UsageWatcher::spawn(source, None, Duration::from_secs(60));

        let mut rx = watcher.subscribe();
        let view = rx
            .wait_for(|v| v.has_data())
            .await
            .expect("watcher closed early")
            .clone();

        assert!(!view.is_loading);
        assert!(view.error.is_none());
        assert!(view.fetched_at.is_some());
        assert_eq!(view.usage.unwrap().db_size, FeatureUsage::new(10, 100));
    }

    #[tokio::test]
    async fn test_watcher_assigns_distinct_failure_seqs() {
        // Several consecutive failures so a satisfying snapshot is current
        // across many ticks, whatever the scheduler does.
        let source = ScriptedSource::new(vec![
            Err(CoreError::FetchFailed("boom".to_string())),
            Err(CoreError::FetchFailed("boom again".to_string())),
            Err(CoreError::FetchFailed("boom again".to_string())),
            Err(CoreError::FetchFailed("boom again".to_string())),
            Err(CoreError::FetchFailed("boom again".to_string())),
        ]);
        let watcher = UsageWatcher::spawn(source, None, Duration::from_millis(10));

        let mut rx = watcher.subscribe();
        let first = rx
            .wait_for(|v| v.error.is_some())
            .await
            .unwrap()
            .error
            .clone()
            .unwrap();
        let second = rx
            .wait_for(|v| v.error.as_ref().is_some_and(|e| e.seq > first.seq))
            .await
            .unwrap()
            .error
            .clone()
            .unwrap();

        assert_eq!(first.seq, 1);
        assert!(second.seq > first.seq);
        assert_eq!(second.message.as_deref(), Some("Fetch failed: boom again"));
    }

    #[tokio::test]
    async fn test_watcher_retains_stale_data_across_failure() {
        let source = ScriptedSource::new(vec![
            Ok(loaded_summary()),
            Err(CoreError::FetchFailed("flaky".to_string())),
            Err(CoreError::FetchFailed("flaky".to_string())),
            Err(CoreError::FetchFailed("flaky".to_string())),
        ]);
        let watcher = UsageWatcher::spawn(source, None, Duration::from_millis(10));

        let mut rx = watcher.subscribe();
        let view = rx
            .wait_for(|v| v.has_data() && v.error.is_some())
            .await
            .unwrap()
            .clone();

        // The failed refresh kept the previous summary.
        assert_eq!(view.usage.unwrap().db_size, FeatureUsage::new(10, 100));
    }

    #[tokio::test]
    async fn test_fetch_once_success_and_failure() {
        let ok = ScriptedSource::new(vec![Ok(loaded_summary())]);
        let view = fetch_once(&ok, Some("acme")).await;
        assert!(view.has_data());
        assert!(view.error.is_none());

        let bad = ScriptedSource::new(vec![Err(CoreError::FetchFailed("down".to_string()))]);
        let view = fetch_once(&bad, Some("acme")).await;
        assert!(!view.has_data());
        assert_eq!(view.error.unwrap().seq, 1);
    }
}
