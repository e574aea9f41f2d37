use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{error, info, instrument};

use super::repository::SessionRepository;

/// Configuration for the session reaper task
#[derive(Debug, Clone)]
pub struct CleanupConfig {
    /// How often to sweep for expired sessions
    pub cleanup_interval: Duration,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            cleanup_interval: Duration::from_secs(5 * 60), // 5 minutes
        }
    }
}

/// Background task that periodically removes expired hand sessions.
/// Expiry is also checked on access, so the sweep only bounds memory held
/// by abandoned hands.
#[instrument(skip(session_repository))]
pub async fn start_cleanup_task(
    session_repository: Arc<dyn SessionRepository + Send + Sync>,
    config: CleanupConfig,
) {
    info!(
        cleanup_interval_secs = config.cleanup_interval.as_secs(),
        "Starting session cleanup background task"
    );

    let mut cleanup_interval = interval(config.cleanup_interval);

    loop {
        cleanup_interval.tick().await;

        match session_repository.cleanup_expired_sessions().await {
            Ok(removed_count) => {
                if removed_count > 0 {
                    info!(removed_count, "Session cleanup completed");
                }
            }
            Err(e) => {
                error!(error = %e, "Session cleanup task failed");
            }
        }
    }
}
