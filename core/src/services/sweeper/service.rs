//! Sweeper service deleting used refresh token records past their expiry

use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::errors::DomainError;
use crate::repositories::used_token::UsedRefreshTokenRepository;
use crate::services::clock::Clock;

use super::schedule::{next_run_after, SweeperSchedule};

/// Result of a sweep
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SweepResult {
    /// Unix time the sweep compared against
    pub swept_at_unix: i64,
    /// Number of records deleted
    pub deleted: u64,
    /// Any errors encountered during the sweep
    pub errors: Vec<String>,
}

impl SweepResult {
    /// Check if the sweep was successful (no errors)
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Deletes used refresh token records whose token has expired
pub struct ExpirationSweeper {
    repository: Arc<dyn UsedRefreshTokenRepository>,
    clock: Arc<dyn Clock>,
    schedule: SweeperSchedule,
}

impl ExpirationSweeper {
    pub fn new(
        repository: Arc<dyn UsedRefreshTokenRepository>,
        clock: Arc<dyn Clock>,
        schedule: SweeperSchedule,
    ) -> Self {
        Self {
            repository,
            clock,
            schedule,
        }
    }

    /// Run a single sweep
    ///
    /// Deletes every record with `expired_at_unix <= now`. Failures are
    /// logged and reported in the result, never retried within the run.
    pub async fn run_once(&self) -> SweepResult {
        let now = self.clock.now_unix();
        let mut result = SweepResult {
            swept_at_unix: now,
            ..SweepResult::default()
        };

        match self.repository.delete_expired(now).await {
            Ok(deleted) => {
                result.deleted = deleted;
                info!(deleted, "deleted expired used refresh tokens");
            }
            Err(e) => {
                warn!(error = %e, "failed to delete expired used refresh tokens");
                result.errors.push(e.to_string());
            }
        }

        result
    }

    /// Number of records a sweep at this moment would delete
    pub async fn count_pending(&self) -> Result<u64, DomainError> {
        self.repository.count_expired(self.clock.now_unix()).await
    }

    /// Start the daily sweep as a background task
    pub fn start_daily_task(self: Arc<Self>) -> JoinHandle<()> {
        tokio::spawn(async move {
            info!(run_at = %self.schedule.run_at, "sweeper scheduled daily");

            loop {
                let now = self.clock.now();
                let next = next_run_after(now, self.schedule.run_at);
                let wait = (next - now).to_std().unwrap_or_default();

                info!(next_run = %next, "waiting for next sweep");
                tokio::time::sleep(wait).await;

                let result = self.run_once().await;
                if !result.is_success() {
                    warn!("Sweep completed with errors: {:?}", result.errors);
                }
            }
        })
    }

    /// Start the diagnostic counting loop, if an interval is configured
    pub fn start_polling_task(self: Arc<Self>) -> Option<JoinHandle<()>> {
        let interval = self.schedule.poll_interval?;

        Some(tokio::spawn(async move {
            info!(interval_seconds = interval.as_secs(), "sweeper polling started");
            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                match self.count_pending().await {
                    Ok(pending) => info!(pending, "expired used refresh tokens pending"),
                    Err(e) => warn!(error = %e, "failed to count expired used refresh tokens"),
                }
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::token::UsedRefreshToken;
    use crate::repositories::MockUsedRefreshTokenRepository;
    use crate::services::clock::ManualClock;

    const T: i64 = 1_700_000_000;

    async fn seeded(expiries: &[(&str, i64)]) -> Arc<MockUsedRefreshTokenRepository> {
        let repository = Arc::new(MockUsedRefreshTokenRepository::new());
        for (id, expired_at) in expiries {
            repository
                .insert(UsedRefreshToken {
                    token_id: id.to_string(),
                    refresh_token: format!("digest-{}", id),
                    issued_at_unix: expired_at - 3600,
                    expired_at_unix: *expired_at,
                })
                .await
                .unwrap();
        }
        repository
    }

    fn sweeper(repository: Arc<MockUsedRefreshTokenRepository>) -> ExpirationSweeper {
        ExpirationSweeper::new(
            repository,
            Arc::new(ManualClock::at_unix(T)),
            SweeperSchedule::default(),
        )
    }

    #[tokio::test]
    async fn test_sweep_deletes_exactly_the_expired_records() {
        let repository = seeded(&[("a", T - 100), ("b", T - 1), ("c", T + 100)]).await;
        let sweeper = sweeper(repository.clone());

        assert_eq!(sweeper.count_pending().await.unwrap(), 2);

        let result = sweeper.run_once().await;
        assert!(result.is_success());
        assert_eq!(result.deleted, 2);
        assert_eq!(result.swept_at_unix, T);
        assert_eq!(repository.token_ids().await, vec!["c".to_string()]);
    }

    #[tokio::test]
    async fn test_record_expiring_now_is_deleted() {
        let repository = seeded(&[("now", T)]).await;
        let result = sweeper(repository.clone()).run_once().await;
        assert_eq!(result.deleted, 1);
        assert!(repository.token_ids().await.is_empty());
    }

    #[tokio::test]
    async fn test_second_sweep_deletes_nothing() {
        let repository = seeded(&[("a", T - 100), ("b", T - 1), ("c", T + 100)]).await;
        let sweeper = sweeper(repository.clone());

        assert_eq!(sweeper.run_once().await.deleted, 2);
        let second = sweeper.run_once().await;
        assert!(second.is_success());
        assert_eq!(second.deleted, 0);
        assert_eq!(repository.token_ids().await.len(), 1);
    }

    #[tokio::test]
    async fn test_store_failure_is_reported_not_raised() {
        let repository = seeded(&[("a", T - 100)]).await;
        repository.set_fail_deletes(true);

        let result = sweeper(repository.clone()).run_once().await;
        assert!(!result.is_success());
        assert_eq!(result.deleted, 0);
        assert_eq!(repository.token_ids().await.len(), 1);
    }

    #[tokio::test]
    async fn test_polling_requires_an_interval() {
        let repository = seeded(&[]).await;
        assert!(Arc::new(sweeper(repository)).start_polling_task().is_none());
    }
}
