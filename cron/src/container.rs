//! Wiring of the sweeper against MongoDB

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::info;

use sl_core::services::{Clock, ExpirationSweeper, SweepResult, SweeperSchedule, SystemClock};
use sl_infra::{MongoConnection, MongoUsedRefreshTokenRepository};

use crate::config::CronConfig;

pub struct CronContainer {
    sweeper: Arc<ExpirationSweeper>,
}

impl CronContainer {
    pub async fn new(config: &CronConfig) -> anyhow::Result<Self> {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock::new(config.time.offset()?));
        let connection = MongoConnection::connect(&config.database).await?;
        connection.health_check().await?;
        info!("MongoDB connection established");

        let repository = Arc::new(MongoUsedRefreshTokenRepository::new(connection));
        let sweeper = ExpirationSweeper::new(
            repository,
            clock,
            SweeperSchedule::from(&config.sweeper),
        );

        Ok(Self {
            sweeper: Arc::new(sweeper),
        })
    }

    pub async fn sweep_once(&self) -> SweepResult {
        self.sweeper.run_once().await
    }

    /// Spawn the daily sweep and, when configured, the pending-count poller
    pub fn start(&self) -> Vec<JoinHandle<()>> {
        let mut tasks = vec![Arc::clone(&self.sweeper).start_daily_task()];
        if let Some(poller) = Arc::clone(&self.sweeper).start_polling_task() {
            tasks.push(poller);
        }
        tasks
    }
}
