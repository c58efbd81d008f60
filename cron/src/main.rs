mod config;
mod container;

use anyhow::Context;
use futures_util::future::select_all;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use config::{CronConfig, RunMode};
use container::CronContainer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CronConfig::from_env().context("failed to load configuration")?;

    let filter = EnvFilter::try_new(&config.logging.filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mode = RunMode::from_args(std::env::args());
    info!(?mode, "Starting Spendlog cron");

    let container = CronContainer::new(&config).await?;

    if mode == RunMode::Once {
        let result = container.sweep_once().await;
        if !result.is_success() {
            anyhow::bail!("sweep failed: {}", result.errors.join("; "));
        }
        return Ok(());
    }

    let tasks = container.start();
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        (finished, _, _) = select_all(tasks) => {
            match finished {
                Ok(()) => warn!("Scheduled task exited"),
                Err(e) => error!(error = %e, "Scheduled task panicked"),
            }
        }
    }

    Ok(())
}
