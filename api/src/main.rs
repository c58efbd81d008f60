use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::info;

use sl_api::app::create_app;
use sl_api::bootstrap::{build_state, init_tracing};
use sl_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("failed to load configuration")?;
    init_tracing(&config.logging);

    info!("Starting Spendlog API server");

    let state = web::Data::new(build_state(&config).await?);
    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    HttpServer::new(move || create_app(state.clone()))
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    Ok(())
}
