//! Startup wiring: tracing, stores and services
//!
//! Builds the one `AppState` container from process configuration. Store
//! handles (Mongo client, Redis connection) are created once and shared
//! behind `Arc`s.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use sl_core::services::{
    Clock, ExpenseService, LinkCipher, MailDispatcher, MailSettings, PasswordHasher,
    RevocationLedger, SessionComponents, SessionService, SystemClock, TokenServiceConfig,
    VerificationMailService,
};
use sl_infra::{
    MongoConnection, MongoExpenseRepository, MongoMailCodeRepository,
    MongoUsedRefreshTokenRepository, MongoUserRepository, RedisClient, RedisRevocationStore,
    SendGridMailSender,
};
use sl_shared::{AppConfig, LoggingConfig};

use crate::app::AppState;

/// Install the global tracing subscriber
pub fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_new(&config.filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Connect the stores and assemble the services
pub async fn build_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock::new(config.time.offset()?));
    let store_timeout = config.database.timeout();

    let mongo = MongoConnection::connect(&config.database).await?;
    let redis = RedisClient::new(&config.cache, store_timeout).await?;

    let token_config = TokenServiceConfig::from(&config.auth);
    let ledger = Arc::new(RevocationLedger::new(
        Arc::new(RedisRevocationStore::new(redis)),
        token_config.clone(),
        clock.clone(),
    ));

    let cipher = Arc::new(LinkCipher::from_base64_key(&config.encryption.aes_key)?);
    let sender = Arc::new(SendGridMailSender::new(config.mail.clone(), store_timeout)?);
    let mail = Arc::new(VerificationMailService::new(
        Arc::new(MongoMailCodeRepository::new(mongo.clone())),
        cipher,
        MailDispatcher::new(sender),
        MailSettings::from(&config.mail),
        clock.clone(),
    ));

    let sessions = SessionService::new(SessionComponents {
        users: Arc::new(MongoUserRepository::new(mongo.clone())),
        used_tokens: Arc::new(MongoUsedRefreshTokenRepository::new(mongo.clone())),
        ledger,
        mail,
        passwords: PasswordHasher::new(config.auth.bcrypt_cost),
        token_config,
        clock: clock.clone(),
    });

    let expenses = ExpenseService::new(Arc::new(MongoExpenseRepository::new(mongo)), clock);

    info!("Application services initialized");
    Ok(AppState::new(Arc::new(sessions), Arc::new(expenses)))
}
