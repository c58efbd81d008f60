//! MongoDB client management
//!
//! Holds the long-lived driver client and database handle shared by every
//! repository, and creates the indexes the repositories rely on.

use std::time::Duration;

use mongodb::bson::doc;
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, Database, IndexModel};
use tracing::{error, info};

use sl_shared::DatabaseConfig;

use crate::timeout::with_timeout;
use crate::InfrastructureError;

pub const USER_COLLECTION: &str = "user";
pub const MAIL_COLLECTION: &str = "mail";
pub const USED_REFRESH_TOKEN_COLLECTION: &str = "usedRefreshToken";
pub const EXPENSE_COLLECTION: &str = "expense";

/// Driver client plus the configured database
///
/// Cloning is cheap; the driver client is reference counted internally.
#[derive(Clone)]
pub struct MongoConnection {
    client: Client,
    database: Database,
    timeout: Duration,
}

impl MongoConnection {
    /// Connect using the configured URI and database name
    ///
    /// # Returns
    /// * `Result<Self, InfrastructureError>` - Connection or error
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, InfrastructureError> {
        let timeout = config.timeout();
        info!(
            "Connecting to MongoDB database '{}' (store timeout {:?})",
            config.database, timeout
        );

        let mut options = with_timeout(timeout, "mongodb.parse_uri", ClientOptions::parse(&config.uri))
            .await
            .map_err(|e| match e {
                InfrastructureError::Database(e) => {
                    error!("Failed to parse MongoDB URI: {}", e);
                    InfrastructureError::Config(format!("Invalid MongoDB URI: {}", e))
                }
                other => other,
            })?;
        options.app_name = Some("spendlog".to_string());
        options.server_selection_timeout = Some(timeout);

        let client = Client::with_options(options)?;
        let database = client.database(&config.database);

        let connection = Self {
            client,
            database,
            timeout,
        };
        connection.ensure_indexes().await?;

        info!("MongoDB connection established");
        Ok(connection)
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn collection<T>(&self, name: &str) -> Collection<T> {
        self.database.collection::<T>(name)
    }

    /// Bound applied to every store operation
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Unique keys: user email, user id, (email, type) for mail codes,
    /// token id for used refresh tokens, expense id
    async fn ensure_indexes(&self) -> Result<(), InfrastructureError> {
        let unique = || IndexOptions::builder().unique(true).build();
        let indexes = [
            (USER_COLLECTION, doc! { "email": 1 }),
            (USER_COLLECTION, doc! { "user_id": 1 }),
            (MAIL_COLLECTION, doc! { "email": 1, "type": 1 }),
            (USED_REFRESH_TOKEN_COLLECTION, doc! { "token_id": 1 }),
            (EXPENSE_COLLECTION, doc! { "expense_id": 1 }),
        ];

        for (collection, keys) in indexes {
            let model = IndexModel::builder().keys(keys).options(unique()).build();
            with_timeout(
                self.timeout,
                "mongodb.create_index",
                self.collection::<mongodb::bson::Document>(collection)
                    .create_index(model, None),
            )
            .await?;
        }

        let range = IndexModel::builder()
            .keys(doc! { "user_id": 1, "expense_time": -1 })
            .build();
        with_timeout(
            self.timeout,
            "mongodb.create_index",
            self.collection::<mongodb::bson::Document>(EXPENSE_COLLECTION)
                .create_index(range, None),
        )
        .await?;

        Ok(())
    }

    /// Ping the server
    pub async fn health_check(&self) -> Result<(), InfrastructureError> {
        with_timeout(
            self.timeout,
            "mongodb.ping",
            self.database.run_command(doc! { "ping": 1 }, None),
        )
        .await?;
        Ok(())
    }
}
