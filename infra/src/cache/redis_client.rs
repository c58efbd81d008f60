//! Redis cache client implementation
//!
//! Wraps one multiplexed connection shared by every request. Operations are
//! bounded by the store timeout and are never retried.

use std::time::Duration;

use redis::{aio::MultiplexedConnection, AsyncCommands, Client};
use tracing::{debug, error, info, warn};

use sl_shared::CacheConfig;

use crate::timeout::with_timeout;
use crate::InfrastructureError;

/// Redis cache client over a multiplexed connection
///
/// Cloning shares the underlying connection.
#[derive(Clone)]
pub struct RedisClient {
    connection: MultiplexedConnection,
    timeout: Duration,
}

impl RedisClient {
    /// Connect to the configured Redis server
    ///
    /// # Arguments
    /// * `config` - Cache configuration settings
    /// * `timeout` - Bound applied to connecting and to every command
    pub async fn new(config: &CacheConfig, timeout: Duration) -> Result<Self, InfrastructureError> {
        info!("Creating Redis client with URL: {}", mask_url(&config.url));

        let client = Client::open(config.url.as_str()).map_err(|e| {
            error!("Failed to parse Redis URL: {}", e);
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let connection = with_timeout(
            timeout,
            "redis.connect",
            client.get_multiplexed_async_connection(),
        )
        .await
        .map_err(|e| {
            error!("Failed to connect to Redis: {}", e);
            e
        })?;

        info!("Redis client created successfully");
        Ok(Self { connection, timeout })
    }

    /// `SET key value EX expiry_seconds`
    pub async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        expiry_seconds: u64,
    ) -> Result<(), InfrastructureError> {
        debug!("Setting key '{}' with expiry {}s", key, expiry_seconds);
        let mut conn = self.connection.clone();
        with_timeout(
            self.timeout,
            "redis.set_ex",
            conn.set_ex::<_, _, ()>(key, value, expiry_seconds),
        )
        .await
    }

    /// Write every `(key, value, expiry_seconds)` in one MULTI/EXEC pipeline
    pub async fn set_all_with_expiry(
        &self,
        entries: &[(String, String, u64)],
    ) -> Result<(), InfrastructureError> {
        let mut pipe = redis::pipe();
        pipe.atomic();
        for (key, value, expiry_seconds) in entries {
            pipe.set_ex(key, value, *expiry_seconds).ignore();
        }

        debug!("Writing {} keys in one transaction", entries.len());
        let mut conn = self.connection.clone();
        with_timeout(
            self.timeout,
            "redis.multi_exec",
            pipe.query_async::<_, ()>(&mut conn),
        )
        .await
    }

    /// `GET key`; `None` when the key is absent or expired
    pub async fn get(&self, key: &str) -> Result<Option<String>, InfrastructureError> {
        let mut conn = self.connection.clone();
        let value = with_timeout(
            self.timeout,
            "redis.get",
            conn.get::<_, Option<String>>(key),
        )
        .await?;

        if value.is_none() {
            debug!("Key '{}' not found", key);
        }
        Ok(value)
    }

    /// PING the server
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        let mut conn = self.connection.clone();
        let response = with_timeout(
            self.timeout,
            "redis.ping",
            redis::cmd("PING").query_async::<_, String>(&mut conn),
        )
        .await?;

        if response != "PONG" {
            warn!("Redis health check returned unexpected response: {}", response);
            return Ok(false);
        }
        Ok(true)
    }
}

/// Mask credentials in a Redis URL for logging
pub(crate) fn mask_url(url: &str) -> String {
    if let Some(at_pos) = url.find('@') {
        if let Some(proto_end) = url.find("://") {
            let proto = &url[..proto_end + 3];
            let host_part = &url[at_pos..];
            return format!("{}****{}", proto, host_part);
        }
    }
    url.to_string()
}
