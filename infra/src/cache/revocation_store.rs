//! Redis implementation of the RevocationStore trait.
//!
//! Markers are stored as decimal unix timestamps.

use async_trait::async_trait;
use tracing::{debug, error};

use sl_core::errors::DomainError;
use sl_core::repositories::{RevocationEntry, RevocationStore};

use super::redis_client::RedisClient;
use crate::InfrastructureError;

pub struct RedisRevocationStore {
    client: RedisClient,
}

impl RedisRevocationStore {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }
}

pub(crate) fn encode_entry(entry: &RevocationEntry) -> (String, String, u64) {
    (entry.key.clone(), entry.marker.to_string(), entry.ttl_seconds)
}

pub(crate) fn parse_marker(key: &str, value: Option<String>) -> Result<Option<i64>, InfrastructureError> {
    match value {
        None => Ok(None),
        Some(raw) => raw.trim().parse::<i64>().map(Some).map_err(|_| {
            InfrastructureError::Mapping(format!("blacklist value of '{}' is not a timestamp", key))
        }),
    }
}

#[async_trait]
impl RevocationStore for RedisRevocationStore {
    async fn set(&self, entry: RevocationEntry) -> Result<(), DomainError> {
        let (key, value, ttl) = encode_entry(&entry);
        self.client.set_with_expiry(&key, &value, ttl).await?;
        debug!("Wrote blacklist marker '{}'", key);
        Ok(())
    }

    async fn set_all(&self, entries: Vec<RevocationEntry>) -> Result<(), DomainError> {
        let encoded: Vec<_> = entries.iter().map(encode_entry).collect();
        self.client
            .set_all_with_expiry(&encoded)
            .await
            .map_err(|e| {
                error!("Failed to write blacklist markers: {}", e);
                e
            })?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<i64>, DomainError> {
        let value = self.client.get(key).await?;
        Ok(parse_marker(key, value)?)
    }
}
