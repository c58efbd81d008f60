//! Key-value store interface behind the revocation ledger.

use async_trait::async_trait;

use crate::errors::DomainError;

/// One blacklist marker write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevocationEntry {
    pub key: String,
    /// Unix timestamp; tokens expiring before it are rejected
    pub marker: i64,
    /// Store-level expiry of the key
    pub ttl_seconds: u64,
}

/// Revocation cache operations
///
/// Implementations must treat a missing key as `None`, never as a sentinel
/// timestamp.
#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// `SET key value EX ttl` for a single entry
    async fn set(&self, entry: RevocationEntry) -> Result<(), DomainError>;

    /// Write every entry in one atomic unit (all or none become visible)
    async fn set_all(&self, entries: Vec<RevocationEntry>) -> Result<(), DomainError>;

    /// `GET key`, parsed as a unix timestamp
    async fn get(&self, key: &str) -> Result<Option<i64>, DomainError>;
}
