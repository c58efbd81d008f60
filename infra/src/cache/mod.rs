//! Cache module for the Redis-backed revocation cache

pub mod redis_client;
pub mod revocation_store;


pub use redis_client::RedisClient;
pub use revocation_store::RedisRevocationStore;

// Re-export commonly used types
pub use sl_shared::CacheConfig;
