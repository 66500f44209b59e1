//! Caching layer for read-mostly projections.
//!
//! Provides a [`CacheService`] trait with two implementations:
//! - [`RedisCache`] - Production Redis-backed cache
//! - [`NullCache`] - No-op implementation for testing/disabled caching
//!
//! Member profiles are the main cached projection: they are read on every
//! post and comment view but change only when points or ranks move.

mod null_cache;
mod redis_cache;
mod service;

pub use null_cache::NullCache;
pub use redis_cache::RedisCache;
pub use service::{CacheError, CacheResult, CacheService, member_profile_key};

#[cfg(test)]
pub use service::MockCacheService;
