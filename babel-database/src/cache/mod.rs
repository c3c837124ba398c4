mod noop_store;
mod redis_store;

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use noop_store::NoopCacheStore;
use redis_store::RedisCacheStore;

/// TTL for cached single-profile reads. Mutation paths invalidate their
/// keys eagerly; the TTL only bounds staleness when an invalidation is lost.
pub const PROFILE_CACHE_TTL: Duration = Duration::from_secs(120);

/// Cache key for one user's tower profile.
pub fn profile_cache_key(cache: &CacheService, user_id: u64) -> String {
    cache.key(format!("profile:{user_id}"))
}

#[derive(Clone, Debug)]
enum CacheBackend {
    Disabled(NoopCacheStore),
    Redis(RedisCacheStore),
}

/// Optional read cache in front of the profile store.
///
/// With the `Disabled` backend every call is a no-op miss, so callers can
/// use one code path whether or not Redis is configured. Leaderboard scans
/// never go through this service; standings are always recomputed from the
/// database.
#[derive(Clone, Debug)]
pub struct CacheService {
    key_prefix: String,
    backend: CacheBackend,
}

impl CacheService {
    pub fn disabled(prefix: impl Into<String>) -> Self {
        Self {
            key_prefix: prefix.into(),
            backend: CacheBackend::Disabled(NoopCacheStore),
        }
    }

    pub fn redis(redis_url: &str, prefix: impl Into<String>) -> anyhow::Result<Self> {
        Ok(Self {
            key_prefix: prefix.into(),
            backend: CacheBackend::Redis(RedisCacheStore::from_url(redis_url)?),
        })
    }

    pub fn key(&self, suffix: impl AsRef<str>) -> String {
        format!("{}:{}", self.key_prefix, suffix.as_ref())
    }

    pub fn is_redis_enabled(&self) -> bool {
        matches!(self.backend, CacheBackend::Redis(_))
    }

    /// Round-trip the backend connection for the startup health check.
    pub async fn ping(&self) -> anyhow::Result<()> {
        match &self.backend {
            CacheBackend::Disabled(store) => store.ping().await,
            CacheBackend::Redis(store) => store.ping().await,
        }
    }

    pub async fn get_json<T>(&self, key: &str) -> anyhow::Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let value = match &self.backend {
            CacheBackend::Disabled(store) => store.get(key).await,
            CacheBackend::Redis(store) => store.get(key).await,
        }?;

        match value {
            Some(bytes) => {
                let parsed = serde_json::from_slice(&bytes).map_err(|e| {
                    anyhow::anyhow!("failed to deserialize cache value for `{key}`: {e}")
                })?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    pub async fn set_json<T>(&self, key: &str, value: &T, ttl: Duration) -> anyhow::Result<()>
    where
        T: Serialize,
    {
        let ttl_seconds = ttl.as_secs().max(1);
        let payload = serde_json::to_vec(value)
            .map_err(|e| anyhow::anyhow!("failed to serialize cache value for `{key}`: {e}"))?;

        match &self.backend {
            CacheBackend::Disabled(store) => store.set(key, payload, ttl_seconds).await,
            CacheBackend::Redis(store) => store.set(key, payload, ttl_seconds).await,
        }
    }

    pub async fn del(&self, key: &str) -> anyhow::Result<()> {
        match &self.backend {
            CacheBackend::Disabled(store) => store.del(key).await,
            CacheBackend::Redis(store) => store.del(key).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CacheService, profile_cache_key};

    #[test]
    fn keys_are_namespaced_by_prefix() {
        let cache = CacheService::disabled("babel:test");

        assert_eq!(cache.key("profile:1"), "babel:test:profile:1");
        assert_eq!(profile_cache_key(&cache, 42), "babel:test:profile:42");
    }

    #[test]
    fn disabled_backend_reports_itself() {
        let cache = CacheService::disabled("babel:test");

        assert!(!cache.is_redis_enabled());
    }
}
