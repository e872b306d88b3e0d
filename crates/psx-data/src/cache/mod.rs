//! 소스 응답 캐시.
//!
//! 원본 응답 본문을 `psx:source:{source}:{url}` 키로 저장합니다. 본문은 추출에
//! 성공한 뒤에만 저장되므로 점검 페이지처럼 해석할 수 없는 응답은 남지 않습니다.
//! 캐시 오류는 기록만 하고 조회는 계속 진행합니다.

mod memory;
mod redis_cache;

pub use memory::MemoryCache;
pub use redis_cache::RedisResponseCache;

use async_trait::async_trait;
use psx_core::{CacheBackend, CacheConfig, SourceKind};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::Result;

/// 응답 본문 캐시 저장소.
#[async_trait]
pub trait ResponseCache: Send + Sync {
    /// 캐시된 본문 조회. 없거나 만료되었으면 `None`.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// TTL과 함께 본문을 저장합니다.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;

    /// 저장소 연결 상태 확인. 외부 연결이 없는 저장소는 항상 성공.
    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}

/// 소스 응답의 캐시 키.
pub fn cache_key(kind: SourceKind, url: &str) -> String {
    format!("psx:source:{}:{}", kind, url)
}

/// 설정에 맞는 캐시 저장소를 만듭니다. `none`이면 `None`.
pub async fn from_config(config: &CacheConfig) -> Result<Option<Arc<dyn ResponseCache>>> {
    let cache: Arc<dyn ResponseCache> = match config.backend {
        CacheBackend::None => return Ok(None),
        CacheBackend::Memory => Arc::new(MemoryCache::new()),
        CacheBackend::Redis => Arc::new(RedisResponseCache::connect(&config.redis_url).await?),
    };

    info!(backend = ?config.backend, ttl_secs = config.ttl_secs, "Response cache enabled");
    Ok(Some(cache))
}

/// 집계기가 사용하는 소스 응답 캐시.
///
/// 조회/저장 오류는 경고로 남기고 캐시 미스처럼 처리합니다.
#[derive(Clone)]
pub struct SourceCache {
    store: Arc<dyn ResponseCache>,
    ttl: Duration,
}

impl SourceCache {
    pub fn new(store: Arc<dyn ResponseCache>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    /// 캐시된 본문 조회.
    pub async fn lookup(&self, kind: SourceKind, url: &str) -> Option<String> {
        match self.store.get(&cache_key(kind, url)).await {
            Ok(Some(body)) => {
                debug!(source = %kind, "Cache hit");
                Some(body)
            }
            Ok(None) => {
                debug!(source = %kind, "Cache miss");
                None
            }
            Err(e) => {
                warn!(source = %kind, error = %e, "Cache read failed, fetching directly");
                None
            }
        }
    }

    /// 추출에 성공한 본문을 저장합니다.
    pub async fn store(&self, kind: SourceKind, url: &str, body: &str) {
        if let Err(e) = self.store.set(&cache_key(kind, url), body, self.ttl).await {
            warn!(source = %kind, error = %e, "Cache write failed");
        }
    }

    /// 저장소 상태 확인.
    pub async fn health_check(&self) -> Result<()> {
        self.store.health_check().await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::DataError;

    /// 항상 실패하는 캐시.
    pub(crate) struct BrokenCache;

    #[async_trait]
    impl ResponseCache for BrokenCache {
        async fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(DataError::Cache("connection refused".to_string()))
        }

        async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<()> {
            Err(DataError::Cache("connection refused".to_string()))
        }

        async fn health_check(&self) -> Result<()> {
            Err(DataError::Cache("connection refused".to_string()))
        }
    }

    #[test]
    fn test_cache_key_format() {
        assert_eq!(
            cache_key(SourceKind::PriceEarnings, "https://psxbreakouts.com/psxpe"),
            "psx:source:pe:https://psxbreakouts.com/psxpe"
        );
    }

    #[tokio::test]
    async fn test_store_then_lookup() {
        let cache = SourceCache::new(Arc::new(MemoryCache::new()), Duration::from_secs(60));

        assert_eq!(cache.lookup(SourceKind::Ema, "http://x/ema").await, None);
        cache.store(SourceKind::Ema, "http://x/ema", "<table></table>").await;

        assert_eq!(
            cache.lookup(SourceKind::Ema, "http://x/ema").await.as_deref(),
            Some("<table></table>")
        );
        // 소스 종류가 다르면 다른 키
        assert_eq!(cache.lookup(SourceKind::Settlement, "http://x/ema").await, None);
        assert!(cache.health_check().await.is_ok());
    }

    #[tokio::test]
    async fn test_broken_cache_is_bypassed() {
        let cache = SourceCache::new(Arc::new(BrokenCache), Duration::from_secs(60));

        assert_eq!(cache.lookup(SourceKind::RsiAdx, "http://x/rsi").await, None);
        cache.store(SourceKind::RsiAdx, "http://x/rsi", "body").await;
        assert!(matches!(cache.health_check().await, Err(DataError::Cache(_))));
    }

    #[tokio::test]
    async fn test_from_config_none() {
        let config = CacheConfig {
            backend: CacheBackend::None,
            ..Default::default()
        };
        assert!(from_config(&config).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_from_config_memory() {
        let cache = from_config(&CacheConfig::default()).await.unwrap().unwrap();
        assert!(cache.health_check().await.is_ok());
    }
}
