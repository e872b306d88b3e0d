//! 프로세스 내 메모리 캐시.

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

use super::ResponseCache;
use crate::error::Result;

/// 만료 시각이 있는 항목.
#[derive(Debug)]
struct Entry {
    value: String,
    expires_at: Instant,
}

/// `RwLock<HashMap>` 기반 메모리 캐시.
///
/// 만료된 항목은 조회 시 무시되고, 저장 시 정리됩니다.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// 만료되지 않은 항목이 없는지 여부.
    pub async fn is_empty(&self) -> bool {
        let now = Instant::now();
        let entries = self.entries.read().await;
        !entries.values().any(|entry| entry.expires_at > now)
    }
}

#[async_trait]
impl ResponseCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .filter(|entry| entry.expires_at > Instant::now())
            .map(|entry| entry.value.clone()))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;

        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: now + ttl,
            },
        );
        Ok(())
    }
}
