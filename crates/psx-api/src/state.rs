//! 모든 핸들러에서 공유되는 애플리케이션 상태.

use chrono::{DateTime, Utc};
use psx_core::CacheBackend;
use psx_data::ReportAggregator;

/// 애플리케이션 공유 상태.
///
/// `Arc`로 감싸 axum의 State extractor로 주입합니다.
#[derive(Clone)]
pub struct AppState {
    /// 리포트 집계기
    pub aggregator: ReportAggregator,

    /// 설정된 캐시 백엔드
    pub cache_backend: CacheBackend,

    /// 서버 버전
    pub version: String,

    /// 서버 시작 시간
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(aggregator: ReportAggregator, cache_backend: CacheBackend) -> Self {
        Self {
            aggregator,
            cache_backend,
            version: env!("CARGO_PKG_VERSION").to_string(),
            started_at: Utc::now(),
        }
    }

    /// 서버 업타임(초).
    pub fn uptime_secs(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }
}

/// 고정 응답을 돌려주는 메모리 조회기로 테스트용 상태를 생성합니다.
///
/// `failing`에 지정한 소스는 HTTP 500으로 실패합니다.
#[cfg(test)]
pub fn create_test_state(failing: Option<psx_core::SourceKind>) -> AppState {
    use psx_core::SourcesConfig;
    use std::sync::Arc;

    let fetcher = Arc::new(test_support::FixtureFetcher { failing });
    let aggregator = ReportAggregator::new(fetcher, SourcesConfig::default(), 5);
    AppState::new(aggregator, CacheBackend::None)
}

/// 캐시가 설정된 테스트용 상태를 생성합니다.
///
/// `healthy`가 false이면 모든 캐시 연산이 실패하는 저장소를 사용합니다.
#[cfg(test)]
pub fn create_test_state_with_cache(healthy: bool) -> AppState {
    use psx_core::SourcesConfig;
    use psx_data::{MemoryCache, ResponseCache};
    use std::sync::Arc;
    use std::time::Duration;

    let store: Arc<dyn ResponseCache> = if healthy {
        Arc::new(MemoryCache::new())
    } else {
        Arc::new(test_support::UnreachableCache)
    };
    let fetcher = Arc::new(test_support::FixtureFetcher { failing: None });
    let aggregator = ReportAggregator::new(fetcher, SourcesConfig::default(), 5)
        .with_cache(store, Duration::from_secs(600));
    AppState::new(aggregator, CacheBackend::Memory)
}
