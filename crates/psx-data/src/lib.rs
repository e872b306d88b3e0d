//! PSX 데이터 소스 조회와 집계.
//!
//! 이 crate는 다음을 제공합니다:
//! - 소스 응답 조회 (`SourceFetcher`, reqwest 기반 `HttpFetcher`)
//! - 응답 캐시 (메모리, Redis)
//! - 다섯 소스의 추출기
//! - 동시 조회 후 조인하는 `ReportAggregator`

pub mod aggregator;
pub mod cache;
pub mod error;
pub mod fetch;
pub mod provider;

pub use aggregator::{ReportAggregator, SourceOutput};
pub use cache::{MemoryCache, RedisResponseCache, ResponseCache, SourceCache};
pub use error::{DataError, Result};
pub use fetch::{HttpFetcher, SourceFetcher};
