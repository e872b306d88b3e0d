//! 다섯 소스를 동시에 조회하여 리포트를 만드는 집계기.
//!
//! # 동작
//!
//! 1. 소스마다 태스크 하나를 띄웁니다. 동시 실행 수는 리포트 실행마다
//!    `buffer_unordered`로 제한하므로 동시에 들어온 요청끼리는 서로 기다리지 않습니다.
//! 2. 완료 순서대로 결과를 모으되, 실패가 있어도 나머지 태스크를 끝까지 기다립니다.
//! 3. 실패가 하나라도 있으면 처음 관측된 오류를 반환합니다 (부분 리포트 없음).
//! 4. 모두 성공하면 심볼 기준으로 조인하여 리포트를 조립합니다.
//!
//! 캐시가 있으면 추출에 성공한 본문만 저장합니다.
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! let aggregator = ReportAggregator::from_config(&config, true).await?;
//! let report = aggregator.build_report().await?;
//! println!("{} rows", report.len());
//! ```

use futures::stream::{self, StreamExt};
use psx_core::{
    join, AppConfig, BreakoutsPage, EmaRecord, PeRecord, Report, RsiAdxTable, SettlementRecord,
    SourceBundle, SourceKind, SourcesConfig,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info, info_span, warn, Instrument};

use crate::cache::{self, ResponseCache, SourceCache};
use crate::error::{DataError, Result};
use crate::fetch::{HttpFetcher, SourceFetcher};
use crate::provider::{breakouts, ema, pe, rsi_adx, settlement};

/// 한 소스의 추출 결과.
#[derive(Debug)]
pub enum SourceOutput {
    Breakouts(BreakoutsPage),
    PriceEarnings(Vec<PeRecord>),
    Ema(Vec<EmaRecord>),
    RsiAdx(RsiAdxTable),
    Settlement(Vec<SettlementRecord>),
}

impl SourceOutput {
    /// 소스 종류에 맞는 추출기로 본문을 해석합니다.
    pub fn extract(kind: SourceKind, body: &str) -> Result<Self> {
        Ok(match kind {
            SourceKind::Breakouts => Self::Breakouts(breakouts::extract(body)?),
            SourceKind::PriceEarnings => Self::PriceEarnings(pe::extract(body)?),
            SourceKind::Ema => Self::Ema(ema::extract(body)?),
            SourceKind::RsiAdx => Self::RsiAdx(rsi_adx::extract(body)?),
            SourceKind::Settlement => Self::Settlement(settlement::extract(body)?),
        })
    }

    /// 추출된 레코드 수.
    pub fn len(&self) -> usize {
        match self {
            Self::Breakouts(page) => page.records.len(),
            Self::PriceEarnings(records) => records.len(),
            Self::Ema(records) => records.len(),
            Self::RsiAdx(table) => table.rows().len(),
            Self::Settlement(records) => records.len(),
        }
    }

    /// 레코드가 없는지 여부.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn merge_into(self, bundle: &mut SourceBundle) {
        match self {
            Self::Breakouts(page) => bundle.breakouts = page,
            Self::PriceEarnings(records) => bundle.pe = records,
            Self::Ema(records) => bundle.ema = records,
            Self::RsiAdx(table) => bundle.rsi_adx = table,
            Self::Settlement(records) => bundle.settlement = records,
        }
    }
}

/// 소스 하나를 조회하고 추출합니다.
async fn run_source(
    fetcher: Arc<dyn SourceFetcher>,
    cache: Option<SourceCache>,
    kind: SourceKind,
    url: String,
) -> Result<SourceOutput> {
    let started = Instant::now();

    if let Some(cache) = &cache {
        if let Some(body) = cache.lookup(kind, &url).await {
            match SourceOutput::extract(kind, &body) {
                Ok(output) => {
                    info!(records = output.len(), cached = true, "Source extracted");
                    return Ok(output);
                }
                Err(e) => warn!(error = %e, "Cached body no longer extracts, refetching"),
            }
        }
    }

    let body = fetcher.fetch_text(kind, &url).await?;
    let output = SourceOutput::extract(kind, &body)?;

    if let Some(cache) = &cache {
        cache.store(kind, &url, &body).await;
    }

    info!(
        records = output.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Source extracted"
    );
    Ok(output)
}

/// 다섯 소스를 조회/조인하는 리포트 집계기.
#[derive(Clone)]
pub struct ReportAggregator {
    fetcher: Arc<dyn SourceFetcher>,
    cache: Option<SourceCache>,
    sources: SourcesConfig,
    max_concurrency: usize,
}

impl ReportAggregator {
    /// 조회기, 소스 URL, 리포트 1회당 최대 동시 조회 수로 집계기를 만듭니다.
    pub fn new(
        fetcher: Arc<dyn SourceFetcher>,
        sources: SourcesConfig,
        max_concurrency: usize,
    ) -> Self {
        Self {
            fetcher,
            cache: None,
            sources,
            max_concurrency: max_concurrency.max(1),
        }
    }

    /// 응답 캐시를 설정합니다.
    pub fn with_cache(mut self, store: Arc<dyn ResponseCache>, ttl: Duration) -> Self {
        self.cache = Some(SourceCache::new(store, ttl));
        self
    }

    /// 설정에서 HTTP 조회기와 캐시를 구성합니다.
    ///
    /// `use_cache`가 false이면 설정과 관계없이 캐시를 사용하지 않습니다.
    pub async fn from_config(config: &AppConfig, use_cache: bool) -> Result<Self> {
        let http: Arc<dyn SourceFetcher> = Arc::new(HttpFetcher::new(&config.http)?);
        let aggregator = Self::new(
            http,
            config.sources.clone(),
            config.aggregator.max_concurrency,
        );

        let store = if use_cache {
            cache::from_config(&config.cache).await?
        } else {
            None
        };

        Ok(match store {
            Some(store) => aggregator.with_cache(store, config.cache.ttl()),
            None => aggregator,
        })
    }

    /// 소스 URL 설정.
    pub fn sources(&self) -> &SourcesConfig {
        &self.sources
    }

    /// 캐시 저장소 상태. 캐시가 없으면 `None`.
    pub async fn cache_health(&self) -> Option<Result<()>> {
        match &self.cache {
            Some(cache) => Some(cache.health_check().await),
            None => None,
        }
    }

    fn spawn_source(&self, kind: SourceKind) -> tokio::task::JoinHandle<Result<SourceOutput>> {
        let url = self.sources.url(kind).to_string();
        let span = info_span!("source", source = %kind, url = %url);
        tokio::spawn(
            run_source(self.fetcher.clone(), self.cache.clone(), kind, url).instrument(span),
        )
    }

    /// 모든 소스를 동시에 조회하여 추출 결과 묶음을 반환합니다.
    pub async fn fetch_bundle(&self) -> Result<SourceBundle> {
        // 태스크는 buffer_unordered가 폴링할 때 생성됨
        let mut results = stream::iter(SourceKind::ALL)
            .map(|kind| async move { (kind, self.spawn_source(kind).await) })
            .buffer_unordered(self.max_concurrency);

        let mut bundle = SourceBundle::default();
        let mut first_error: Option<DataError> = None;

        while let Some((kind, joined)) = results.next().await {
            let result = joined
                .map_err(|e| DataError::TaskJoin(format!("{kind}: {e}")))
                .and_then(|output| output);

            match result {
                Ok(output) => output.merge_into(&mut bundle),
                Err(e) => {
                    error!(source = %kind, error = %e, "Source failed");
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(bundle),
        }
    }

    /// 전체 파이프라인을 실행하여 리포트를 만듭니다.
    pub async fn build_report(&self) -> Result<Report> {
        let started = Instant::now();
        let bundle = self.fetch_bundle().await?;
        let report = join(&bundle);

        info!(
            rows = report.len(),
            columns = report.headers.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Report assembled"
        );
        Ok(report)
    }

    /// RSI/ADX 소스만 조회합니다.
    pub async fn fetch_rsi_adx(&self) -> Result<RsiAdxTable> {
        let kind = SourceKind::RsiAdx;
        let joined = self.spawn_source(kind).await;

        match joined.map_err(|e| DataError::TaskJoin(format!("{kind}: {e}")))?? {
            SourceOutput::RsiAdx(table) => Ok(table),
            other => Err(DataError::TaskJoin(format!(
                "unexpected output for {kind}: {} records",
                other.len()
            ))),
        }
    }
}
