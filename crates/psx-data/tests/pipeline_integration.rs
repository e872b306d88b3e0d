//! HTTP 목 서버를 사용한 파이프라인 통합 테스트.

use mockito::{Matcher, Mock, Server, ServerGuard};
use psx_core::{AppConfig, CacheBackend, SourceKind, SourcesConfig};
use psx_data::{DataError, ReportAggregator};

const BREAKOUTS: &str = r#"
<html><body>
  <p class="meta">Report Date: 01-May-2024</p>
  <table class="breakouts">
    <thead>
      <tr><th>Sector</th><th>Symbol</th><th>Company</th><th>Close</th>
          <th>Daily Status</th><th>Weekly Status</th><th>Monthly Status</th></tr>
    </thead>
    <tbody>
      <tr><td>Cement</td><td>LUCK</td><td>Lucky Cement</td><td>712.3</td><td>Breakout</td><td>Up</td><td>Up</td></tr>
      <tr><td>Energy</td><td>ogdc</td><td>Oil &amp; Gas Dev</td><td>120.1</td><td>Down</td><td>Down</td><td>Up</td></tr>
      <tr><td>Misc</td><td></td><td>Unknown</td><td>1</td><td></td><td></td><td></td></tr>
    </tbody>
  </table>
</body></html>
"#;

const PE: &str = r#"
<table>
  <thead><tr><th>Company</th><th>Price</th><th>PE</th><th>Sector PE</th><th>Discount</th></tr></thead>
  <tbody>
    <tr><td><a>OGDC</a><br><span>Oil &amp; Gas Dev</span></td><td>120.1</td><td>4.1</td><td>6.0</td><td>31%</td></tr>
  </tbody>
</table>
"#;

const EMA: &str = r#"
<table>
  <tbody>
    <tr><td>LUCK<br>Lucky Cement</td><td>+0.5%</td><td>712.3</td><td>700</td><td>690</td><td>680</td><td>650</td><td>600</td></tr>
  </tbody>
</table>
"#;

const RSI_ADX: &str = r#"
<table>
  <thead><tr><th>Symbol</th><th>Sector</th><th>ADX</th><th>RSI</th><th>Current Price</th><th>% Change</th></tr></thead>
  <tbody>
    <tr><td>LUCK</td><td>Cement</td><td>28</td><td>61</td><td>712.3</td><td>+0.5%</td></tr>
    <tr><td>OGDC</td><td>Energy</td><td>15</td><td>44</td><td>120.1</td><td>-1.0%</td></tr>
  </tbody>
</table>
"#;

const SETTLEMENT: &str = r#"{"data": [
  {"company_code": "luck", "avg_volume_percentage": 37.5, "total_settlement_volume": 1200000}
]}"#;

struct MockSite {
    server: ServerGuard,
    mocks: Vec<Mock>,
}

impl MockSite {
    async fn start() -> Self {
        let server = Server::new_async().await;
        Self {
            server,
            mocks: Vec::new(),
        }
    }

    async fn route(&mut self, path: Matcher, status: usize, content_type: &str, body: &str) {
        let mock = self
            .server
            .mock("GET", path)
            .with_status(status)
            .with_header("content-type", content_type)
            .with_body(body)
            .create_async()
            .await;
        self.mocks.push(mock);
    }

    async fn route_all(&mut self, overrides: &[(SourceKind, usize, &str)]) {
        for kind in SourceKind::ALL {
            let (status, body) = overrides
                .iter()
                .find(|(k, _, _)| *k == kind)
                .map(|(_, status, body)| (*status, *body))
                .unwrap_or((200, default_body(kind)));
            let content_type = if kind == SourceKind::Settlement {
                "application/json"
            } else {
                "text/html"
            };
            self.route(path_matcher(kind), status, content_type, body).await;
        }
    }

    fn config(&self, backend: CacheBackend) -> AppConfig {
        let mut config = AppConfig::default();
        config.sources = SourcesConfig::with_base_url(&self.server.url());
        config.cache.backend = backend;
        config
    }
}

fn default_body(kind: SourceKind) -> &'static str {
    match kind {
        SourceKind::Breakouts => BREAKOUTS,
        SourceKind::PriceEarnings => PE,
        SourceKind::Ema => EMA,
        SourceKind::RsiAdx => RSI_ADX,
        SourceKind::Settlement => SETTLEMENT,
    }
}

fn path_matcher(kind: SourceKind) -> Matcher {
    match kind {
        SourceKind::Breakouts => Matcher::Exact("/".to_string()),
        SourceKind::PriceEarnings => Matcher::Exact("/psxpe".to_string()),
        SourceKind::Ema => Matcher::Exact("/psxema".to_string()),
        SourceKind::RsiAdx => Matcher::Exact("/rsi-adx-analysis".to_string()),
        SourceKind::Settlement => Matcher::Regex("^/settlement-analysis/data".to_string()),
    }
}

#[tokio::test]
async fn test_full_report_from_http_sources() {
    let mut site = MockSite::start().await;
    site.route_all(&[]).await;

    let aggregator = ReportAggregator::from_config(&site.config(CacheBackend::None), true)
        .await
        .unwrap();
    let report = aggregator.build_report().await.unwrap();

    assert_eq!(report.report_date, "Report Date: 01-May-2024");
    assert_eq!(
        &report.headers[13..19],
        [
            "EMA100",
            "EMA200",
            "RSI",
            "ADX",
            "Total_Settlement_Volume",
            "Settlement_Ratio_By_Volume",
        ]
    );

    // 심볼이 빈 행은 제외
    assert_eq!(report.len(), 2);

    let luck = &report.rows[0];
    assert_eq!(luck[1], "LUCK");
    assert_eq!(luck[7], "");
    assert_eq!(&luck[10..15], ["700", "690", "680", "650", "600"]);
    assert_eq!(luck[15], "61");
    assert_eq!(luck[16], "28");
    assert_eq!(luck[17], "1200000");
    assert_eq!(luck[18], "37.5");

    let ogdc = &report.rows[1];
    assert_eq!(ogdc[1], "ogdc");
    assert_eq!(&ogdc[7..10], ["4.1", "6.0", "31%"]);
    assert_eq!(ogdc[10], "");
    assert_eq!(&ogdc[15..17], ["44", "15"]);
    assert_eq!(&ogdc[17..19], ["", ""]);
}

#[tokio::test]
async fn test_non_success_status_fails_report() {
    let mut site = MockSite::start().await;
    site.route_all(&[(SourceKind::PriceEarnings, 500, "boom")]).await;

    let aggregator = ReportAggregator::from_config(&site.config(CacheBackend::None), false)
        .await
        .unwrap();
    let err = aggregator.build_report().await.unwrap_err();

    assert!(err.is_transport());
    assert!(matches!(
        err,
        DataError::HttpStatus {
            kind: SourceKind::PriceEarnings,
            status: 500
        }
    ));
}

#[tokio::test]
async fn test_rsi_adx_without_table_degrades() {
    let mut site = MockSite::start().await;
    site.route_all(&[(SourceKind::RsiAdx, 200, "<html><body>Coming soon</body></html>")])
        .await;

    let aggregator = ReportAggregator::from_config(&site.config(CacheBackend::None), false)
        .await
        .unwrap();
    let report = aggregator.build_report().await.unwrap();

    assert_eq!(report.headers.len(), 17);
    assert_eq!(report.len(), 2);
    assert!(report.rows.iter().all(|row| row.len() == 17));
}

#[tokio::test]
async fn test_invalid_settlement_json_fails_report() {
    let mut site = MockSite::start().await;
    site.route_all(&[(SourceKind::Settlement, 200, "<html>not json</html>")])
        .await;

    let aggregator = ReportAggregator::from_config(&site.config(CacheBackend::None), false)
        .await
        .unwrap();
    let err = aggregator.build_report().await.unwrap_err();

    assert!(matches!(
        err,
        DataError::Parse {
            kind: SourceKind::Settlement,
            ..
        }
    ));
}

#[tokio::test]
async fn test_memory_cache_avoids_second_fetch() {
    let mut site = MockSite::start().await;
    for kind in SourceKind::ALL {
        let content_type = if kind == SourceKind::Settlement {
            "application/json"
        } else {
            "text/html"
        };
        let mock = site
            .server
            .mock("GET", path_matcher(kind))
            .with_status(200)
            .with_header("content-type", content_type)
            .with_body(default_body(kind))
            .expect(1)
            .create_async()
            .await;
        site.mocks.push(mock);
    }

    let aggregator = ReportAggregator::from_config(&site.config(CacheBackend::Memory), true)
        .await
        .unwrap();

    let first = aggregator.build_report().await.unwrap();
    let second = aggregator.build_report().await.unwrap();
    assert_eq!(first, second);

    for mock in &site.mocks {
        mock.assert_async().await;
    }
}

#[tokio::test]
async fn test_no_cache_flag_fetches_every_time() {
    let mut site = MockSite::start().await;
    let mock = site
        .server
        .mock("GET", path_matcher(SourceKind::RsiAdx))
        .with_status(200)
        .with_body(RSI_ADX)
        .expect(2)
        .create_async()
        .await;

    let aggregator = ReportAggregator::from_config(&site.config(CacheBackend::Memory), false)
        .await
        .unwrap();

    aggregator.fetch_rsi_adx().await.unwrap();
    let table = aggregator.fetch_rsi_adx().await.unwrap();
    assert_eq!(table.headers(), ["RSI".to_string(), "ADX".to_string()].as_slice());

    mock.assert_async().await;
}
