//! PSX 트렌드 리포트 서버.
//!
//! 설정 파일 경로는 `PSX_CONFIG` 환경변수로 바꿀 수 있습니다
//! (기본값: `config/default.toml`).

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::http::StatusCode;
use psx_core::{init_logging, AppConfig, DEFAULT_CONFIG_PATH};
use psx_data::ReportAggregator;
use psx_api::{create_router, AppState};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// 업스트림 타임아웃에 더하는 여유 시간.
const REQUEST_TIMEOUT_MARGIN: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 파일 로드 (없으면 무시)
    dotenvy::dotenv().ok();

    let config_path =
        std::env::var("PSX_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = AppConfig::load(&config_path)
        .with_context(|| format!("설정 로드 실패: {config_path}"))?;

    init_logging(config.logging.to_log_config())
        .map_err(|e| anyhow::anyhow!("로깅 초기화 실패: {e}"))?;

    info!(config = %config_path, "Starting PSX trends server...");

    let aggregator = ReportAggregator::from_config(&config, true)
        .await
        .context("리포트 집계기 생성 실패")?;
    let state = Arc::new(AppState::new(aggregator, config.cache.backend));

    info!(
        version = %state.version,
        cache = ?config.cache.backend,
        max_concurrency = config.aggregator.max_concurrency,
        "Application state initialized"
    );

    let app = create_router(state, &config.server.static_dir)
        .layer(TraceLayer::new_for_http())
        // 전체 파이프라인 타임아웃 - 504 상태 코드 반환
        .layer(TimeoutLayer::with_status_code(
            StatusCode::GATEWAY_TIMEOUT,
            config.http.timeout() + REQUEST_TIMEOUT_MARGIN,
        ));

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("바인딩 실패: {addr}"))?;

    info!(%addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Graceful shutdown 시그널 대기.
///
/// Ctrl+C 또는 SIGTERM 시그널을 수신하면 반환합니다.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
