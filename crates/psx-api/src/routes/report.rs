//! 리포트 endpoint.
//!
//! 요청마다 전체 파이프라인을 실행합니다. 캐시가 설정되어 있으면 소스 응답은
//! TTL 동안 재사용됩니다.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use psx_core::Report;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{upstream_error, ApiResult, UPSTREAM_FAILURE_MESSAGE};
use crate::render::{render_error, render_report};
use crate::state::AppState;

/// JSON 리포트 응답.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReportResponse {
    #[serde(flatten)]
    pub report: Report,

    /// 리포트 생성 시각
    pub generated_at: DateTime<Utc>,
}

/// HTML 리포트 페이지.
///
/// GET /
pub async fn report_page(State(state): State<Arc<AppState>>) -> Response {
    match state.aggregator.build_report().await {
        Ok(report) => Html(render_report(&report)).into_response(),
        Err(e) => {
            let (status, _) = upstream_error(e);
            (status, Html(render_error(UPSTREAM_FAILURE_MESSAGE))).into_response()
        }
    }
}

/// JSON 리포트.
///
/// GET /api/v1/report
pub async fn report_json(
    State(state): State<Arc<AppState>>,
) -> ApiResult<(StatusCode, Json<ReportResponse>)> {
    let report = state
        .aggregator
        .build_report()
        .await
        .map_err(upstream_error)?;

    Ok((
        StatusCode::OK,
        Json(ReportResponse {
            report,
            generated_at: Utc::now(),
        }),
    ))
}
