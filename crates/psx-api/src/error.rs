//! API 에러 응답 타입.

use axum::http::StatusCode;
use axum::Json;
use psx_data::DataError;
use serde::{Deserialize, Serialize};
use tracing::error;

/// API 에러 응답.
///
/// ```json
/// {
///   "code": "UPSTREAM_ERROR",
///   "message": "Failed to build report from upstream sources",
///   "timestamp": 1738300800
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// 에러 코드 (예: "UPSTREAM_ERROR")
    pub code: String,
    /// 사람이 읽을 수 있는 에러 메시지
    pub message: String,
    /// 에러 발생 타임스탬프 (Unix timestamp, 선택적)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl ApiErrorResponse {
    /// 타임스탬프를 포함한 에러를 생성합니다.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            timestamp: Some(chrono::Utc::now().timestamp()),
        }
    }

    /// 타임스탬프 없는 간단한 에러.
    pub fn simple(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            timestamp: None,
        }
    }
}

impl std::fmt::Display for ApiErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiErrorResponse {}

/// API 핸들러 Result 타입 별칭.
pub type ApiResult<T> = Result<T, (StatusCode, Json<ApiErrorResponse>)>;

/// 업스트림 실패 시 클라이언트에 보여줄 메시지. 상세 원인은 로그에만 남깁니다.
pub const UPSTREAM_FAILURE_MESSAGE: &str = "Failed to build report from upstream sources";

/// 파이프라인 오류를 502 응답으로 변환합니다.
pub fn upstream_error(err: DataError) -> (StatusCode, Json<ApiErrorResponse>) {
    error!(
        error = %err,
        source = ?err.source_kind(),
        "Report pipeline failed"
    );
    (
        StatusCode::BAD_GATEWAY,
        Json(ApiErrorResponse::new("UPSTREAM_ERROR", UPSTREAM_FAILURE_MESSAGE)),
    )
}
