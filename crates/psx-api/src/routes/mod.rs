//! REST API 라우트.
//!
//! # 엔드포인트
//!
//! - `GET /` - HTML 리포트
//! - `GET /api/v1/report` - JSON 리포트
//! - `GET /health`, `GET /health/ready` - 헬스 체크
//! - `GET /favicon.ico` - 정적 파일

pub mod health;
pub mod report;

use axum::{routing::get, Router};
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeFile;

use crate::state::AppState;

pub use health::{health_check, health_ready, health_router, HealthResponse};
pub use report::{report_json, report_page, ReportResponse};

/// 전체 라우터를 생성합니다.
///
/// `static_dir`에 `favicon.ico`가 없으면 해당 경로는 404를 반환합니다.
pub fn create_router(state: Arc<AppState>, static_dir: impl AsRef<Path>) -> Router {
    let favicon = ServeFile::new(static_dir.as_ref().join("favicon.ico"));

    Router::new()
        .route("/", get(report_page))
        .route("/api/v1/report", get(report_json))
        .nest("/health", health_router())
        .route_service("/favicon.ico", favicon)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::create_test_state;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    fn request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_router_serves_all_endpoints() {
        let app = create_router(Arc::new(create_test_state(None)), "does-not-exist");

        for uri in ["/", "/api/v1/report", "/health", "/health/ready"] {
            let response = app.clone().oneshot(request(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_missing_favicon_is_not_found() {
        let app = create_router(Arc::new(create_test_state(None)), "does-not-exist");
        let response = app.oneshot(request("/favicon.ico")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_favicon_served_from_static_dir() {
        let dir = std::env::temp_dir().join(format!("psx-static-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("favicon.ico"), [0u8, 0, 1, 0]).unwrap();

        let app = create_router(Arc::new(create_test_state(None)), &dir);
        let response = app.oneshot(request("/favicon.ico")).await.unwrap();
        std::fs::remove_dir_all(&dir).ok();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let app = create_router(Arc::new(create_test_state(None)), "static");
        let response = app.oneshot(request("/nope")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
