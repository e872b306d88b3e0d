//! PSX 트렌드 리포트 HTTP 서버.
//!
//! - `GET /` : HTML 리포트
//! - `GET /api/v1/report` : JSON 리포트
//! - `GET /health`, `GET /health/ready` : 헬스 체크

pub mod error;
pub mod render;
pub mod routes;
pub mod state;

pub use error::{ApiErrorResponse, ApiResult};
pub use routes::create_router;
pub use state::AppState;
