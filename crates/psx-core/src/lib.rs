//! # PSX Core
//!
//! PSX 지표 리포트의 핵심 도메인 모델을 제공합니다.
//!
//! - 심볼 정규화와 소스 구분
//! - 소스별 레코드와 행 검증 결과
//! - RSI/ADX 헤더 재정렬
//! - 심볼 기준 조인과 리포트 조립
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod logging;
pub mod types;

pub use config::*;
pub use domain::*;
pub use logging::*;
pub use types::*;
