//! PSX 리포트 CLI 도구 모음.
//!
//! - 리포트 1회 생성 (table, csv, json)
//! - 최종 컬럼 순서 미리보기
//! - RSI/ADX 소스 단독 조회

pub mod commands;
