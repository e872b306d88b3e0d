//! CLI 명령어 구현 모듈.

pub mod headers;
pub mod output;
pub mod report;
