//! 데이터 모듈 오류 타입.

use psx_core::SourceKind;
use thiserror::Error;

/// 데이터 조회/추출 오류.
///
/// 하나라도 발생하면 리포트 전체가 실패합니다. 형식이 맞지 않는 개별 행은
/// 오류가 아니라 건너뛴 행으로 처리됩니다.
#[derive(Debug, Error)]
pub enum DataError {
    /// 네트워크 오류 (연결 실패, 타임아웃, 본문 읽기 실패)
    #[error("Transport error from {kind}: {message}")]
    Transport { kind: SourceKind, message: String },

    /// 2xx가 아닌 응답
    #[error("HTTP {status} from {kind}")]
    HttpStatus { kind: SourceKind, status: u16 },

    /// 필수 요소(테이블, 헤더 행 등) 없음
    #[error("Unexpected structure in {kind}: {message}")]
    Structure { kind: SourceKind, message: String },

    /// JSON 파싱 오류
    #[error("Parse error in {kind}: {message}")]
    Parse { kind: SourceKind, message: String },

    /// 캐시 오류
    #[error("Cache error: {0}")]
    Cache(String),

    /// 조회 태스크 실패 (패닉 등)
    #[error("Task error: {0}")]
    TaskJoin(String),

    /// 잘못된 CSS 셀렉터
    #[error("Invalid selector: {0}")]
    Selector(String),

    /// 설정 오류
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DataError {
    /// 오류가 발생한 소스.
    pub fn source_kind(&self) -> Option<SourceKind> {
        match self {
            DataError::Transport { kind, .. }
            | DataError::HttpStatus { kind, .. }
            | DataError::Structure { kind, .. }
            | DataError::Parse { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// 전송 계층 실패 여부 (네트워크 오류 또는 비정상 상태 코드).
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            DataError::Transport { .. } | DataError::HttpStatus { .. }
        )
    }
}

impl From<redis::RedisError> for DataError {
    fn from(err: redis::RedisError) -> Self {
        DataError::Cache(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let err = DataError::HttpStatus {
            kind: SourceKind::Ema,
            status: 503,
        };
        assert!(err.is_transport());
        assert_eq!(err.source_kind(), Some(SourceKind::Ema));
        assert_eq!(err.to_string(), "HTTP 503 from ema");

        let err = DataError::Structure {
            kind: SourceKind::Breakouts,
            message: "no <table>".to_string(),
        };
        assert!(!err.is_transport());

        assert_eq!(DataError::Cache("down".to_string()).source_kind(), None);
    }
}
