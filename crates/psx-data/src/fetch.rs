//! 소스 응답 본문 조회.

use async_trait::async_trait;
use psx_core::{HttpConfig, SourceKind};
use reqwest::Client;
use tracing::{debug, instrument};

use crate::error::{DataError, Result};

/// 소스 URL에서 응답 본문을 가져오는 전송 계층.
///
/// 집계기는 이 트레잇에만 의존하므로 테스트에서는 메모리 구현으로 대체할 수
/// 있습니다.
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    /// GET 요청 후 본문 텍스트를 반환합니다. 2xx가 아니면 오류.
    async fn fetch_text(&self, kind: SourceKind, url: &str) -> Result<String>;
}

/// reqwest 기반 HTTP 조회기.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// 설정의 User-Agent와 타임아웃으로 클라이언트를 만듭니다.
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| DataError::Config(format!("HTTP 클라이언트 생성 실패: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl SourceFetcher for HttpFetcher {
    #[instrument(skip(self), fields(source = %kind))]
    async fn fetch_text(&self, kind: SourceKind, url: &str) -> Result<String> {
        let transport = |e: reqwest::Error| DataError::Transport {
            kind,
            message: e.to_string(),
        };

        let response = self.client.get(url).send().await.map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(DataError::HttpStatus {
                kind,
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(transport)?;
        debug!(bytes = body.len(), "Source body received");
        Ok(body)
    }
}
