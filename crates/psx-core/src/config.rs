//! 설정 관리.
//!
//! 기본값 → TOML 파일(선택) → `PSX__` 접두사 환경 변수 순서로 덮어씁니다.
//! 예: `PSX__CACHE__BACKEND=redis`, `PSX__HTTP__TIMEOUT_SECS=10`.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::logging::{LogConfig, LogFormat};
use crate::types::SourceKind;

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// 환경 변수 접두사.
pub const ENV_PREFIX: &str = "PSX";

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// 서버 설정
    pub server: ServerConfig,
    /// 데이터 소스 URL
    pub sources: SourcesConfig,
    /// HTTP 클라이언트 설정
    pub http: HttpConfig,
    /// 집계기 설정
    pub aggregator: AggregatorConfig,
    /// 응답 캐시 설정
    pub cache: CacheConfig,
    /// 로깅 설정
    pub logging: LoggingConfig,
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
    /// 정적 파일(favicon 등) 디렉토리
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            static_dir: "static".to_string(),
        }
    }
}

/// 데이터 소스 URL.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub breakouts_url: String,
    pub pe_url: String,
    pub ema_url: String,
    pub rsi_adx_url: String,
    pub settlement_url: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self::with_base_url("https://psxbreakouts.com")
    }
}

impl SourcesConfig {
    /// 같은 호스트 아래의 기본 경로로 URL을 구성합니다.
    pub fn with_base_url(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            breakouts_url: format!("{base}/"),
            pe_url: format!("{base}/psxpe"),
            ema_url: format!("{base}/psxema"),
            rsi_adx_url: format!("{base}/rsi-adx-analysis"),
            settlement_url: format!(
                "{base}/settlement-analysis/data?period=week&range=all&sector=all"
            ),
        }
    }

    /// 소스별 URL.
    pub fn url(&self, kind: SourceKind) -> &str {
        match kind {
            SourceKind::Breakouts => &self.breakouts_url,
            SourceKind::PriceEarnings => &self.pe_url,
            SourceKind::Ema => &self.ema_url,
            SourceKind::RsiAdx => &self.rsi_adx_url,
            SourceKind::Settlement => &self.settlement_url,
        }
    }
}

/// HTTP 클라이언트 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpConfig {
    /// User-Agent 헤더
    pub user_agent: String,
    /// 요청 타임아웃 (초)
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: "PSX Trends Monitor/1.0".to_string(),
            timeout_secs: 30,
        }
    }
}

impl HttpConfig {
    /// 요청 타임아웃.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// 집계기 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AggregatorConfig {
    /// 동시에 실행할 소스 조회 수
    pub max_concurrency: usize,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            max_concurrency: SourceKind::ALL.len(),
        }
    }
}

/// 캐시 백엔드.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// 프로세스 내 메모리
    #[default]
    Memory,
    /// Redis
    Redis,
    /// 캐시 사용 안 함
    None,
}

/// 응답 캐시 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    pub backend: CacheBackend,
    /// 캐시 TTL (초)
    pub ttl_secs: u64,
    pub redis_url: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::Memory,
            ttl_secs: 600,
            redis_url: "redis://127.0.0.1:6379".to_string(),
        }
    }
}

impl CacheConfig {
    /// 캐시 TTL.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl LoggingConfig {
    /// `init_logging`에 넘길 설정으로 변환합니다. 알 수 없는 형식은 pretty.
    pub fn to_log_config(&self) -> LogConfig {
        let format = self.format.parse().unwrap_or(LogFormat::Pretty);
        LogConfig::new(self.level.clone()).with_format(format)
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 기본값과 환경 변수만 사용합니다. `PORT` 환경 변수는
    /// `server.port`보다 우선합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // 파일에서 로드
            .add_source(config::File::from(path.as_ref()).required(false))
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("server.port", std::env::var("PORT").ok())?;

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> Result<Self, config::ConfigError> {
        Self::load(DEFAULT_CONFIG_PATH)
    }

    /// 서버 바인딩 주소 문자열.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
