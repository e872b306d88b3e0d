//! PSX 트렌드 리포트 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 리포트를 테이블로 출력
//! psx report
//!
//! # CSV 파일로 저장 (캐시 사용 안 함)
//! psx report -f csv -o report.csv --no-cache
//!
//! # 최종 컬럼 순서 보기
//! psx headers
//!
//! # RSI/ADX 값만 JSON으로 보기
//! psx rsi-adx -f json
//! ```

use clap::{Parser, Subcommand};
use psx_cli::commands::headers::{print_headers, print_rsi_adx};
use psx_cli::commands::output::OutputFormat;
use psx_cli::commands::report::{run_report, ReportCommandConfig};
use psx_core::{init_logging, AppConfig, DEFAULT_CONFIG_PATH};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "psx")]
#[command(about = "PSX trends CLI - 종목 지표 통합 리포트", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 경로
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 다섯 소스를 조회하여 통합 리포트 출력
    Report {
        /// 출력 형식 (table, csv, json)
        #[arg(short, long, default_value = "table")]
        format: String,

        /// 출력 파일 경로 (지정하지 않으면 stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// 응답 캐시를 사용하지 않음
        #[arg(long, default_value = "false")]
        no_cache: bool,
    },

    /// RSI/ADX 소스를 반영한 최종 컬럼 순서 출력
    Headers {
        /// 응답 캐시를 사용하지 않음
        #[arg(long, default_value = "false")]
        no_cache: bool,
    },

    /// 심볼별 RSI/ADX 값 출력
    RsiAdx {
        /// 출력 형식 (table, csv, json)
        #[arg(short, long, default_value = "table")]
        format: String,

        /// 출력 파일 경로 (지정하지 않으면 stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// 응답 캐시를 사용하지 않음
        #[arg(long, default_value = "false")]
        no_cache: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config)?;

    // stdout은 결과 전용
    init_logging(config.logging.to_log_config().with_stderr(true))
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    match cli.command {
        Commands::Report {
            format,
            output,
            no_cache,
        } => {
            let format = OutputFormat::parse(&format)?;
            let command = ReportCommandConfig {
                format,
                output,
                use_cache: !no_cache,
            };

            match run_report(&config, command).await {
                Ok(count) => info!("Report generated: {} rows", count),
                Err(e) => {
                    error!("Report failed: {:#}", e);
                    return Err(e);
                }
            }
        }

        Commands::Headers { no_cache } => {
            let count = print_headers(&config, !no_cache).await?;
            info!("{} columns", count);
        }

        Commands::RsiAdx {
            format,
            output,
            no_cache,
        } => {
            let format = OutputFormat::parse(&format)?;
            let count = print_rsi_adx(&config, format, output.as_deref(), !no_cache).await?;
            info!("RSI/ADX rows: {}", count);
        }
    }

    Ok(())
}
