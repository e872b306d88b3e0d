//! 리포트 1회 생성.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use psx_core::{AppConfig, Report};
use psx_data::ReportAggregator;
use serde::Serialize;
use tracing::info;

use super::output::{format_csv, format_table, write_output, OutputFormat};

/// 리포트 명령 설정.
#[derive(Debug)]
pub struct ReportCommandConfig {
    /// 출력 형식
    pub format: OutputFormat,
    /// 출력 파일 경로
    pub output: Option<String>,
    /// 응답 캐시 사용 여부
    pub use_cache: bool,
}

#[derive(Serialize)]
struct ReportJson<'a> {
    #[serde(flatten)]
    report: &'a Report,
    generated_at: DateTime<Utc>,
}

/// 파이프라인을 실행하고 결과를 출력합니다. 리포트 행 수를 반환합니다.
pub async fn run_report(app_config: &AppConfig, config: ReportCommandConfig) -> Result<usize> {
    let aggregator = ReportAggregator::from_config(app_config, config.use_cache)
        .await
        .context("Failed to create report aggregator")?;

    info!("Building report...");
    let report = aggregator
        .build_report()
        .await
        .context("Failed to build report")?;

    let content = render_report(&report, config.format, Utc::now())?;
    write_output(&content, config.output.as_deref())?;

    Ok(report.len())
}

/// 리포트를 지정한 형식의 문자열로 변환합니다.
pub fn render_report(
    report: &Report,
    format: OutputFormat,
    generated_at: DateTime<Utc>,
) -> Result<String> {
    Ok(match format {
        OutputFormat::Table => {
            let mut output = String::new();
            if !report.report_date.is_empty() {
                output.push_str(&report.report_date);
                output.push_str("\n\n");
            }
            output.push_str(&format_table(&report.headers, &report.rows));
            output
        }
        OutputFormat::Csv => format_csv(&report.headers, &report.rows),
        OutputFormat::Json => serde_json::to_string_pretty(&ReportJson {
            report,
            generated_at,
        })
        .context("Failed to serialize to JSON")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_report() -> Report {
        Report {
            report_date: "Report Date: 01-May-2024".to_string(),
            headers: vec!["Symbol".to_string(), "RSI".to_string()],
            rows: vec![vec!["OGDC".to_string(), "44".to_string()]],
        }
    }

    #[test]
    fn test_render_table_includes_report_date() {
        let output = render_report(&sample_report(), OutputFormat::Table, Utc::now()).unwrap();
        assert!(output.starts_with("Report Date: 01-May-2024\n\nSymbol RSI\n"));
        assert!(output.contains("OGDC   44"));
    }

    #[test]
    fn test_render_csv() {
        let output = render_report(&sample_report(), OutputFormat::Csv, Utc::now()).unwrap();
        assert_eq!(output, "Symbol,RSI\nOGDC,44\n");
    }

    #[test]
    fn test_render_json() {
        let generated_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let output = render_report(&sample_report(), OutputFormat::Json, generated_at).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["report_date"], "Report Date: 01-May-2024");
        assert_eq!(value["headers"][1], "RSI");
        assert_eq!(value["rows"][0][0], "OGDC");
        assert_eq!(value["generated_at"], "2024-05-01T12:00:00Z");
    }
}
