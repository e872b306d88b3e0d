//! RSI/ADX 소스만 조회하는 명령.
//!
//! - `headers`: RSI/ADX 헤더를 반영한 최종 컬럼 순서
//! - `rsi-adx`: 심볼별 재정렬된 RSI/ADX 값

use anyhow::{Context, Result};
use psx_core::{final_headers, AppConfig, RsiAdxTable};
use psx_data::ReportAggregator;
use serde::Serialize;
use tracing::info;

use super::output::{format_csv, format_table, write_output, OutputFormat};

/// RSI/ADX 테이블을 조회합니다.
async fn fetch_table(app_config: &AppConfig, use_cache: bool) -> Result<RsiAdxTable> {
    let aggregator = ReportAggregator::from_config(app_config, use_cache)
        .await
        .context("Failed to create report aggregator")?;

    let table = aggregator
        .fetch_rsi_adx()
        .await
        .context("Failed to fetch RSI/ADX source")?;

    info!(
        columns = table.headers().len(),
        rows = table.rows().len(),
        "RSI/ADX table fetched"
    );
    Ok(table)
}

/// 최종 리포트 컬럼 순서를 출력합니다.
pub async fn print_headers(app_config: &AppConfig, use_cache: bool) -> Result<usize> {
    let table = fetch_table(app_config, use_cache).await?;
    let headers = final_headers(table.headers());

    write_output(&format_header_list(&headers), None)?;
    Ok(headers.len())
}

/// 번호를 붙인 컬럼 목록.
pub fn format_header_list(headers: &[String]) -> String {
    headers
        .iter()
        .enumerate()
        .map(|(i, header)| format!("{:>2}. {}", i + 1, header))
        .collect::<Vec<_>>()
        .join("\n")
}

/// 심볼별 RSI/ADX 값을 출력합니다.
pub async fn print_rsi_adx(
    app_config: &AppConfig,
    format: OutputFormat,
    output: Option<&str>,
    use_cache: bool,
) -> Result<usize> {
    let table = fetch_table(app_config, use_cache).await?;
    let content = render_rsi_adx(&table, format)?;
    write_output(&content, output)?;
    Ok(table.rows().len())
}

#[derive(Serialize)]
struct RsiAdxJson<'a> {
    headers: &'a [String],
    rows: Vec<RsiAdxJsonRow<'a>>,
}

#[derive(Serialize)]
struct RsiAdxJsonRow<'a> {
    symbol: &'a str,
    values: &'a [String],
}

/// RSI/ADX 테이블을 지정한 형식의 문자열로 변환합니다.
pub fn render_rsi_adx(table: &RsiAdxTable, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        let json = RsiAdxJson {
            headers: table.headers(),
            rows: table
                .rows()
                .iter()
                .map(|(symbol, values)| RsiAdxJsonRow {
                    symbol: symbol.as_str(),
                    values,
                })
                .collect(),
        };
        return serde_json::to_string_pretty(&json).context("Failed to serialize to JSON");
    }

    let headers: Vec<String> = std::iter::once("Symbol".to_string())
        .chain(table.headers().iter().cloned())
        .collect();
    let rows: Vec<Vec<String>> = table
        .rows()
        .iter()
        .map(|(symbol, values)| {
            std::iter::once(symbol.to_string())
                .chain(values.iter().cloned())
                .collect()
        })
        .collect();

    Ok(match format {
        OutputFormat::Csv => format_csv(&headers, &rows),
        _ => format_table(&headers, &rows),
    })
}
