//! 표 형태 결과의 출력 형식 변환.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use tracing::info;

/// 테이블 형식에서 한 컬럼의 최대 표시 폭.
const MAX_COLUMN_WIDTH: usize = 30;

/// 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(anyhow::anyhow!(
                "Invalid format: {}. Use: table, csv, json",
                s
            )),
        }
    }
}

/// 결과를 파일 또는 stdout에 씁니다.
pub fn write_output(content: &str, output_path: Option<&str>) -> Result<()> {
    if let Some(path) = output_path {
        let mut file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path))?;
        file.write_all(content.as_bytes())
            .context("Failed to write to file")?;
        info!("Output written to: {}", path);
    } else {
        println!("{}", content);
    }

    Ok(())
}

/// 테이블 형식 출력. 컬럼 폭은 내용에 맞추되 최대 폭을 넘으면 자릅니다.
pub fn format_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .chain(std::iter::once(header))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
                .min(MAX_COLUMN_WIDTH)
        })
        .collect();

    let render_line = |cells: &[String]| -> String {
        let line: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(i, &width)| {
                let cell = cells.get(i).map(String::as_str).unwrap_or("");
                format!("{:<width$}", truncate(cell, width), width = width)
            })
            .collect();
        line.join(" ").trim_end().to_string()
    };

    let mut output = String::new();

    // 헤더
    output.push_str(&render_line(headers));
    output.push('\n');
    let total_width = widths.iter().sum::<usize>() + widths.len().saturating_sub(1);
    output.push_str(&"-".repeat(total_width));
    output.push('\n');

    // 데이터
    for row in rows {
        output.push_str(&render_line(row));
        output.push('\n');
    }

    // 요약
    output.push('\n');
    output.push_str(&format!("Total: {} rows", rows.len()));

    output
}

/// CSV 형식 출력.
pub fn format_csv(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut output = String::new();

    for line in std::iter::once(headers).chain(rows.iter().map(Vec::as_slice)) {
        let cells: Vec<String> = line.iter().map(|cell| escape_csv(cell)).collect();
        output.push_str(&cells.join(","));
        output.push('\n');
    }

    output
}

/// 문자열 자르기 (UTF-8 안전).
fn truncate(s: &str, max_len: usize) -> String {
    // 문자 수로 계산 (바이트가 아님)
    let char_count = s.chars().count();

    if char_count <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// CSV 이스케이프 (콤마, 따옴표, 줄바꿈 포함 시 따옴표로 감싸기).
fn escape_csv(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("TABLE").unwrap(), OutputFormat::Table);
        assert_eq!(OutputFormat::parse("csv").unwrap(), OutputFormat::Csv);
        assert_eq!(OutputFormat::parse("json").unwrap(), OutputFormat::Json);
        assert!(OutputFormat::parse("tsv").is_err());
    }

    #[test]
    fn test_format_table_aligns_columns() {
        let headers = strings(&["Symbol", "RSI"]);
        let rows = vec![strings(&["OGDC", "44"]), strings(&["LUCK", ""])];

        let table = format_table(&headers, &rows);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], "Symbol RSI");
        assert_eq!(lines[1], "-".repeat(10));
        assert_eq!(lines[2], "OGDC   44");
        assert_eq!(lines[3], "LUCK");
        assert!(table.ends_with("Total: 2 rows"));
    }

    #[test]
    fn test_format_table_truncates_wide_cells() {
        let headers = strings(&["Company"]);
        let rows = vec![vec!["x".repeat(40)]];

        let table = format_table(&headers, &rows);
        let row_line = table.lines().nth(2).unwrap();

        assert_eq!(row_line.chars().count(), MAX_COLUMN_WIDTH);
        assert!(row_line.ends_with("..."));
    }

    #[test]
    fn test_format_csv_escapes() {
        let headers = strings(&["Symbol", "Company"]);
        let rows = vec![strings(&["OGDC", "Oil, Gas \"Dev\""])];

        assert_eq!(
            format_csv(&headers, &rows),
            "Symbol,Company\nOGDC,\"Oil, Gas \"\"Dev\"\"\"\n"
        );
    }

    #[test]
    fn test_truncate_utf8() {
        assert_eq!(truncate("파키스탄 증권거래소", 6), "파키스...");
        assert_eq!(truncate("short", 10), "short");
    }

    #[test]
    fn test_write_output_to_file() {
        let path = std::env::temp_dir().join(format!("psx-cli-out-{}.txt", std::process::id()));
        let path_str = path.to_str().unwrap();

        write_output("a,b\n", Some(path_str)).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(written, "a,b\n");
    }
}
