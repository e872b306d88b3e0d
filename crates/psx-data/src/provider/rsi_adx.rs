//! RSI/ADX 분석 페이지 추출기.
//!
//! 다른 HTML 소스와 달리 테이블이 없어도 실패하지 않고 빈 테이블을 돌려줍니다.

use psx_core::{HeaderLayout, RowOutcome, RsiAdxTable, SkipReason, SourceKind, Symbol};
use scraper::Html;
use tracing::debug;

use super::html::{body_rows, cell_text, collect_valid, first_table, row_cells, selector};
use crate::error::Result;

const KIND: SourceKind = SourceKind::RsiAdx;

/// RSI/ADX HTML에서 재정렬된 헤더와 심볼별 값을 추출합니다.
///
/// 헤더는 `<thead>`의 `<th>`를 사용하고, `<thead>`가 없으면 테이블 전체의
/// `<th>`를 사용합니다.
pub fn extract(body: &str) -> Result<RsiAdxTable> {
    let document = Html::parse_document(body);
    let Some(table) = first_table(&document)? else {
        debug!(source = %KIND, "No table found, using empty RSI/ADX table");
        return Ok(RsiAdxTable::empty());
    };

    let th = selector("th")?;
    let raw_headers: Vec<String> = match table.select(&selector("thead")?).next() {
        Some(thead) => thead.select(&th).map(cell_text).collect(),
        None => table.select(&th).map(cell_text).collect(),
    };
    let layout = HeaderLayout::from_raw_headers(&raw_headers);

    // tbody가 없으면 데이터 행도 없는 것으로 봄 (html5ever는 보통 tbody를 자동 삽입)
    let rows = body_rows(table)?.unwrap_or_default();
    let mut outcomes = Vec::with_capacity(rows.len());
    for row in rows {
        let cells: Vec<String> = row_cells(row)?.into_iter().map(cell_text).collect();
        outcomes.push(project(&layout, &cells));
    }

    let entries = collect_valid(KIND, outcomes);
    Ok(RsiAdxTable::new(layout.into_headers(), entries))
}

fn project(layout: &HeaderLayout, cells: &[String]) -> RowOutcome<(Symbol, Vec<String>)> {
    let Some(first) = cells.first() else {
        return RowOutcome::Skipped(SkipReason::NoCells);
    };
    let Some(symbol) = Symbol::parse(first) else {
        return RowOutcome::Skipped(SkipReason::MissingSymbol);
    };
    match layout.project_row(cells) {
        Some(values) => RowOutcome::Valid((symbol, values)),
        None => RowOutcome::Skipped(SkipReason::NoValues),
    }
}
