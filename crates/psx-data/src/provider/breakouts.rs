//! 브레이크아웃 페이지 추출기.
//!
//! 조인의 기준 소스입니다. 필드 이름은 첫 번째 테이블의 `<thead>`에서 읽습니다.

use psx_core::{BreakoutRecord, BreakoutsPage, SourceKind};
use scraper::Html;

use super::html::{body_rows, cell_text, collect_valid, first_table, missing, row_cells, selector};
use crate::error::Result;

const KIND: SourceKind = SourceKind::Breakouts;

/// 리포트 날짜 문단을 찾는 표식.
pub const REPORT_DATE_MARKER: &str = "Report Date";

/// 브레이크아웃 HTML에서 리포트 날짜와 행 목록을 추출합니다.
pub fn extract(body: &str) -> Result<BreakoutsPage> {
    let document = Html::parse_document(body);

    let report_date = document
        .select(&selector("p")?)
        .find(|p| p.text().collect::<String>().contains(REPORT_DATE_MARKER))
        .map(cell_text)
        .unwrap_or_default();

    let table = first_table(&document)?.ok_or_else(|| missing(KIND, "<table>"))?;
    let thead = table
        .select(&selector("thead")?)
        .next()
        .ok_or_else(|| missing(KIND, "<thead>"))?;
    let headers: Vec<String> = thead.select(&selector("th")?).map(cell_text).collect();

    let rows = body_rows(table)?.ok_or_else(|| missing(KIND, "<tbody>"))?;
    let mut outcomes = Vec::with_capacity(rows.len());
    for row in rows {
        let cells: Vec<String> = row_cells(row)?.into_iter().map(cell_text).collect();
        outcomes.push(BreakoutRecord::from_row(&headers, cells));
    }

    Ok(BreakoutsPage {
        report_date,
        records: collect_valid(KIND, outcomes),
    })
}
