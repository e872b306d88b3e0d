//! HTML 테이블 추출 공통 도구.
//!
//! 셀 "텍스트"는 하위 텍스트 노드를 각각 trim한 뒤 빈 것을 버리고 이어 붙인
//! 값입니다. "하위 줄"은 같은 노드들을 이어 붙이지 않은 목록입니다.

use psx_core::{RowOutcome, SkipReason, SourceKind};
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::error::{DataError, Result};

/// CSS 셀렉터를 파싱합니다.
pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| DataError::Selector(format!("{css}: {e}")))
}

/// trim 후 비어 있지 않은 텍스트 노드 목록.
pub(crate) fn stripped_strings(element: ElementRef<'_>) -> Vec<String> {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// 요소의 정리된 텍스트.
pub(crate) fn cell_text(element: ElementRef<'_>) -> String {
    stripped_strings(element).concat()
}

/// 문서의 첫 번째 `<table>`.
pub(crate) fn first_table<'a>(document: &'a Html) -> Result<Option<ElementRef<'a>>> {
    Ok(document.select(&selector("table")?).next())
}

/// 테이블의 첫 `<tbody>` 아래 `<tr>` 목록. `<tbody>`가 없으면 `None`.
pub(crate) fn body_rows<'a>(table: ElementRef<'a>) -> Result<Option<Vec<ElementRef<'a>>>> {
    let Some(tbody) = table.select(&selector("tbody")?).next() else {
        return Ok(None);
    };
    Ok(Some(tbody.select(&selector("tr")?).collect()))
}

/// 행의 `<td>` 셀 목록.
pub(crate) fn row_cells<'a>(row: ElementRef<'a>) -> Result<Vec<ElementRef<'a>>> {
    Ok(row.select(&selector("td")?).collect())
}

/// 필수 요소가 없을 때의 구조 오류.
pub(crate) fn missing(kind: SourceKind, what: &str) -> DataError {
    DataError::Structure {
        kind,
        message: format!("missing {what}"),
    }
}

/// 행 검증 결과를 모으고 건너뛴 행 수를 기록합니다.
pub(crate) fn collect_valid<T>(
    kind: SourceKind,
    outcomes: impl IntoIterator<Item = RowOutcome<T>>,
) -> Vec<T> {
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for outcome in outcomes {
        match outcome {
            RowOutcome::Valid(record) => records.push(record),
            RowOutcome::Skipped(reason) => {
                skipped += 1;
                debug!(source = %kind, %reason, "Row skipped");
            }
        }
    }

    if skipped > 0 {
        debug!(source = %kind, skipped, kept = records.len(), "Skipped malformed rows");
    }
    records
}

/// 첫 번째 셀이 "심볼 + 부가 정보" 형태인 테이블을 추출합니다.
///
/// `from_row`는 첫 번째 셀의 하위 줄과 모든 셀 텍스트를 받아 행을 검증합니다.
/// 테이블이나 `<tbody>`가 없으면 구조 오류입니다.
pub(crate) fn extract_symbol_table<T>(
    kind: SourceKind,
    body: &str,
    from_row: impl Fn(&[String], &[String]) -> RowOutcome<T>,
) -> Result<Vec<T>> {
    let document = Html::parse_document(body);
    let table = first_table(&document)?.ok_or_else(|| missing(kind, "<table>"))?;
    let rows = body_rows(table)?.ok_or_else(|| missing(kind, "<tbody>"))?;

    let mut outcomes = Vec::with_capacity(rows.len());
    for row in rows {
        let cells = row_cells(row)?;
        let Some(first) = cells.first() else {
            outcomes.push(RowOutcome::Skipped(SkipReason::NoCells));
            continue;
        };
        let sub_lines = stripped_strings(*first);
        let columns: Vec<String> = cells.iter().map(|cell| cell_text(*cell)).collect();
        outcomes.push(from_row(&sub_lines, &columns));
    }

    Ok(collect_valid(kind, outcomes))
}
