//! 통합 리포트와 리포트 조립기.

use serde::{Deserialize, Serialize};

use super::records::FieldSource;

/// 고정 기본 헤더 (RSI/ADX 헤더는 `RSI_SPLICE_POSITION`에 끼워 넣음).
pub const FINAL_BASE_HEADERS: [&str; 17] = [
    "Sector",
    "Symbol",
    "Company",
    "Close",
    "Daily Status",
    "Weekly Status",
    "Monthly Status",
    "Stock_PE",
    "Sector_PE",
    "Discount",
    "EMA9",
    "EMA21",
    "EMA44",
    "EMA100",
    "EMA200",
    "Total_Settlement_Volume",
    "Settlement_Ratio_By_Volume",
];

/// RSI/ADX 헤더가 삽입되는 위치 (EMA200 다음, 결제 열 앞).
pub const RSI_SPLICE_POSITION: usize = 15;

/// 최종 헤더 목록을 계산합니다.
pub fn final_headers(rsi_headers: &[String]) -> Vec<String> {
    let (before, after) = FINAL_BASE_HEADERS.split_at(RSI_SPLICE_POSITION);

    before
        .iter()
        .map(|h| h.to_string())
        .chain(rsi_headers.iter().cloned())
        .chain(after.iter().map(|h| h.to_string()))
        .collect()
}

/// 렌더링 계층에 전달되는 최종 리포트.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// 브레이크아웃 페이지의 리포트 날짜 문구
    pub report_date: String,
    /// 완전히 정렬된 헤더 목록
    pub headers: Vec<String>,
    /// 헤더 순서대로 정렬된 셀 값 (브레이크아웃 행 순서)
    pub rows: Vec<Vec<String>>,
}

impl Report {
    /// 행 개수.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// 행이 없는지 여부.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// 한 행을 헤더 순서로 투영합니다. 없는 필드는 빈 문자열.
pub fn assemble_row(headers: &[String], row: &impl FieldSource) -> Vec<String> {
    headers
        .iter()
        .map(|header| row.field(header).unwrap_or_default().to_string())
        .collect()
}
