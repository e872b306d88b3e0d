//! 주가수익비율(PE) 페이지 추출기.

use psx_core::{PeRecord, SourceKind};

use super::html::extract_symbol_table;
use crate::error::Result;

/// PE HTML에서 레코드를 추출합니다.
///
/// 첫 번째 셀은 "심볼 / 회사명" 두 줄로 구성됩니다.
pub fn extract(body: &str) -> Result<Vec<PeRecord>> {
    extract_symbol_table(SourceKind::PriceEarnings, body, PeRecord::from_row)
}
