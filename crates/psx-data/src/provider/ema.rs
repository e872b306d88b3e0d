//! 지수이동평균(EMA) 페이지 추출기.

use psx_core::{EmaRecord, SourceKind};

use super::html::extract_symbol_table;
use crate::error::Result;

/// EMA HTML에서 레코드를 추출합니다.
pub fn extract(body: &str) -> Result<Vec<EmaRecord>> {
    extract_symbol_table(SourceKind::Ema, body, EmaRecord::from_row)
}
