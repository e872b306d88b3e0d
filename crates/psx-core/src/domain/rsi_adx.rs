//! RSI/ADX 테이블과 헤더 재정렬.
//!
//! RSI/ADX 소스의 열 순서는 사이트가 정하지만, 리포트에서는 ADX 계열 지표를
//! 항상 마지막에 묶어서 보여줍니다. 재정렬은 순수하게 표시 순서만 바꾸며
//! 값 자체는 변경하지 않습니다.
//!
//! ```text
//! [Symbol, RSI14, ADX14, RSI9, ADXR, Sector]
//!   → 제외 후   [RSI14, ADX14, RSI9, ADXR]
//!   → 분할 후   [RSI14, RSI9, ADX14, ADXR]
//! ```

use std::collections::HashMap;

use super::records::FieldSource;
use crate::types::Symbol;

/// 리포트에 포함하지 않는 RSI/ADX 헤더 (다른 소스가 이미 제공).
pub const EXCLUDED_HEADERS: [&str; 4] = ["Symbol", "Sector", "Current Price", "% Change"];

/// 뒤쪽 그룹으로 보낼 헤더 접두사.
pub const ADX_PREFIX: &str = "ADX";

/// 재정렬된 헤더와 각 헤더가 가리키는 원본 열 위치.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderLayout {
    headers: Vec<String>,
    /// 최종 헤더별 원본 열 인덱스
    columns: Vec<usize>,
    /// 제외되지 않은 헤더의 원본 열 인덱스 (원본 순서)
    surviving_columns: Vec<usize>,
}

impl HeaderLayout {
    /// 원본 헤더 행에서 표시 순서를 계산합니다.
    ///
    /// 1. 제외 목록에 있는 헤더를 버리고 원래 열 인덱스를 기억합니다.
    /// 2. `ADX`로 시작하지 않는 그룹과 시작하는 그룹으로 안정 분할합니다.
    /// 3. 같은 텍스트의 헤더가 여러 개면 첫 번째 헤더의 열 값을 사용합니다.
    pub fn from_raw_headers<S: AsRef<str>>(raw: &[S]) -> Self {
        let survivors: Vec<(usize, String)> = raw
            .iter()
            .enumerate()
            .map(|(index, header)| (index, header.as_ref().trim().to_string()))
            .filter(|(_, header)| !EXCLUDED_HEADERS.contains(&header.as_str()))
            .collect();

        let (non_adx, adx): (Vec<_>, Vec<_>) = survivors
            .iter()
            .partition(|(_, header)| !header.starts_with(ADX_PREFIX));

        let mut headers = Vec::with_capacity(survivors.len());
        let mut columns = Vec::with_capacity(survivors.len());
        for (_, header) in non_adx.into_iter().chain(adx) {
            let first_column = survivors
                .iter()
                .find(|(_, candidate)| candidate == header)
                .map(|(index, _)| *index)
                .unwrap_or_default();
            headers.push(header.clone());
            columns.push(first_column);
        }

        Self {
            headers,
            columns,
            surviving_columns: survivors.iter().map(|(index, _)| *index).collect(),
        }
    }

    /// 재정렬된 헤더 목록.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// 헤더를 소비하여 반환합니다.
    pub fn into_headers(self) -> Vec<String> {
        self.headers
    }

    /// 한 행의 셀 값을 최종 헤더 순서로 재배열합니다.
    ///
    /// 행이 짧아 없는 열은 빈 문자열이 됩니다. 남은 헤더에 해당하는 열이 하나도
    /// 없으면 `None`.
    pub fn project_row(&self, cells: &[String]) -> Option<Vec<String>> {
        if !self.surviving_columns.iter().any(|&column| column < cells.len()) {
            return None;
        }

        Some(
            self.columns
                .iter()
                .map(|&column| cells.get(column).cloned().unwrap_or_default())
                .collect(),
        )
    }
}

/// 추출된 RSI/ADX 테이블.
///
/// 모든 값 목록은 `headers`와 위치가 일치합니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RsiAdxTable {
    headers: Vec<String>,
    rows: Vec<(Symbol, Vec<String>)>,
    index: HashMap<Symbol, usize>,
}

impl RsiAdxTable {
    /// 빈 테이블 (소스에 테이블이 없을 때).
    pub fn empty() -> Self {
        Self::default()
    }

    /// 재정렬된 헤더와 심볼별 값으로 테이블을 만듭니다.
    ///
    /// 같은 심볼이 다시 나오면 처음 위치는 유지하고 값만 나중 것으로 교체합니다.
    pub fn new(
        headers: Vec<String>,
        entries: impl IntoIterator<Item = (Symbol, Vec<String>)>,
    ) -> Self {
        let mut rows: Vec<(Symbol, Vec<String>)> = Vec::new();
        let mut index: HashMap<Symbol, usize> = HashMap::new();

        for (symbol, values) in entries {
            match index.get(&symbol) {
                Some(&position) => rows[position].1 = values,
                None => {
                    index.insert(symbol.clone(), rows.len());
                    rows.push((symbol, values));
                }
            }
        }

        Self {
            headers,
            rows,
            index,
        }
    }

    /// 최종 헤더 순서.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// 심볼 첫 등장 순서의 행 목록.
    pub fn rows(&self) -> &[(Symbol, Vec<String>)] {
        &self.rows
    }

    /// 심볼의 값 목록 조회.
    pub fn values(&self, symbol: &Symbol) -> Option<&[String]> {
        self.index
            .get(symbol)
            .map(|&position| self.rows[position].1.as_slice())
    }

    /// 심볼의 필드 조회 뷰.
    pub fn fields_for(&self, symbol: &Symbol) -> Option<RsiAdxFields<'_>> {
        self.values(symbol).map(|values| RsiAdxFields {
            headers: &self.headers,
            values,
        })
    }

    /// 행이 없는지 여부.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// 한 심볼의 RSI/ADX 값에 대한 필드 뷰.
#[derive(Debug, Clone, Copy)]
pub struct RsiAdxFields<'a> {
    headers: &'a [String],
    values: &'a [String],
}

impl FieldSource for RsiAdxFields<'_> {
    fn field(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .position(|header| header == name)
            .and_then(|position| self.values.get(position))
            .map(String::as_str)
    }
}
