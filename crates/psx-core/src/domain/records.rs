//! 소스별 레코드 타입.
//!
//! 각 추출기가 만들어내는 불변 레코드와, 행 단위 검증 결과를 표현하는
//! `RowOutcome`을 정의합니다. 형식이 맞지 않는 행은 에러가 아니라
//! `RowOutcome::Skipped`로 돌려줍니다.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::types::Symbol;

/// 심볼 필드 이름 (모든 소스 공통).
pub const FIELD_SYMBOL: &str = "Symbol";

/// 이름으로 필드 값을 조회할 수 있는 레코드.
///
/// 조인 엔진은 소스 우선순위대로 이 트레잇을 조회해 셀 값을 결정합니다.
pub trait FieldSource {
    /// 필드 값 조회. 이 소스가 해당 필드를 제공하지 않으면 `None`.
    fn field(&self, name: &str) -> Option<&str>;
}

/// 행을 건너뛴 이유.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// `<td>` 셀이 하나도 없음
    NoCells,
    /// 열 개수 부족
    TooFewColumns { required: usize, found: usize },
    /// 첫 번째 셀의 하위 줄 개수 부족
    TooFewSubLines { required: usize, found: usize },
    /// 심볼을 확인할 수 없음
    MissingSymbol,
    /// 추출할 값이 없음
    NoValues,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoCells => write!(f, "no cells"),
            SkipReason::TooFewColumns { required, found } => {
                write!(f, "too few columns ({found} < {required})")
            }
            SkipReason::TooFewSubLines { required, found } => {
                write!(f, "too few sub-lines ({found} < {required})")
            }
            SkipReason::MissingSymbol => write!(f, "missing symbol"),
            SkipReason::NoValues => write!(f, "no values"),
        }
    }
}

/// 행 단위 검증 결과.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome<T> {
    /// 유효한 레코드
    Valid(T),
    /// 건너뛴 행
    Skipped(SkipReason),
}

impl<T> RowOutcome<T> {
    /// 유효한 레코드만 꺼냅니다.
    pub fn valid(self) -> Option<T> {
        match self {
            RowOutcome::Valid(record) => Some(record),
            RowOutcome::Skipped(_) => None,
        }
    }
}

// ==================== Breakouts ====================

/// 브레이크아웃 테이블의 한 행.
///
/// 필드 이름은 소스 자신의 헤더 행에서 동적으로 결정됩니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakoutRecord {
    fields: HashMap<String, String>,
}

impl BreakoutRecord {
    /// 헤더와 셀 텍스트를 위치 기준으로 짝지어 레코드를 만듭니다.
    ///
    /// 짧은 쪽 길이에서 멈추며, 같은 헤더 이름이 반복되면 뒤의 값이 남습니다.
    pub fn from_row(headers: &[String], cells: Vec<String>) -> RowOutcome<Self> {
        if cells.is_empty() {
            return RowOutcome::Skipped(SkipReason::NoCells);
        }

        let fields = headers.iter().cloned().zip(cells).collect();
        RowOutcome::Valid(Self { fields })
    }

    /// 필드 목록으로 레코드를 직접 만듭니다.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// 이 행의 정규화된 심볼. `Symbol` 필드가 없거나 비어 있으면 `None`.
    pub fn symbol(&self) -> Option<Symbol> {
        self.fields.get(FIELD_SYMBOL).and_then(|raw| Symbol::parse(raw))
    }

    /// 필드 개수.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// 필드가 없는지 여부.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FieldSource for BreakoutRecord {
    fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// 브레이크아웃 페이지 전체 (리포트 날짜 + 행 목록).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakoutsPage {
    /// "Report Date" 문단 텍스트 (없으면 빈 문자열)
    pub report_date: String,
    /// 소스 순서를 유지한 행 목록
    pub records: Vec<BreakoutRecord>,
}

// ==================== Price-to-Earnings ====================

/// PE 테이블의 한 행.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeRecord {
    pub symbol: Symbol,
    pub pe_company: String,
    pub stock_pe: String,
    pub sector_pe: String,
    pub discount: String,
}

impl PeRecord {
    /// 최소 열 개수
    pub const MIN_COLUMNS: usize = 5;
    /// 첫 번째 셀의 최소 하위 줄 개수 (심볼, 회사명)
    pub const MIN_SUB_LINES: usize = 2;

    /// 첫 번째 셀의 하위 줄과 각 열 텍스트로 레코드를 검증/생성합니다.
    pub fn from_row(sub_lines: &[String], columns: &[String]) -> RowOutcome<Self> {
        if columns.len() < Self::MIN_COLUMNS {
            return RowOutcome::Skipped(SkipReason::TooFewColumns {
                required: Self::MIN_COLUMNS,
                found: columns.len(),
            });
        }
        if sub_lines.len() < Self::MIN_SUB_LINES {
            return RowOutcome::Skipped(SkipReason::TooFewSubLines {
                required: Self::MIN_SUB_LINES,
                found: sub_lines.len(),
            });
        }
        let Some(symbol) = Symbol::parse(&sub_lines[0]) else {
            return RowOutcome::Skipped(SkipReason::MissingSymbol);
        };

        RowOutcome::Valid(Self {
            symbol,
            pe_company: sub_lines[1].clone(),
            stock_pe: columns[2].clone(),
            sector_pe: columns[3].clone(),
            discount: columns[4].clone(),
        })
    }
}

impl FieldSource for PeRecord {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            FIELD_SYMBOL => Some(self.symbol.as_str()),
            "PE_Company" => Some(&self.pe_company),
            "Stock_PE" => Some(&self.stock_pe),
            "Sector_PE" => Some(&self.sector_pe),
            "Discount" => Some(&self.discount),
            _ => None,
        }
    }
}

// ==================== EMA ====================

/// EMA 테이블의 한 행.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmaRecord {
    pub symbol: Symbol,
    pub current_price: String,
    pub ema9: String,
    pub ema21: String,
    pub ema44: String,
    pub ema100: String,
    pub ema200: String,
}

impl EmaRecord {
    /// 최소 열 개수
    pub const MIN_COLUMNS: usize = 8;

    /// 첫 번째 셀의 하위 줄과 각 열 텍스트로 레코드를 검증/생성합니다.
    ///
    /// 1번 열(등락률)은 사용하지 않습니다.
    pub fn from_row(sub_lines: &[String], columns: &[String]) -> RowOutcome<Self> {
        if columns.len() < Self::MIN_COLUMNS {
            return RowOutcome::Skipped(SkipReason::TooFewColumns {
                required: Self::MIN_COLUMNS,
                found: columns.len(),
            });
        }
        let Some(first_line) = sub_lines.first() else {
            return RowOutcome::Skipped(SkipReason::TooFewSubLines {
                required: 1,
                found: 0,
            });
        };
        let Some(symbol) = Symbol::parse(first_line) else {
            return RowOutcome::Skipped(SkipReason::MissingSymbol);
        };

        RowOutcome::Valid(Self {
            symbol,
            current_price: columns[2].clone(),
            ema9: columns[3].clone(),
            ema21: columns[4].clone(),
            ema44: columns[5].clone(),
            ema100: columns[6].clone(),
            ema200: columns[7].clone(),
        })
    }
}

impl FieldSource for EmaRecord {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            FIELD_SYMBOL => Some(self.symbol.as_str()),
            "Current_Price" => Some(&self.current_price),
            "EMA9" => Some(&self.ema9),
            "EMA21" => Some(&self.ema21),
            "EMA44" => Some(&self.ema44),
            "EMA100" => Some(&self.ema100),
            "EMA200" => Some(&self.ema200),
            _ => None,
        }
    }
}

// ==================== Settlement ====================

/// 결제 분석 피드의 한 항목.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementRecord {
    pub symbol: Symbol,
    pub settlement_ratio_by_volume: String,
    pub total_settlement_volume: String,
}

impl FieldSource for SettlementRecord {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            FIELD_SYMBOL => Some(self.symbol.as_str()),
            "Settlement_Ratio_By_Volume" => Some(&self.settlement_ratio_by_volume),
            "Total_Settlement_Volume" => Some(&self.total_settlement_volume),
            _ => None,
        }
    }
}
