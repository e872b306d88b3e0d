//! 심볼 기준 left outer join.
//!
//! 브레이크아웃 행이 기준 관계이며, 다른 소스는 심볼로 조회해 필드를 보탭니다.
//! 같은 필드 이름이 여러 소스에 있으면 아래 우선순위가 적용됩니다.
//!
//! ```text
//! Breakouts > PE > EMA > Settlement > RSI/ADX
//! ```

use std::collections::HashMap;

use tracing::debug;

use super::records::{
    BreakoutRecord, BreakoutsPage, EmaRecord, FieldSource, PeRecord, SettlementRecord,
};
use super::report::{assemble_row, final_headers, Report};
use super::rsi_adx::{RsiAdxFields, RsiAdxTable};
use crate::types::Symbol;

/// 다섯 소스의 추출 결과 묶음.
#[derive(Debug, Clone, Default)]
pub struct SourceBundle {
    pub breakouts: BreakoutsPage,
    pub pe: Vec<PeRecord>,
    pub ema: Vec<EmaRecord>,
    pub rsi_adx: RsiAdxTable,
    pub settlement: Vec<SettlementRecord>,
}

/// 한 브레이크아웃 행과 심볼로 찾은 다른 소스 레코드의 조합.
#[derive(Debug, Clone, Copy)]
pub struct JoinedRow<'a> {
    pub breakout: &'a BreakoutRecord,
    pub pe: Option<&'a PeRecord>,
    pub ema: Option<&'a EmaRecord>,
    pub settlement: Option<&'a SettlementRecord>,
    pub rsi_adx: Option<RsiAdxFields<'a>>,
}

impl FieldSource for JoinedRow<'_> {
    fn field(&self, name: &str) -> Option<&str> {
        self.breakout
            .field(name)
            .or_else(|| self.pe.and_then(|r| r.field(name)))
            .or_else(|| self.ema.and_then(|r| r.field(name)))
            .or_else(|| self.settlement.and_then(|r| r.field(name)))
            .or_else(|| self.rsi_adx.as_ref().and_then(|r| r.field(name)))
    }
}

/// 심볼별 조회 맵. 같은 심볼이 반복되면 나중 레코드가 남습니다.
fn index_by_symbol<'a, T>(
    records: &'a [T],
    symbol_of: impl Fn(&T) -> &Symbol,
) -> HashMap<&'a Symbol, &'a T> {
    records.iter().map(|r| (symbol_of(r), r)).collect()
}

/// 소스 묶음을 조인하여 최종 리포트를 만듭니다.
///
/// 심볼이 없는 브레이크아웃 행은 버리고, 나머지는 소스 순서를 유지합니다.
pub fn join(bundle: &SourceBundle) -> Report {
    let pe = index_by_symbol(&bundle.pe, |r| &r.symbol);
    let ema = index_by_symbol(&bundle.ema, |r| &r.symbol);
    let settlement = index_by_symbol(&bundle.settlement, |r| &r.symbol);

    let headers = final_headers(bundle.rsi_adx.headers());
    let mut dropped = 0usize;

    let rows: Vec<Vec<String>> = bundle
        .breakouts
        .records
        .iter()
        .filter_map(|record| {
            let Some(symbol) = record.symbol() else {
                dropped += 1;
                return None;
            };

            let row = JoinedRow {
                breakout: record,
                pe: pe.get(&symbol).copied(),
                ema: ema.get(&symbol).copied(),
                settlement: settlement.get(&symbol).copied(),
                rsi_adx: bundle.rsi_adx.fields_for(&symbol),
            };
            Some(assemble_row(&headers, &row))
        })
        .collect();

    if dropped > 0 {
        debug!(dropped, "Breakout rows without symbol dropped");
    }

    Report {
        report_date: bundle.breakouts.report_date.clone(),
        headers,
        rows,
    }
}
