//! 결제 분석 JSON 피드 추출기.

use psx_core::{RowOutcome, SettlementRecord, SkipReason, SourceKind, Symbol};
use serde_json::Value;

use super::html::collect_valid;
use crate::error::{DataError, Result};

const KIND: SourceKind = SourceKind::Settlement;

fn parse_error(message: impl Into<String>) -> DataError {
    DataError::Parse {
        kind: KIND,
        message: message.into(),
    }
}

/// JSON 값을 셀 텍스트로 변환합니다.
///
/// 문자열은 그대로, 숫자와 불리언은 JSON 표기 그대로, `null`과 누락은 빈 문자열.
fn value_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn record(entry: &Value) -> RowOutcome<SettlementRecord> {
    let Some(object) = entry.as_object() else {
        return RowOutcome::Skipped(SkipReason::NoCells);
    };
    let Some(symbol) = Symbol::parse(&value_text(object.get("company_code"))) else {
        return RowOutcome::Skipped(SkipReason::MissingSymbol);
    };

    RowOutcome::Valid(SettlementRecord {
        symbol,
        settlement_ratio_by_volume: value_text(object.get("avg_volume_percentage")),
        total_settlement_volume: value_text(object.get("total_settlement_volume")),
    })
}

/// 결제 분석 JSON에서 레코드를 추출합니다.
///
/// `data` 키가 없으면 빈 목록입니다. JSON이 아니거나 `data`가 배열이 아니면
/// 파싱 오류입니다.
pub fn extract(body: &str) -> Result<Vec<SettlementRecord>> {
    let payload: Value = serde_json::from_str(body).map_err(|e| parse_error(e.to_string()))?;
    let object = payload
        .as_object()
        .ok_or_else(|| parse_error("payload is not a JSON object"))?;

    let entries = match object.get("data") {
        None => return Ok(Vec::new()),
        Some(Value::Array(entries)) => entries,
        Some(_) => return Err(parse_error("`data` is not an array")),
    };

    Ok(collect_valid(KIND, entries.iter().map(record)))
}
