//! 데이터 소스 구분.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 리포트를 구성하는 다섯 개의 데이터 소스.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// 브레이크아웃 종목 테이블 (조인의 기준 소스)
    Breakouts,
    /// 주가수익비율(PE) 테이블
    #[serde(rename = "pe")]
    PriceEarnings,
    /// 지수이동평균(EMA) 테이블
    Ema,
    /// RSI/ADX 분석 테이블
    RsiAdx,
    /// 결제 분석 JSON 피드
    Settlement,
}

impl SourceKind {
    /// 모든 소스 (조회 순서).
    pub const ALL: [SourceKind; 5] = [
        SourceKind::Breakouts,
        SourceKind::PriceEarnings,
        SourceKind::Ema,
        SourceKind::RsiAdx,
        SourceKind::Settlement,
    ];

    /// 로그와 캐시 키에 쓰이는 이름.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Breakouts => "breakouts",
            SourceKind::PriceEarnings => "pe",
            SourceKind::Ema => "ema",
            SourceKind::RsiAdx => "rsi_adx",
            SourceKind::Settlement => "settlement",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_kind_names_are_unique() {
        let mut names: Vec<&str> = SourceKind::ALL.iter().map(|s| s.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), SourceKind::ALL.len());
        assert_eq!(SourceKind::RsiAdx.to_string(), "rsi_adx");
    }
}
