//! 종목 심볼 정의.
//!
//! 모든 데이터 소스를 하나로 묶는 유일한 조인 키인 `Symbol`을 정의합니다.
//! 소스마다 대소문자와 공백 처리가 제각각이므로 항상 `Symbol::normalize`를
//! 거친 값만 키로 사용합니다.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 정규화된 종목 심볼 (예: "OGDC", "LUCK").
///
/// 앞뒤 공백을 제거하고 대문자로 변환한 값만 담습니다.
/// 빈 문자열은 심볼이 될 수 없습니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// 원시 티커 문자열을 조인 키 형식으로 정규화합니다.
    ///
    /// 멱등적이며 대소문자를 구분하지 않습니다.
    pub fn normalize(raw: &str) -> String {
        raw.trim().to_uppercase()
    }

    /// 원시 문자열에서 심볼을 생성합니다. 정규화 후 비어 있으면 `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = Self::normalize(raw);
        if normalized.is_empty() {
            None
        } else {
            Some(Self(normalized))
        }
    }

    /// 정규화된 문자열을 반환합니다.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
