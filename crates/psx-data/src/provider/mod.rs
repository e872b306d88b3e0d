//! 소스별 추출기.
//!
//! 모든 추출기는 응답 본문을 받아 동기적으로 레코드를 만듭니다.
//! 파싱된 문서는 함수 안에서만 사용되므로 await 지점을 넘지 않습니다.

pub mod breakouts;
pub mod ema;
pub(crate) mod html;
pub mod pe;
pub mod rsi_adx;
pub mod settlement;
