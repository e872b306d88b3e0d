//! 도메인 모델과 조인 엔진.

pub mod join;
pub mod records;
pub mod report;
pub mod rsi_adx;

pub use join::*;
pub use records::*;
pub use report::*;
pub use rsi_adx::*;
