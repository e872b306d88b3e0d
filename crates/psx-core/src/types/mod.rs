//! 파이프라인 전반에서 사용되는 공통 타입.

mod source;
mod symbol;

pub use source::*;
pub use symbol::*;
