//! 코어 에러
//!
//! 브랜드 판정・분리・묶음배송은 실패하지 않는다 (미분류는 데이터).
//! 실패하는 것은 입력 검증뿐이다.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// 필수값 누락 등 입력 오류
    #[error("입력 오류: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, Error>;
