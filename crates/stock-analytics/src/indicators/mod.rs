//! 기술적 지표 모듈.
//!
//! 스윙 분석을 보조하는 지표들을 제공합니다:
//! - **SMA**: 단순 이동평균 (Simple Moving Average)
//! - **상한가/하한가 판별**: 메인보드 ±10% 가격 제한 도달 여부

pub mod limits;
pub mod trend;

use thiserror::Error;

pub use limits::{limit_flags, LimitFlag, LimitParams};
pub use trend::{SmaParams, TrendIndicators};

/// 지표 계산 오류.
#[derive(Debug, Error)]
pub enum IndicatorError {
    /// 데이터 부족 오류
    #[error("데이터가 부족합니다: 필요 {required}개, 제공 {provided}개")]
    InsufficientData { required: usize, provided: usize },

    /// 잘못된 파라미터
    #[error("잘못된 파라미터: {0}")]
    InvalidParameter(String),

    /// 계산 오류
    #[error("계산 오류: {0}")]
    CalculationError(String),
}

/// 지표 계산 결과 타입.
pub type IndicatorResult<T> = Result<T, IndicatorError>;
