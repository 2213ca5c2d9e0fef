//! 스윙 분석 및 기술적 지표 엔진.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 스윙 포인트 탐지 (극값 추출 + 스윙 그루핑)
//! - 이동평균 지표
//! - 상한가/하한가 판별
//!
//! 핵심 알고리즘은 모두 순수 동기 함수이며 공유 상태가 없습니다.
//! 여러 종목을 병렬로 처리하려면 종목별로 독립 호출하면 됩니다.

pub mod indicators;
pub mod swing;

// Indicators 모듈 re-exports
pub use indicators::limits::{limit_flags, LimitFlag, LimitParams};
pub use indicators::trend::{SmaParams, TrendIndicators};
pub use indicators::{IndicatorError, IndicatorResult};

// Swing 모듈 re-exports
pub use swing::extrema::{find_extrema, Extremum, ExtremumKind};
pub use swing::grouper::{group_swings, PeakMark, SwingAnnotation};
pub use swing::{annotate_series, AnnotatedBar, SwingRecord};
