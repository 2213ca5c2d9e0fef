//! 극값 추출 (Extremum Extractor).
//!
//! 일봉 시퀀스를 중심 대칭 윈도우로 스캔하여 각 위치가 국소 고점인지
//! 국소 저점인지 판별합니다.
//!
//! # 판별 규칙
//!
//! 윈도우 크기 `W`(홀수, 3 이상)에 대해 위치 `i`는:
//! - `high[i] >= max(high[i-W/2 ..= i+W/2])`이면 고점
//! - `low[i] <= min(low[i-W/2 ..= i+W/2])`이면 저점
//!
//! 비엄격 비교이므로 평평한 구간(plateau)의 모든 위치가 각각
//! 극값으로 인정됩니다. 시퀀스 가장자리의 불완전한 윈도우 위치는
//! 극값 후보에서 제외됩니다 (에러 아님).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stock_core::DailyBar;

use crate::indicators::{IndicatorError, IndicatorResult};

/// 극값 종류.
///
/// 정렬 시 같은 위치에서는 `Low`가 `High`보다 먼저 옵니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtremumKind {
    /// 국소 저점
    Low,
    /// 국소 고점
    High,
}

/// 추출된 극값.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extremum {
    /// 일봉 시퀀스 내 위치 (0부터)
    pub position: usize,
    /// 극값 종류
    pub kind: ExtremumKind,
    /// 극값 가격 (고점이면 high, 저점이면 low)
    pub value: Decimal,
}

/// 일봉 시퀀스에서 극값을 추출합니다.
///
/// # 인자
/// * `bars` - 날짜 오름차순 일봉 시퀀스
/// * `window` - 중심 대칭 윈도우 크기 (홀수, 3 이상)
///
/// # 반환
/// 위치 오름차순 극값 목록. 같은 위치에서는 `Low`가 먼저이며,
/// `(position, kind)` 중복은 첫 항목만 남습니다.
/// 윈도우보다 짧은 시퀀스는 빈 목록을 반환합니다.
///
/// # 에러
/// `window`가 짝수이거나 3 미만이면 `InvalidParameter`.
pub fn find_extrema(bars: &[DailyBar], window: usize) -> IndicatorResult<Vec<Extremum>> {
    if window < 3 || window % 2 == 0 {
        return Err(IndicatorError::InvalidParameter(format!(
            "윈도우 크기는 3 이상의 홀수여야 합니다: {}",
            window
        )));
    }

    let half = window / 2;
    let mut extrema = Vec::new();

    if bars.len() < window {
        return Ok(extrema);
    }

    for i in half..bars.len() - half {
        let window_bars = &bars[i - half..=i + half];

        let window_low = window_bars
            .iter()
            .map(|b| b.low)
            .min()
            .unwrap_or(bars[i].low);
        if bars[i].low <= window_low {
            extrema.push(Extremum {
                position: i,
                kind: ExtremumKind::Low,
                value: bars[i].low,
            });
        }

        let window_high = window_bars
            .iter()
            .map(|b| b.high)
            .max()
            .unwrap_or(bars[i].high);
        if bars[i].high >= window_high {
            extrema.push(Extremum {
                position: i,
                kind: ExtremumKind::High,
                value: bars[i].high,
            });
        }
    }

    // 위치 우선, 같은 위치에서는 Low 우선으로 정렬 후 (position, kind) 중복 제거
    extrema.sort_by_key(|e| (e.position, e.kind));
    extrema.dedup_by_key(|e| (e.position, e.kind));

    Ok(extrema)
}
