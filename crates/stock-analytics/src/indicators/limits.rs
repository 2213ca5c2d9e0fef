//! 상한가/하한가 판별.
//!
//! 메인보드 A주는 전일 종가 대비 ±10% 가격 제한이 적용됩니다.
//! 제한 가격은 전일 종가 × (1 ± 비율)을 소수 둘째 자리로 반올림한
//! 값이며, 당일 종가가 그 값에 도달하면 상한가/하한가로 판별합니다.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use stock_core::DailyBar;

use super::{IndicatorError, IndicatorResult};

/// 가격 제한 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LimitParams {
    /// 일일 등락 제한 비율 (메인보드 기본 10%)
    pub limit_pct: Decimal,
}

impl Default for LimitParams {
    fn default() -> Self {
        Self {
            limit_pct: dec!(10),
        }
    }
}

/// 일봉별 가격 제한 도달 여부.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitFlag {
    /// 상한가 도달
    pub limit_up: bool,
    /// 하한가 도달
    pub limit_down: bool,
}

/// 일봉 시퀀스의 상한가/하한가 플래그를 계산합니다.
///
/// 첫 일봉은 전일 종가가 없으므로 항상 플래그 없음입니다.
pub fn limit_flags(bars: &[DailyBar], params: LimitParams) -> IndicatorResult<Vec<LimitFlag>> {
    if params.limit_pct <= Decimal::ZERO {
        return Err(IndicatorError::InvalidParameter(
            "제한 비율은 0보다 커야 합니다".to_string(),
        ));
    }

    let ratio = params.limit_pct / dec!(100);
    let mut flags = Vec::with_capacity(bars.len());

    for (i, bar) in bars.iter().enumerate() {
        if i == 0 {
            flags.push(LimitFlag {
                limit_up: false,
                limit_down: false,
            });
            continue;
        }

        let prev_close = bars[i - 1].close;
        let up_price = (prev_close * (Decimal::ONE + ratio)).round_dp(2);
        let down_price = (prev_close * (Decimal::ONE - ratio)).round_dp(2);

        flags.push(LimitFlag {
            limit_up: bar.close >= up_price,
            limit_down: bar.close <= down_price,
        });
    }

    Ok(flags)
}
