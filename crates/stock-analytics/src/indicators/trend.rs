//! 추세 지표 (Trend Indicators).
//!
//! 이동평균 기반의 추세 지표를 제공합니다.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{IndicatorError, IndicatorResult};

/// SMA 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SmaParams {
    /// 이동평균 기간.
    pub period: usize,
}

impl Default for SmaParams {
    fn default() -> Self {
        Self { period: 20 }
    }
}

/// 추세 지표 계산기.
#[derive(Debug, Default)]
pub struct TrendIndicators;

impl TrendIndicators {
    /// 새로운 추세 지표 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// 단순 이동평균 (SMA) 계산.
    ///
    /// SMA = (P1 + P2 + ... + Pn) / n
    ///
    /// # 인자
    /// * `prices` - 가격 데이터 (종가)
    /// * `params` - SMA 파라미터
    ///
    /// # 반환
    /// 각 시점의 SMA 값 (처음 period-1개는 None)
    pub fn sma(
        &self,
        prices: &[Decimal],
        params: SmaParams,
    ) -> IndicatorResult<Vec<Option<Decimal>>> {
        let period = params.period;

        if period == 0 {
            return Err(IndicatorError::InvalidParameter(
                "기간은 0보다 커야 합니다".to_string(),
            ));
        }

        if prices.len() < period {
            return Err(IndicatorError::InsufficientData {
                required: period,
                provided: prices.len(),
            });
        }

        let mut result = Vec::with_capacity(prices.len());
        let period_decimal = Decimal::from(period);

        for i in 0..prices.len() {
            if i < period - 1 {
                result.push(None);
            } else {
                let sum: Decimal = prices[i + 1 - period..=i].iter().sum();
                result.push(Some(sum / period_decimal));
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_sma_basic() {
        let calculator = TrendIndicators::new();
        let prices = vec![dec!(1), dec!(2), dec!(3), dec!(4), dec!(5)];
        let sma = calculator
            .sma(&prices, SmaParams { period: 3 })
            .unwrap();

        assert_eq!(sma.len(), 5);
        assert_eq!(sma[0], None);
        assert_eq!(sma[1], None);
        assert_eq!(sma[2], Some(dec!(2)));
        assert_eq!(sma[3], Some(dec!(3)));
        assert_eq!(sma[4], Some(dec!(4)));
    }

    #[test]
    fn test_sma_insufficient_data() {
        let calculator = TrendIndicators::new();
        let prices = vec![dec!(1), dec!(2)];
        let result = calculator.sma(&prices, SmaParams { period: 5 });
        assert!(matches!(
            result,
            Err(IndicatorError::InsufficientData {
                required: 5,
                provided: 2
            })
        ));
    }

    #[test]
    fn test_sma_zero_period_rejected() {
        let calculator = TrendIndicators::new();
        let prices = vec![dec!(1)];
        assert!(calculator.sma(&prices, SmaParams { period: 0 }).is_err());
    }
}
