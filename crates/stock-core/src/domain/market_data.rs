//! 시장 데이터 타입 및 구조체.
//!
//! 이 모듈은 일봉 시장 데이터 관련 타입을 정의합니다:
//! - `DailyBar` - OHLCV 일봉 데이터
//! - `validate_series` - 일봉 시퀀스의 무결성 검증

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{StockError, StockResult};

/// OHLCV 일봉 데이터.
///
/// 하루 세션당 하나의 레코드이며, 시퀀스는 날짜 오름차순이어야 합니다.
/// 휴장일로 인한 달력상 공백은 허용됩니다 (윈도우 연산은 달력 거리가
/// 아닌 순서 위치를 사용합니다).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyBar {
    /// 세션 날짜
    pub date: NaiveDate,
    /// 시가
    pub open: Decimal,
    /// 고가
    pub high: Decimal,
    /// 저가
    pub low: Decimal,
    /// 종가
    pub close: Decimal,
    /// 거래량
    pub volume: Decimal,
}

impl DailyBar {
    /// 새 일봉을 생성합니다.
    pub fn new(
        date: NaiveDate,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: Decimal,
    ) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// 양봉(종가 > 시가)인지 확인합니다.
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// 음봉(종가 < 시가)인지 확인합니다.
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }

    /// 캔들 범위(고가 - 저가)를 반환합니다.
    pub fn range(&self) -> Decimal {
        self.high - self.low
    }
}

/// 일봉 시퀀스의 무결성을 검증합니다.
///
/// 날짜가 엄격한 오름차순이 아니거나 중복 날짜가 있으면 데이터 무결성
/// 에러를 반환합니다. 정렬이나 복구는 시도하지 않습니다.
pub fn validate_series(bars: &[DailyBar]) -> StockResult<()> {
    for pair in bars.windows(2) {
        if pair[1].date <= pair[0].date {
            return Err(StockError::Data(format!(
                "일봉 시퀀스가 날짜 오름차순이 아닙니다: {} 다음에 {}",
                pair[0].date, pair[1].date
            )));
        }
    }
    Ok(())
}
