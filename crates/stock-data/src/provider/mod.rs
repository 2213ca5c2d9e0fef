//! 데이터 Provider 모듈.
//!
//! 외부 소스에서 데이터를 가져오는 Provider들을 정의합니다.
//!
//! ## 동방재부 (Eastmoney) 시세 API
//! - `EastmoneyClient`: 공개 시세 HTTP API 클라이언트
//! - 상하이/선전 종목 목록, 전복권(前复权) 일봉 OHLCV 데이터

pub mod eastmoney;

use async_trait::async_trait;
use stock_core::{DailyBar, MarketType, StockSymbol};

use crate::error::Result;

pub use eastmoney::EastmoneyClient;

/// 일봉 데이터 Provider.
///
/// 구현체는 하루 세션당 한 행, 날짜 오름차순, 중복 날짜 없는
/// 시퀀스를 반환해야 합니다.
#[async_trait]
pub trait DailyBarProvider: Send + Sync {
    /// 종목의 전체 일봉 시퀀스를 가져옵니다.
    async fn fetch_daily_bars(&self, symbol: &StockSymbol) -> Result<Vec<DailyBar>>;
}

/// 종목 목록 Provider.
#[async_trait]
pub trait SymbolProvider: Send + Sync {
    /// 한 시장의 전체 종목 목록을 가져옵니다 (필터 미적용).
    async fn fetch_symbols(&self, market: MarketType) -> Result<Vec<StockSymbol>>;
}
