//! 동방재부(Eastmoney) 공개 시세 API 클라이언트.
//!
//! 두 개의 엔드포인트를 사용합니다:
//! - `/api/qt/clist/get` - 시장별 종목 목록 (코드, 이름)
//! - `/api/qt/stock/kline/get` - 일봉 OHLCV (전복권 조정가)
//!
//! 일봉 행은 `"날짜,시가,종가,고가,저가,거래량"` 형식의 문자열로
//! 내려오며, 날짜 오름차순으로 정렬해 반환합니다.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;
use stock_core::{DailyBar, MarketType, StockSymbol};
use tracing::{debug, warn};

use crate::error::{DataError, Result};
use crate::provider::{DailyBarProvider, SymbolProvider};

const DEFAULT_BASE_URL: &str = "https://push2his.eastmoney.com";
const DEFAULT_LIST_BASE_URL: &str = "https://push2.eastmoney.com";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Eastmoney 시세 API 클라이언트.
#[derive(Debug, Clone)]
pub struct EastmoneyClient {
    client: Client,
    /// 일봉 API 베이스 URL
    base_url: String,
    /// 종목 목록 API 베이스 URL
    list_base_url: String,
}

/// 일봉 응답 구조.
#[derive(Debug, Deserialize)]
struct KlineResponse {
    data: Option<KlineData>,
}

#[derive(Debug, Deserialize)]
struct KlineData {
    #[serde(default)]
    klines: Vec<String>,
}

/// 종목 목록 응답 구조.
#[derive(Debug, Deserialize)]
struct ListResponse {
    data: Option<ListData>,
}

#[derive(Debug, Deserialize)]
struct ListData {
    #[serde(default)]
    diff: Vec<ListRow>,
}

#[derive(Debug, Deserialize)]
struct ListRow {
    /// 종목 코드
    #[serde(rename = "f12")]
    code: String,
    /// 종목 이름
    #[serde(rename = "f14")]
    name: String,
}

impl EastmoneyClient {
    /// 기본 엔드포인트로 클라이언트를 생성합니다.
    pub fn new(timeout_secs: u64) -> Result<Self> {
        Self::with_base_urls(DEFAULT_BASE_URL, DEFAULT_LIST_BASE_URL, timeout_secs)
    }

    /// 베이스 URL을 지정하여 생성합니다 (테스트용).
    pub fn with_base_urls(
        base_url: impl Into<String>,
        list_base_url: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            list_base_url: list_base_url.into(),
        })
    }

    /// Eastmoney secid 형식 (상하이 "1.코드", 선전 "0.코드").
    fn secid(symbol: &StockSymbol) -> String {
        let market_flag = match symbol.market {
            MarketType::Shanghai => 1,
            MarketType::Shenzhen => 0,
        };
        format!("{}.{}", market_flag, symbol.code)
    }

    /// 시장별 종목 목록 필터 파라미터.
    fn market_fs(market: MarketType) -> &'static str {
        match market {
            // 선전 A주 (메인보드 + 중소판)
            MarketType::Shenzhen => "m:0+t:6,m:0+t:13",
            // 상하이 A주
            MarketType::Shanghai => "m:1+t:2",
        }
    }
}

/// 일봉 행 문자열을 파싱합니다: "날짜,시가,종가,고가,저가,거래량".
fn parse_kline_row(row: &str) -> Result<DailyBar> {
    let fields: Vec<&str> = row.split(',').collect();
    if fields.len() < 6 {
        return Err(DataError::ParseError(format!(
            "kline row has {} fields, expected 6: {}",
            fields.len(),
            row
        )));
    }

    let date = NaiveDate::parse_from_str(fields[0], "%Y-%m-%d")
        .map_err(|e| DataError::ParseError(format!("invalid date {}: {}", fields[0], e)))?;

    let parse_decimal = |s: &str, field: &str| {
        Decimal::from_str(s)
            .map_err(|e| DataError::ParseError(format!("invalid {} {}: {}", field, s, e)))
    };

    Ok(DailyBar {
        date,
        open: parse_decimal(fields[1], "open")?,
        close: parse_decimal(fields[2], "close")?,
        high: parse_decimal(fields[3], "high")?,
        low: parse_decimal(fields[4], "low")?,
        volume: parse_decimal(fields[5], "volume")?,
    })
}

#[async_trait]
impl DailyBarProvider for EastmoneyClient {
    async fn fetch_daily_bars(&self, symbol: &StockSymbol) -> Result<Vec<DailyBar>> {
        // klt=101: 일봉, fqt=1: 전복권 조정
        let url = format!(
            "{}/api/qt/stock/kline/get?secid={}&klt=101&fqt=1&beg=19900101&end=20500101\
             &fields1=f1,f2,f3&fields2=f51,f52,f53,f54,f55,f56",
            self.base_url,
            Self::secid(symbol)
        );
        debug!(symbol = %symbol, "Fetching daily bars");

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(DataError::FetchError(format!(
                "kline API returned {} for {}",
                response.status(),
                symbol
            )));
        }

        let payload: KlineResponse = response.json().await?;
        let data = payload
            .data
            .ok_or_else(|| DataError::NotFound(format!("no kline data for {}", symbol)))?;

        let mut bars = Vec::with_capacity(data.klines.len());
        for row in &data.klines {
            bars.push(parse_kline_row(row)?);
        }

        // API는 오름차순으로 내려주지만 계약이므로 정렬을 보장한다
        bars.sort_by_key(|b| b.date);

        debug!(symbol = %symbol, bars = bars.len(), "Daily bars fetched");
        Ok(bars)
    }
}

#[async_trait]
impl SymbolProvider for EastmoneyClient {
    async fn fetch_symbols(&self, market: MarketType) -> Result<Vec<StockSymbol>> {
        let url = format!(
            "{}/api/qt/clist/get?pn=1&pz=10000&po=0&fid=f12&fs={}&fields=f12,f14",
            self.list_base_url,
            Self::market_fs(market)
        );
        debug!(market = %market, "Fetching symbol list");

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(DataError::FetchError(format!(
                "list API returned {} for {}",
                response.status(),
                market
            )));
        }

        let payload: ListResponse = response.json().await?;
        let data = payload
            .data
            .ok_or_else(|| DataError::NotFound(format!("no symbol list for {}", market)))?;

        let mut symbols = Vec::with_capacity(data.diff.len());
        for row in data.diff {
            if row.code.len() != 6 || !row.code.bytes().all(|b| b.is_ascii_digit()) {
                warn!(code = %row.code, "Skipping malformed symbol code");
                continue;
            }
            symbols.push(StockSymbol::new(row.code, row.name, market));
        }

        debug!(market = %market, symbols = symbols.len(), "Symbol list fetched");
        Ok(symbols)
    }
}
