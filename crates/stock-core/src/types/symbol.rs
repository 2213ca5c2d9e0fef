//! 심볼 및 시장 유형 정의.
//!
//! 이 모듈은 A주 종목 관련 타입을 정의합니다:
//! - `MarketType` - 시장 유형 (상하이/선전)
//! - `StockSymbol` - 종목 코드, 이름, 시장
//!
//! 종목 유니버스 필터는 메인보드 개별 종목만 남깁니다:
//! 코드 접두사 필터 (선전 000/001/002/003, 상하이 600/601/603/605),
//! ST/*ST 종목 제외, 펀드/채권/지수 등 비개별종목 이름 키워드 제외.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 시장 유형 분류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketType {
    /// 상하이 증권거래소
    Shanghai,
    /// 선전 증권거래소
    Shenzhen,
}

impl fmt::Display for MarketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarketType::Shanghai => write!(f, "sh"),
            MarketType::Shenzhen => write!(f, "sz"),
        }
    }
}

impl std::str::FromStr for MarketType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sh" | "shanghai" => Ok(Self::Shanghai),
            "sz" | "shenzhen" => Ok(Self::Shenzhen),
            _ => Err(format!("Unknown market: {}", s)),
        }
    }
}

/// 메인보드 종목 코드 접두사.
///
/// 선전: 000/001 (메인보드), 002/003 (중소판).
/// 상하이: 600/601/603/605 (메인보드).
const MAIN_BOARD_PREFIXES: [&str; 8] = ["000", "001", "002", "003", "600", "601", "603", "605"];

/// 개별 종목이 아닌 상품을 걸러내는 이름 키워드.
const EXCLUDED_NAME_KEYWORDS: [&str; 8] =
    ["指数", "基金", "ETF", "B股", "权证", "债", "转债", "存托"];

/// 거래 가능한 종목을 나타내는 심볼.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StockSymbol {
    /// 6자리 종목 코드 (예: "600519")
    pub code: String,
    /// 종목 이름
    pub name: String,
    /// 시장 유형
    pub market: MarketType,
}

impl StockSymbol {
    /// 새 심볼을 생성합니다.
    pub fn new(code: impl Into<String>, name: impl Into<String>, market: MarketType) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            market,
        }
    }

    /// 코드에서 시장을 추론합니다. 메인보드 외 코드는 `None`입니다.
    pub fn market_for_code(code: &str) -> Option<MarketType> {
        if code.len() != 6 || !code.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        match &code[..3] {
            "000" | "001" | "002" | "003" => Some(MarketType::Shenzhen),
            "600" | "601" | "603" | "605" => Some(MarketType::Shanghai),
            _ => None,
        }
    }

    /// 메인보드 종목 코드인지 확인합니다.
    pub fn is_main_board(&self) -> bool {
        self.code.len() == 6
            && self.code.bytes().all(|b| b.is_ascii_digit())
            && MAIN_BOARD_PREFIXES
                .iter()
                .any(|prefix| self.code.starts_with(prefix))
    }

    /// ST/*ST 위험 종목인지 확인합니다.
    pub fn is_st(&self) -> bool {
        let name = self.name.trim_start_matches('*');
        name.starts_with("ST")
    }

    /// 이름 키워드 기준으로 제외 대상(펀드/채권/지수 등)인지 확인합니다.
    pub fn is_excluded_name(&self) -> bool {
        EXCLUDED_NAME_KEYWORDS
            .iter()
            .any(|kw| self.name.contains(kw))
    }

    /// 분석 유니버스에 포함되는 일반 개별 종목인지 확인합니다.
    pub fn is_tradable_stock(&self) -> bool {
        self.is_main_board() && !self.is_st() && !self.is_excluded_name()
    }
}

impl fmt::Display for StockSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.code, self.market)
    }
}

/// 종목 목록에 메인보드 유니버스 필터를 적용합니다.
pub fn filter_universe(symbols: Vec<StockSymbol>) -> Vec<StockSymbol> {
    symbols
        .into_iter()
        .filter(StockSymbol::is_tradable_stock)
        .collect()
}
