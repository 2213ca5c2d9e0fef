//! 온라인 소스에서 종목 목록 수집 및 저장.
//!
//! 상하이/선전 두 시장을 각각 수집하며, 한 시장의 실패가 다른 시장의
//! 수집을 중단시키지 않습니다. 수집 결과에 메인보드 유니버스 필터를
//! 적용한 뒤 `symbols.csv`로 저장합니다.

use anyhow::{Context, Result};
use stock_core::{filter_universe, MarketType, StockSymbol};
use stock_data::{CsvStore, SymbolProvider};
use tracing::{error, info};

/// 종목 수집 설정.
#[derive(Debug)]
pub struct FetchSymbolsConfig {
    /// CSV 데이터 디렉토리
    pub data_dir: String,
}

/// 시장별 종목 수집 결과.
#[derive(Debug, Default)]
pub struct FetchResult {
    pub shanghai_count: usize,
    pub shenzhen_count: usize,
    /// 필터 적용 후 저장된 종목 수
    pub saved: usize,
}

/// 종목 목록을 수집하고 필터링하여 저장합니다.
pub async fn fetch_symbols(
    provider: &dyn SymbolProvider,
    config: FetchSymbolsConfig,
) -> Result<FetchResult> {
    println!("\n종목 목록 수집 시작...");

    let mut result = FetchResult::default();
    let mut all_symbols: Vec<StockSymbol> = Vec::new();

    for market in [MarketType::Shanghai, MarketType::Shenzhen] {
        match provider.fetch_symbols(market).await {
            Ok(symbols) => {
                info!(market = %market, count = symbols.len(), "Symbols fetched");
                match market {
                    MarketType::Shanghai => result.shanghai_count = symbols.len(),
                    MarketType::Shenzhen => result.shenzhen_count = symbols.len(),
                }
                all_symbols.extend(symbols);
            }
            Err(e) => {
                error!(market = %market, "Symbol fetch failed: {}", e);
                // 한 시장 실패는 치명적이지 않다 — 계속 진행
            }
        }
    }

    if all_symbols.is_empty() {
        anyhow::bail!("no symbols fetched from any market");
    }

    let filtered = filter_universe(all_symbols);
    result.saved = filtered.len();

    let store = CsvStore::new(&config.data_dir);
    store
        .write_symbols(&filtered)
        .context("Failed to save symbol list")?;

    println!("\n{}", "=".repeat(60));
    println!("종목 수집 완료!");
    println!("   상하이: {}개", result.shanghai_count);
    println!("   선전: {}개", result.shenzhen_count);
    println!("   필터 후 저장: {}개", result.saved);
    println!("{}\n", "=".repeat(60));

    Ok(result)
}
