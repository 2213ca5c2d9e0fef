//! 단일 종목 일봉 데이터 다운로드 명령어.

use anyhow::{Context, Result};
use stock_core::StockSymbol;
use stock_data::{CsvStore, DailyBarProvider};
use tracing::info;

/// 다운로드 설정.
#[derive(Debug)]
pub struct DownloadArgs {
    /// 종목 코드 (예: 600519)
    pub code: String,
    /// CSV 데이터 디렉토리
    pub data_dir: String,
}

/// 한 종목의 일봉을 내려받아 CSV로 저장합니다.
///
/// 저장된 종목 목록에 코드가 있으면 그 이름/시장을 사용하고,
/// 없으면 코드 접두사로 시장을 추론합니다.
pub async fn download_symbol(
    provider: &dyn DailyBarProvider,
    args: DownloadArgs,
) -> Result<usize> {
    let store = CsvStore::new(&args.data_dir);
    let symbol = resolve_symbol(&store, &args.code)?;

    info!(code = %symbol.code, market = %symbol.market, "Downloading daily bars");

    let bars = provider
        .fetch_daily_bars(&symbol)
        .await
        .with_context(|| format!("Failed to fetch daily bars for {}", symbol.code))?;

    if bars.is_empty() {
        anyhow::bail!("Provider returned no data for {}", symbol.code);
    }

    let written = store
        .write_bars(&symbol.code, &bars)
        .with_context(|| format!("Failed to save daily bars for {}", symbol.code))?;

    println!("\n{}", "=".repeat(60));
    println!("다운로드 완료: {} ({})", symbol.code, symbol.name);
    println!("   일봉: {}개", written);
    println!("   저장: {}", store.bars_path(&symbol.code).display());
    println!("{}\n", "=".repeat(60));

    Ok(written)
}

/// 코드에서 종목 심볼을 해석합니다.
fn resolve_symbol(store: &CsvStore, code: &str) -> Result<StockSymbol> {
    if let Ok(symbols) = store.read_symbols() {
        if let Some(symbol) = symbols.into_iter().find(|s| s.code == code) {
            return Ok(symbol);
        }
    }

    let market = StockSymbol::market_for_code(code)
        .with_context(|| format!("Cannot infer market for code {}. Expected a 6-digit main-board code", code))?;

    Ok(StockSymbol::new(code, code, market))
}
