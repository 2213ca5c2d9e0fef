//! 저장된 종목 목록 출력 명령어.

use anyhow::{Context, Result};
use stock_data::CsvStore;

/// 저장된 종목 목록을 표 형태로 출력합니다.
pub fn list_symbols(data_dir: &str) -> Result<usize> {
    let store = CsvStore::new(data_dir);
    let symbols = store
        .read_symbols()
        .context("No symbol list found. Run `stock fetch-symbols` first")?;

    println!("\n저장된 종목: {}개", symbols.len());
    println!("{:-<50}", "");
    for symbol in &symbols {
        println!("  {} [{}] {}", symbol.code, symbol.market, symbol.name);
    }
    println!();

    Ok(symbols.len())
}
