//! 저장된 전체 종목의 일봉 데이터 일괄 갱신.
//!
//! 종목별로 독립적으로 처리하며, 한 종목의 실패는 기록만 하고
//! 나머지 종목 처리를 계속합니다.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use stock_data::{CsvStore, DailyBarProvider};
use tracing::{info, warn};

/// 일괄 갱신 설정.
#[derive(Debug)]
pub struct UpdateConfig {
    /// CSV 데이터 디렉토리
    pub data_dir: String,
    /// 처리할 최대 종목 수 (0 = 무제한)
    pub limit: usize,
}

/// 일괄 갱신 결과.
#[derive(Debug, Default)]
pub struct UpdateResult {
    pub updated: usize,
    /// (종목 코드, 에러 메시지)
    pub failures: Vec<(String, String)>,
}

/// 저장된 종목 목록의 일봉을 모두 내려받아 저장합니다.
pub async fn update_all(
    provider: &dyn DailyBarProvider,
    config: UpdateConfig,
) -> Result<UpdateResult> {
    let store = CsvStore::new(&config.data_dir);
    let mut symbols = store
        .read_symbols()
        .context("No symbol list found. Run `stock fetch-symbols` first")?;

    if config.limit > 0 && symbols.len() > config.limit {
        symbols.truncate(config.limit);
    }

    info!(symbols = symbols.len(), "Starting daily bar update");

    let pb = ProgressBar::new(symbols.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.green} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut result = UpdateResult::default();

    for symbol in &symbols {
        pb.set_message(symbol.code.clone());

        // 종목별 실패는 수집만 하고 계속 진행한다
        match provider.fetch_daily_bars(symbol).await {
            Ok(bars) => match store.write_bars(&symbol.code, &bars) {
                Ok(_) => result.updated += 1,
                Err(e) => {
                    warn!(code = %symbol.code, "Save failed: {}", e);
                    result.failures.push((symbol.code.clone(), e.to_string()));
                }
            },
            Err(e) => {
                warn!(code = %symbol.code, "Fetch failed: {}", e);
                result.failures.push((symbol.code.clone(), e.to_string()));
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    println!("\n{}", "=".repeat(60));
    println!("일봉 갱신 완료!");
    println!("   성공: {}개", result.updated);
    println!("   실패: {}개", result.failures.len());
    for (code, error) in &result.failures {
        println!("   - {}: {}", code, error);
    }
    println!("{}\n", "=".repeat(60));

    Ok(result)
}
