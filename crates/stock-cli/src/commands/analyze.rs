//! 저장된 일봉에 대한 스윙 포인트 분석 명령어.
//!
//! 추출기 → 그루퍼 파이프라인을 실행하고 주석이 병합된 CSV를
//! 출력합니다. 이동평균/상하한가 요약은 로그로만 보고합니다.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use stock_analytics::{
    annotate_series, limit_flags, AnnotatedBar, LimitParams, SmaParams, TrendIndicators,
};
use stock_core::AnalyzeConfig;
use stock_data::CsvStore;
use tracing::{info, warn};

/// 분석 설정.
#[derive(Debug)]
pub struct AnalyzeArgs {
    /// 종목 코드 (예: 600519)
    pub code: String,
    /// CSV 데이터 디렉토리
    pub data_dir: String,
    /// 주석 CSV 출력 경로 (없으면 `<data_dir>/<code>_analyzed.csv`)
    pub output: Option<String>,
}

/// 단일 종목을 분석하고 주석 CSV를 저장합니다.
pub async fn analyze_symbol(args: AnalyzeArgs, config: &AnalyzeConfig) -> Result<usize> {
    let store = CsvStore::new(&args.data_dir);
    let bars = store
        .read_bars(&args.code)
        .with_context(|| format!("No stored data for {}. Run `stock download` first", args.code))?;

    info!(
        code = %args.code,
        bars = bars.len(),
        window = config.window_size,
        threshold = %config.threshold,
        "Analyzing swing points"
    );

    let annotated = annotate_series(&bars, config.window_size, config.threshold)
        .context("Swing annotation failed")?;

    // 이동평균 요약 (마지막 시점 값만 보고)
    let closes: Vec<Decimal> = bars.iter().map(|b| b.close).collect();
    let trend = TrendIndicators::new();
    for &period in &config.ma_periods {
        match trend.sma(&closes, SmaParams { period }) {
            Ok(values) => {
                if let Some(Some(latest)) = values.last() {
                    info!(period, sma = %latest.round_dp(2), "Latest moving average");
                }
            }
            Err(e) => warn!(period, "SMA skipped: {}", e),
        }
    }

    // 상한가/하한가 요약
    let flags = limit_flags(&bars, LimitParams::default())
        .context("Limit flag calculation failed")?;
    let limit_up_days = flags.iter().filter(|f| f.limit_up).count();
    let limit_down_days = flags.iter().filter(|f| f.limit_down).count();
    info!(limit_up_days, limit_down_days, "Price limit summary");

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| format!("{}/{}_analyzed.csv", args.data_dir, args.code));

    let written = save_annotated_csv(&output_path, &annotated)?;

    let extrema_count = annotated.iter().filter(|r| r.swing.is_some()).count();
    let group_count = annotated
        .iter()
        .filter_map(|r| r.swing.as_ref().map(|s| s.group + 1))
        .max()
        .unwrap_or(0);

    println!("\n{}", "=".repeat(60));
    println!("스윙 분석 완료: {}", args.code);
    println!("   일봉: {}개", bars.len());
    println!("   극값: {}개 / 스윙 그룹: {}개", extrema_count, group_count);
    println!("   출력: {}", output_path);
    println!("{}\n", "=".repeat(60));

    Ok(written)
}

/// 주석 CSV 저장.
///
/// 헤더: `date,open,high,low,close,volume,emax,emin,peak,group,ratio`
/// 극값이 아닌 행은 peak/group/ratio 칸이 비어 있습니다.
fn save_annotated_csv(output_path: &str, annotated: &[AnnotatedBar]) -> Result<usize> {
    let path = Path::new(output_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", output_path))?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "date,open,high,low,close,volume,emax,emin,peak,group,ratio")?;

    for row in annotated {
        let bar = &row.bar;
        match &row.swing {
            Some(swing) => writeln!(
                writer,
                "{},{},{},{},{},{},{},{},{},{},{}",
                bar.date,
                bar.open,
                bar.high,
                bar.low,
                bar.close,
                bar.volume,
                row.emax,
                row.emin,
                swing.peak,
                swing.group,
                swing.ratio
            )?,
            None => writeln!(
                writer,
                "{},{},{},{},{},{},{},{},,,",
                bar.date, bar.open, bar.high, bar.low, bar.close, bar.volume, row.emax, row.emin
            )?,
        }
    }

    writer.flush()?;

    info!("Saved {} annotated rows to {}", annotated.len(), output_path);

    Ok(annotated.len())
}
