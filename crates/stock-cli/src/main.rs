//! A주 스윙 포인트 분석 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 메인보드 종목 목록 수집
//! stock fetch-symbols
//!
//! # 귀주모태주 일봉 다운로드
//! stock download -s 600519
//!
//! # 전체 종목 일괄 갱신
//! stock update
//!
//! # 스윙 포인트 분석 (윈도우/임계값 재정의 가능)
//! stock analyze -s 600519 --window 11 --threshold 15
//!
//! # 저장된 종목 목록 보기
//! stock list
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::{error, info};

mod commands;

use commands::analyze::{analyze_symbol, AnalyzeArgs};
use commands::download::{download_symbol, DownloadArgs};
use commands::fetch_symbols::{fetch_symbols, FetchSymbolsConfig};
use commands::list::list_symbols;
use commands::update::{update_all, UpdateConfig};
use stock_core::{init_logging, AppConfig};
use stock_data::EastmoneyClient;

#[derive(Parser)]
#[command(name = "stock")]
#[command(about = "A주 메인보드 스윙 포인트 분석 도구", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 경로 (기본: STOCK_CONFIG 환경변수 또는 내장 기본값)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// 데이터 디렉토리 (설정 파일 값 재정의)
    #[arg(short, long, global = true)]
    data_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 온라인 소스에서 종목 목록 수집 및 저장
    FetchSymbols,

    /// 단일 종목 일봉 다운로드
    Download {
        /// 종목 코드 (예: 600519)
        #[arg(short, long)]
        symbol: String,
    },

    /// 저장된 전체 종목 일봉 일괄 갱신
    Update {
        /// 처리할 최대 종목 수 (0 = 무제한)
        #[arg(long, default_value = "0")]
        limit: usize,
    },

    /// 저장된 일봉에 대한 스윙 포인트 분석
    Analyze {
        /// 종목 코드 (예: 600519)
        #[arg(short, long)]
        symbol: String,

        /// 극값 탐지 윈도우 (홀수, 3 이상)
        #[arg(short, long)]
        window: Option<usize>,

        /// 스윙 확정 임계값 (%, 0 초과)
        #[arg(short, long)]
        threshold: Option<Decimal>,

        /// 주석 CSV 출력 경로
        #[arg(short, long)]
        output: Option<String>,
    },

    /// 저장된 종목 목록 보기
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("Failed to load config file: {}", path))?,
        None => AppConfig::load().context("Failed to load configuration")?,
    };

    if let Some(data_dir) = &cli.data_dir {
        config.data.data_dir = data_dir.clone();
    }

    init_logging(&config.logging).map_err(|e| anyhow::anyhow!("Logging init failed: {}", e))?;

    match cli.command {
        Commands::FetchSymbols => {
            let provider = EastmoneyClient::new(config.data.request_timeout_secs)?;
            let fetch_config = FetchSymbolsConfig {
                data_dir: config.data.data_dir.clone(),
            };

            match fetch_symbols(&provider, fetch_config).await {
                Ok(result) => {
                    info!(
                        shanghai = result.shanghai_count,
                        shenzhen = result.shenzhen_count,
                        saved = result.saved,
                        "Symbol fetch completed"
                    );
                }
                Err(e) => {
                    error!("Fetch symbols failed: {}", e);
                    return Err(e);
                }
            }
        }

        Commands::Download { symbol } => {
            let provider = EastmoneyClient::new(config.data.request_timeout_secs)?;
            let args = DownloadArgs {
                code: symbol,
                data_dir: config.data.data_dir.clone(),
            };

            match download_symbol(&provider, args).await {
                Ok(count) => {
                    info!("Downloaded {} daily bars", count);
                }
                Err(e) => {
                    error!("Download failed: {}", e);
                    return Err(e);
                }
            }
        }

        Commands::Update { limit } => {
            let provider = EastmoneyClient::new(config.data.request_timeout_secs)?;
            let update_config = UpdateConfig {
                data_dir: config.data.data_dir.clone(),
                limit,
            };

            match update_all(&provider, update_config).await {
                Ok(result) => {
                    info!(
                        updated = result.updated,
                        failed = result.failures.len(),
                        "Batch update completed"
                    );
                }
                Err(e) => {
                    error!("Update failed: {}", e);
                    return Err(e);
                }
            }
        }

        Commands::Analyze {
            symbol,
            window,
            threshold,
            output,
        } => {
            if let Some(window) = window {
                config.analyze.window_size = window;
            }
            if let Some(threshold) = threshold {
                config.analyze.threshold = threshold;
            }
            config
                .analyze
                .validate()
                .context("Invalid analysis parameters")?;

            let args = AnalyzeArgs {
                code: symbol,
                data_dir: config.data.data_dir.clone(),
                output,
            };

            match analyze_symbol(args, &config.analyze).await {
                Ok(count) => {
                    info!("Analyzed {} rows", count);
                }
                Err(e) => {
                    error!("Analyze failed: {}", e);
                    return Err(e);
                }
            }
        }

        Commands::List => {
            list_symbols(&config.data.data_dir)?;
        }
    }

    Ok(())
}
