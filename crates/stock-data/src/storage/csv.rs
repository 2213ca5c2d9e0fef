//! CSV 파일 기반 시계열 저장소.
//!
//! 종목별 일봉을 `{data_dir}/{code}.csv`에, 종목 목록을
//! `{data_dir}/symbols.csv`에 저장합니다.
//!
//! 일봉 CSV 스키마: `date,open,high,low,close,volume`
//! 종목 CSV 스키마: `code,name,market`
//!
//! 읽기는 무결성을 엄격히 검증합니다: 날짜가 오름차순이 아니거나
//! 중복이면 `InvalidData`를 반환하며, 정렬이나 복구는 하지 않습니다.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use stock_core::{validate_series, DailyBar, MarketType, StockSymbol};
use tracing::info;

use crate::error::{DataError, Result};

/// CSV 저장소.
#[derive(Debug, Clone)]
pub struct CsvStore {
    data_dir: PathBuf,
}

impl CsvStore {
    /// 데이터 디렉토리를 지정하여 저장소를 생성합니다.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// 종목 일봉 CSV 경로.
    pub fn bars_path(&self, code: &str) -> PathBuf {
        self.data_dir.join(format!("{}.csv", code))
    }

    /// 종목 목록 CSV 경로.
    pub fn symbols_path(&self) -> PathBuf {
        self.data_dir.join("symbols.csv")
    }

    /// 일봉 시퀀스를 CSV로 저장합니다.
    pub fn write_bars(&self, code: &str, bars: &[DailyBar]) -> Result<usize> {
        let path = self.bars_path(code);
        let mut writer = create_writer(&path)?;

        writeln!(writer, "date,open,high,low,close,volume")?;
        for bar in bars {
            writeln!(
                writer,
                "{},{},{},{},{},{}",
                bar.date, bar.open, bar.high, bar.low, bar.close, bar.volume
            )?;
        }
        writer.flush()?;

        info!(code = %code, bars = bars.len(), path = %path.display(), "Bars saved");
        Ok(bars.len())
    }

    /// 일봉 CSV를 읽고 무결성을 검증합니다.
    pub fn read_bars(&self, code: &str) -> Result<Vec<DailyBar>> {
        let path = self.bars_path(code);
        let file = File::open(&path)
            .map_err(|_| DataError::NotFound(format!("no bar data for {}", code)))?;
        let reader = BufReader::new(file);

        let mut bars = Vec::new();
        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            if line_no == 0 || line.is_empty() {
                // 헤더/빈 줄
                continue;
            }
            bars.push(parse_bar_row(&line, line_no + 1)?);
        }

        // 무결성: 날짜 엄격 오름차순, 중복 금지 (정렬하지 않는다)
        validate_series(&bars)
            .map_err(|e| DataError::InvalidData(format!("{}: {}", code, e)))?;

        Ok(bars)
    }

    /// 종목 목록을 CSV로 저장합니다.
    pub fn write_symbols(&self, symbols: &[StockSymbol]) -> Result<usize> {
        let path = self.symbols_path();
        let mut writer = create_writer(&path)?;

        writeln!(writer, "code,name,market")?;
        for symbol in symbols {
            writeln!(writer, "{},{},{}", symbol.code, symbol.name, symbol.market)?;
        }
        writer.flush()?;

        info!(symbols = symbols.len(), path = %path.display(), "Symbols saved");
        Ok(symbols.len())
    }

    /// 종목 목록 CSV를 읽습니다.
    pub fn read_symbols(&self) -> Result<Vec<StockSymbol>> {
        let path = self.symbols_path();
        let file = File::open(&path)
            .map_err(|_| DataError::NotFound("no symbol list saved".to_string()))?;
        let reader = BufReader::new(file);

        let mut symbols = Vec::new();
        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            if line_no == 0 || line.is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split(',').collect();
            if fields.len() != 3 {
                return Err(DataError::ParseError(format!(
                    "symbols.csv line {}: expected 3 fields, got {}",
                    line_no + 1,
                    fields.len()
                )));
            }
            let market: MarketType = fields[2]
                .parse()
                .map_err(|e: String| DataError::ParseError(e))?;
            symbols.push(StockSymbol::new(fields[0], fields[1], market));
        }

        Ok(symbols)
    }
}

fn create_writer(path: &Path) -> Result<BufWriter<File>> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    Ok(BufWriter::new(file))
}

fn parse_bar_row(line: &str, line_no: usize) -> Result<DailyBar> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() != 6 {
        return Err(DataError::ParseError(format!(
            "line {}: expected 6 fields, got {}",
            line_no,
            fields.len()
        )));
    }

    let date = NaiveDate::parse_from_str(fields[0], "%Y-%m-%d")
        .map_err(|e| DataError::ParseError(format!("line {}: invalid date: {}", line_no, e)))?;

    let parse_decimal = |s: &str| {
        Decimal::from_str(s)
            .map_err(|e| DataError::ParseError(format!("line {}: invalid number: {}", line_no, e)))
    };

    Ok(DailyBar {
        date,
        open: parse_decimal(fields[1])?,
        high: parse_decimal(fields[2])?,
        low: parse_decimal(fields[3])?,
        close: parse_decimal(fields[4])?,
        volume: parse_decimal(fields[5])?,
    })
}
