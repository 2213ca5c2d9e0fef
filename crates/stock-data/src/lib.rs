//! # Stock Data
//!
//! 시장 데이터 수집 및 저장을 담당합니다.
//!
//! - [`provider`] - 외부 시세 소스에서 종목 목록과 일봉 데이터를
//!   가져오는 Provider 트레이트 및 구현
//! - [`storage`] - CSV 파일 기반 시계열 저장소

pub mod error;
pub mod provider;
pub mod storage;

pub use error::{DataError, Result};
pub use provider::{DailyBarProvider, EastmoneyClient, SymbolProvider};
pub use storage::CsvStore;
