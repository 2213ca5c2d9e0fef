//! 시계열 저장소 모듈.

pub mod csv;

pub use csv::CsvStore;
