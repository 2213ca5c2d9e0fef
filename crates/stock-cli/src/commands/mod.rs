//! CLI 명령어 구현 모듈.

pub mod analyze;
pub mod download;
pub mod fetch_symbols;
pub mod list;
pub mod update;
