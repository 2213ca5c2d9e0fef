//! 설정 관리.
//!
//! 이 모듈은 애플리케이션 설정을 정의하고 관리합니다.
//! 설정은 TOML 파일에서 로드되며, 파일이 없으면 기본값을 사용합니다.
//! 알고리즘 파라미터는 로드 직후 `validate()`로 검증됩니다 (fail-fast).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{StockError, StockResult};

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// 로깅 설정
    pub logging: LoggingConfig,
    /// 데이터 관리 설정
    pub data: DataConfig,
    /// 스윙 분석 설정
    pub analyze: AnalyzeConfig,
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨 (예: "info", "debug")
    pub level: String,
    /// 출력 형식 ("pretty", "json", "compact")
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// 데이터 관리 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DataConfig {
    /// CSV 데이터 디렉토리
    pub data_dir: String,
    /// HTTP 요청 타임아웃 (초)
    pub request_timeout_secs: u64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// 스윙 분석 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalyzeConfig {
    /// 극값 탐지 윈도우 크기 (홀수, 3 이상)
    pub window_size: usize,
    /// 스윙 확정 임계값 (%, 0 초과)
    pub threshold: Decimal,
    /// 이동평균 기간 목록
    pub ma_periods: Vec<usize>,
}

impl Default for AnalyzeConfig {
    fn default() -> Self {
        Self {
            window_size: 11,
            threshold: dec!(15),
            ma_periods: vec![5, 10, 20, 60],
        }
    }
}

impl AnalyzeConfig {
    /// 분석 파라미터를 검증합니다.
    ///
    /// - `window_size`는 홀수이며 3 이상이어야 합니다.
    /// - `threshold`는 0보다 커야 합니다.
    pub fn validate(&self) -> StockResult<()> {
        if self.window_size < 3 || self.window_size % 2 == 0 {
            return Err(StockError::Config(format!(
                "window_size는 3 이상의 홀수여야 합니다: {}",
                self.window_size
            )));
        }
        if self.threshold <= Decimal::ZERO {
            return Err(StockError::Config(format!(
                "threshold는 0보다 커야 합니다: {}",
                self.threshold
            )));
        }
        if self.ma_periods.iter().any(|&p| p == 0) {
            return Err(StockError::Config(
                "ma_periods에 0이 포함될 수 없습니다".to_string(),
            ));
        }
        Ok(())
    }
}

impl AppConfig {
    /// TOML 파일에서 설정을 로드합니다.
    pub fn from_file(path: impl AsRef<Path>) -> StockResult<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            StockError::Config(format!(
                "설정 파일을 읽을 수 없습니다 {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        let config: AppConfig = toml::from_str(&content)
            .map_err(|e| StockError::Config(format!("설정 파일 파싱 실패: {}", e)))?;
        config.analyze.validate()?;
        Ok(config)
    }

    /// 설정을 로드합니다.
    ///
    /// `STOCK_CONFIG` 환경 변수의 경로를 우선 사용하고,
    /// 파일이 없으면 기본값으로 동작합니다.
    pub fn load() -> StockResult<Self> {
        let path = std::env::var("STOCK_CONFIG").unwrap_or_else(|_| "stock.toml".to_string());
        if Path::new(&path).exists() {
            Self::from_file(&path)
        } else {
            let config = Self::default();
            config.analyze.validate()?;
            Ok(config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AnalyzeConfig::default();
        assert_eq!(config.window_size, 11);
        assert_eq!(config.threshold, dec!(15));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_even_window_rejected() {
        let config = AnalyzeConfig {
            window_size: 10,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_too_small_window_rejected() {
        let config = AnalyzeConfig {
            window_size: 1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_positive_threshold_rejected() {
        let zero = AnalyzeConfig {
            threshold: Decimal::ZERO,
            ..Default::default()
        };
        assert!(zero.validate().is_err());

        let negative = AnalyzeConfig {
            threshold: dec!(-5),
            ..Default::default()
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r#"
            [analyze]
            window_size = 7
            threshold = "20.5"
        "#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.analyze.window_size, 7);
        assert_eq!(config.analyze.threshold, dec!(20.5));
        // 생략된 섹션은 기본값
        assert_eq!(config.data.data_dir, "data");
    }
}
