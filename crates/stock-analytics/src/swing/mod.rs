//! 스윙 포인트 탐지.
//!
//! 두 단계 파이프라인으로 구성됩니다:
//!
//! 1. [`extrema`] - 중심 윈도우 스캔으로 국소 고점/저점 추출
//! 2. [`grouper`] - 극값 시퀀스를 임계값 기반 스윙 그룹으로 주석 처리
//!
//! 그루퍼의 정확성은 추출기의 순서 보장(시간순, 결정적 동률 처리)에
//! 전적으로 의존하므로 두 단계는 항상 이 순서로 실행됩니다.
//! 결과는 호출마다 새로 계산되며 캐시되지 않습니다.

pub mod extrema;
pub mod grouper;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stock_core::DailyBar;
use tracing::debug;

use crate::indicators::IndicatorResult;
use extrema::{find_extrema, ExtremumKind};
use grouper::{group_swings, PeakMark};

/// 일봉에 병합된 스윙 주석 값.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwingRecord {
    /// 스윙 그룹 번호
    pub group: u32,
    /// 변동률 (%, 부호는 방향)
    pub ratio: Decimal,
    /// 전환점 표시
    pub peak: PeakMark,
}

/// 스윙 주석이 병합된 일봉.
///
/// 극값이 아닌 위치는 플래그가 모두 false이고 `swing`이 `None`입니다
/// (주석 부재이지 0이 아닙니다).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedBar {
    /// 원본 일봉
    pub bar: DailyBar,
    /// 국소 고점 여부
    pub emax: bool,
    /// 국소 저점 여부
    pub emin: bool,
    /// 스윙 주석 (극값 위치에만 존재)
    pub swing: Option<SwingRecord>,
}

/// 일봉 시퀀스에 스윙 주석을 병합합니다.
///
/// 추출기와 그루퍼를 순서대로 실행한 뒤 주석을 위치 기준으로
/// 왼쪽 조인합니다. 같은 위치에 저점과 고점이 모두 있으면(완전히
/// 평평한 윈도우) 주석은 Low→High 순서로 기록되어 나중 것이 남고,
/// 두 극값 플래그는 모두 설정됩니다.
///
/// # 인자
/// * `bars` - 날짜 오름차순 일봉 시퀀스
/// * `window` - 극값 탐지 윈도우 (홀수, 3 이상)
/// * `threshold` - 스윙 확정 임계값 (%, 0 초과)
pub fn annotate_series(
    bars: &[DailyBar],
    window: usize,
    threshold: Decimal,
) -> IndicatorResult<Vec<AnnotatedBar>> {
    let extrema = find_extrema(bars, window)?;
    let annotations = group_swings(&extrema, threshold)?;

    debug!(
        bars = bars.len(),
        extrema = extrema.len(),
        groups = annotations.last().map(|a| a.group + 1).unwrap_or(0),
        "Swing annotation computed"
    );

    let mut annotated: Vec<AnnotatedBar> = bars
        .iter()
        .map(|bar| AnnotatedBar {
            bar: bar.clone(),
            emax: false,
            emin: false,
            swing: None,
        })
        .collect();

    for (extremum, annotation) in extrema.iter().zip(annotations.iter()) {
        let row = &mut annotated[extremum.position];
        match extremum.kind {
            ExtremumKind::High => row.emax = true,
            ExtremumKind::Low => row.emin = true,
        }
        row.swing = Some(SwingRecord {
            group: annotation.group,
            ratio: annotation.ratio,
            peak: annotation.peak,
        });
    }

    Ok(annotated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn bar(i: usize, high: Decimal, low: Decimal) -> DailyBar {
        let date =
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Duration::days(i as i64);
        DailyBar::new(date, low, high, low, high, dec!(1000))
    }

    #[test]
    fn test_short_series_has_no_annotations() {
        let bars: Vec<DailyBar> = (0..5).map(|i| bar(i, dec!(10), dec!(9))).collect();
        let annotated = annotate_series(&bars, 11, dec!(15)).unwrap();

        assert_eq!(annotated.len(), 5);
        assert!(annotated
            .iter()
            .all(|row| !row.emax && !row.emin && row.swing.is_none()));
    }

    #[test]
    fn test_non_extrema_rows_carry_no_annotation() {
        // 위치 3에 저점, 위치 7에 고점이 생기는 산 모양 시퀀스
        let highs = [
            dec!(12),
            dec!(11),
            dec!(10.5),
            dec!(10),
            dec!(11),
            dec!(12),
            dec!(13),
            dec!(14),
            dec!(13),
            dec!(12),
            dec!(11),
        ];
        let lows = [
            dec!(11),
            dec!(10),
            dec!(9.5),
            dec!(9),
            dec!(10),
            dec!(11),
            dec!(12),
            dec!(13),
            dec!(12),
            dec!(11),
            dec!(10),
        ];
        let bars: Vec<DailyBar> = highs
            .iter()
            .zip(lows.iter())
            .enumerate()
            .map(|(i, (&h, &l))| bar(i, h, l))
            .collect();

        let annotated = annotate_series(&bars, 7, dec!(15)).unwrap();

        assert!(annotated[3].emin);
        assert!(annotated[3].swing.is_some());
        assert!(annotated[7].emax);
        assert!(annotated[7].swing.is_some());

        for (i, row) in annotated.iter().enumerate() {
            if i != 3 && i != 7 {
                assert!(row.swing.is_none(), "row {} should carry no annotation", i);
            }
        }
    }

    #[test]
    fn test_flat_window_row_keeps_both_flags() {
        let bars: Vec<DailyBar> = (0..5).map(|i| bar(i, dec!(10), dec!(10))).collect();
        let annotated = annotate_series(&bars, 3, dec!(15)).unwrap();

        for row in &annotated[1..4] {
            assert!(row.emax && row.emin);
            assert!(row.swing.is_some());
        }
    }
}
