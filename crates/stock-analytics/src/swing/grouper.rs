//! 스윙 그루핑 (Swing Grouper).
//!
//! 시간순 극값 시퀀스를 단일 전진 패스로 스캔하면서, 반대 방향의
//! 추적 극값(박스) 대비 변동률이 임계값을 넘는 순간 직전 전환점을
//! 확정하고 새 스윙 그룹을 시작합니다.
//!
//! # 알고리즘
//!
//! `RunningBox`는 아직 확정되지 않은 최저 저점 후보(`box_min`)와
//! 최고 고점 후보(`box_max`)를 극값 시퀀스 인덱스로 추적합니다.
//! 각 극값에 대해:
//!
//! 1. 고점은 추적 중인 저점 대비, 저점은 추적 중인 고점 대비
//!    변동률을 계산합니다 (반대쪽 박스가 없으면 0).
//! 2. 변동률이 임계값을 **엄격히** 초과하면 반대쪽 박스의 극값을
//!    전환점(`peak`)으로 소급 표시하고 그룹 카운터를 증가시킵니다.
//!    현재 극값부터 새 그룹이 시작됩니다.
//! 3. 임계값 돌파 시 두 박스 모두 현재 극값으로 초기화되고,
//!    그 외에는 자신의 종류에 해당하는 박스만 갱신됩니다
//!    (비어 있으면 설정, 엄격히 더 낮은 저점/높은 고점이면 교체,
//!    동률이면 유지).
//!
//! 전진 패스 외의 역추적이 없으므로 동일 입력은 항상 동일 출력을
//! 냅니다. 소급 표시는 인덱스로 주소화되는 주석 배열을 인덱스로
//! 수정하는 방식이며, 박스 상태는 호출 스택 밖으로 노출되지 않습니다.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::indicators::{IndicatorError, IndicatorResult};
use crate::swing::extrema::{Extremum, ExtremumKind};

/// 전환점 표시.
///
/// 출력 테이블에서는 `"0"`(미표시), `"min"`(확정 저점),
/// `"max"`(확정 고점)로 렌더링됩니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeakMark {
    /// 전환점 아님
    #[default]
    #[serde(rename = "0")]
    None,
    /// 확정된 저점 전환점
    Min,
    /// 확정된 고점 전환점
    Max,
}

impl fmt::Display for PeakMark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeakMark::None => write!(f, "0"),
            PeakMark::Min => write!(f, "min"),
            PeakMark::Max => write!(f, "max"),
        }
    }
}

/// 극값 하나에 대한 스윙 주석.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwingAnnotation {
    /// 일봉 시퀀스 내 위치 (극값의 position)
    pub position: usize,
    /// 스윙 그룹 번호 (0부터, 단조 증가)
    pub group: u32,
    /// 반대쪽 추적 극값 대비 변동률 (%, 소수 둘째 자리 반올림,
    /// 고점은 양수, 저점은 음수 부호)
    pub ratio: Decimal,
    /// 전환점 표시 (소급 적용)
    pub peak: PeakMark,
}

/// 진행 중인 박스 상태.
///
/// 값은 극값 시퀀스 인덱스입니다. `None`은 아직 해당 종류의 극값을
/// 만나지 못한 부트스트랩 상태를 명시적으로 나타냅니다.
#[derive(Debug, Clone, Copy, Default)]
struct RunningBox {
    /// 최저 저점 후보의 극값 인덱스
    box_min: Option<usize>,
    /// 최고 고점 후보의 극값 인덱스
    box_max: Option<usize>,
}

const PERCENT: Decimal = Decimal::ONE_HUNDRED;

/// 극값 시퀀스를 스윙 그룹으로 주석 처리합니다.
///
/// # 인자
/// * `extrema` - 위치 비내림차순 극값 시퀀스 (추출기 출력 순서 그대로)
/// * `threshold` - 스윙 확정 임계값 (%, 0 초과)
///
/// # 반환
/// 극값과 같은 순서의 주석 목록.
///
/// # 에러
/// - `threshold <= 0`이면 `InvalidParameter`
/// - 위치가 비내림차순이 아니면 `InvalidParameter` (그루퍼는 입력을
///   정렬하지 않습니다 — 정렬은 추출기의 책임입니다)
///
/// 값이 0인 박스 극값은 변동률 분모가 될 수 없으므로, 그 박스 대비
/// 변동률은 0으로 취급되어 돌파가 일어나지 않습니다.
pub fn group_swings(
    extrema: &[Extremum],
    threshold: Decimal,
) -> IndicatorResult<Vec<SwingAnnotation>> {
    if threshold <= Decimal::ZERO {
        return Err(IndicatorError::InvalidParameter(format!(
            "임계값은 0보다 커야 합니다: {}",
            threshold
        )));
    }
    for pair in extrema.windows(2) {
        if pair[1].position < pair[0].position {
            return Err(IndicatorError::InvalidParameter(format!(
                "극값 위치가 시간순이 아닙니다: {} 다음에 {}",
                pair[0].position, pair[1].position
            )));
        }
    }

    let mut annotations: Vec<SwingAnnotation> = Vec::with_capacity(extrema.len());
    let mut running_box = RunningBox::default();
    let mut group: u32 = 0;

    for (i, extremum) in extrema.iter().enumerate() {
        let value = extremum.value;

        // 1. 반대쪽 박스 대비 변동률 (박스가 없거나 박스 값이 0이면 0)
        let reference_ratio = match extremum.kind {
            ExtremumKind::High => running_box.box_min.and_then(|idx| {
                let base = extrema[idx].value;
                (!base.is_zero()).then(|| (value - base) / base * PERCENT)
            }),
            ExtremumKind::Low => running_box.box_max.and_then(|idx| {
                let base = extrema[idx].value;
                (!base.is_zero()).then(|| (base - value) / base * PERCENT)
            }),
        }
        .unwrap_or(Decimal::ZERO);

        // 2. 임계값 판정은 엄격 초과 — 동률은 돌파가 아니다
        let crossed = reference_ratio > threshold;

        if crossed {
            // 반대쪽 박스의 극값을 전환점으로 소급 확정
            match extremum.kind {
                ExtremumKind::High => {
                    if let Some(idx) = running_box.box_min {
                        annotations[idx].peak = PeakMark::Min;
                    }
                }
                ExtremumKind::Low => {
                    if let Some(idx) = running_box.box_max {
                        annotations[idx].peak = PeakMark::Max;
                    }
                }
            }
            // 현재 극값부터 새 그룹
            group += 1;
        }

        // 기록되는 변동률은 반올림값, 저점은 음수 부호
        // (0은 부호 비트 없이 그대로 둔다)
        let rounded = reference_ratio.round_dp(2);
        let ratio = match extremum.kind {
            ExtremumKind::High => rounded,
            ExtremumKind::Low if rounded.is_zero() => Decimal::ZERO,
            ExtremumKind::Low => -rounded,
        };

        annotations.push(SwingAnnotation {
            position: extremum.position,
            group,
            ratio,
            peak: PeakMark::None,
        });

        // 3. 박스 갱신
        if crossed {
            // 돌파 지점에서 새 박스 시작
            running_box.box_min = Some(i);
            running_box.box_max = Some(i);
        } else {
            match extremum.kind {
                ExtremumKind::Low => {
                    let replace = match running_box.box_min {
                        None => true,
                        Some(idx) => value < extrema[idx].value,
                    };
                    if replace {
                        running_box.box_min = Some(i);
                    }
                }
                ExtremumKind::High => {
                    let replace = match running_box.box_max {
                        None => true,
                        Some(idx) => value > extrema[idx].value,
                    };
                    if replace {
                        running_box.box_max = Some(i);
                    }
                }
            }
        }
    }

    Ok(annotations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn low(position: usize, value: Decimal) -> Extremum {
        Extremum {
            position,
            kind: ExtremumKind::Low,
            value,
        }
    }

    fn high(position: usize, value: Decimal) -> Extremum {
        Extremum {
            position,
            kind: ExtremumKind::High,
            value,
        }
    }

    #[test]
    fn test_empty_input() {
        let annotations = group_swings(&[], dec!(15)).unwrap();
        assert!(annotations.is_empty());
    }

    #[test]
    fn test_non_positive_threshold_rejected() {
        assert!(group_swings(&[], Decimal::ZERO).is_err());
        assert!(group_swings(&[], dec!(-1)).is_err());
    }

    #[test]
    fn test_non_monotonic_positions_rejected() {
        let extrema = vec![low(5, dec!(100)), high(3, dec!(120))];
        assert!(group_swings(&extrema, dec!(15)).is_err());
    }

    #[test]
    fn test_low_then_confirming_high() {
        // 저점 100 → 고점 120, T=15: 변동률 20% > 15 → 저점이 전환점,
        // 고점은 새 그룹
        let extrema = vec![low(0, dec!(100)), high(5, dec!(120))];
        let annotations = group_swings(&extrema, dec!(15)).unwrap();

        assert_eq!(annotations[0].peak, PeakMark::Min);
        assert_eq!(annotations[0].group, 0);
        assert_eq!(annotations[0].ratio, dec!(0));

        assert_eq!(annotations[1].peak, PeakMark::None);
        assert_eq!(annotations[1].group, 1);
        assert_eq!(annotations[1].ratio, dec!(20.00));
    }

    #[test]
    fn test_exact_threshold_does_not_cross() {
        // 100 → 115는 정확히 15% — 엄격 초과가 아니므로 돌파 아님
        let extrema = vec![low(0, dec!(100)), high(5, dec!(115))];
        let annotations = group_swings(&extrema, dec!(15)).unwrap();

        assert_eq!(annotations[0].peak, PeakMark::None);
        assert_eq!(annotations[1].group, 0);
        assert_eq!(annotations[1].ratio, dec!(15.00));
    }

    #[test]
    fn test_epsilon_above_threshold_crosses() {
        let extrema = vec![low(0, dec!(100)), high(5, dec!(115.01))];
        let annotations = group_swings(&extrema, dec!(15)).unwrap();

        assert_eq!(annotations[0].peak, PeakMark::Min);
        assert_eq!(annotations[1].group, 1);
        assert_eq!(annotations[1].ratio, dec!(15.01));
    }

    #[test]
    fn test_high_then_confirming_low() {
        // 고점 200 → 저점 160: (200-160)/200 = 20% > 15 → 고점이 전환점,
        // 저점의 변동률은 음수로 기록
        let extrema = vec![high(0, dec!(200)), low(5, dec!(160))];
        let annotations = group_swings(&extrema, dec!(15)).unwrap();

        assert_eq!(annotations[0].peak, PeakMark::Max);
        assert_eq!(annotations[1].group, 1);
        assert_eq!(annotations[1].ratio, dec!(-20.00));
    }

    #[test]
    fn test_same_kind_without_opposite_box_stays_zero() {
        // 반대쪽 박스가 없으면 변동률은 0으로 남고 돌파하지 않는다
        let extrema = vec![high(0, dec!(100)), high(3, dec!(200)), high(6, dec!(300))];
        let annotations = group_swings(&extrema, dec!(15)).unwrap();

        for annotation in &annotations {
            assert_eq!(annotation.group, 0);
            assert_eq!(annotation.ratio, dec!(0));
            assert_eq!(annotation.peak, PeakMark::None);
        }
    }

    #[test]
    fn test_equal_value_keeps_existing_box() {
        // 동률 저점은 박스를 교체하지 않는다 — 이후 돌파 시 전환점은
        // 먼저 나온 저점이어야 한다
        let extrema = vec![low(0, dec!(100)), low(3, dec!(100)), high(6, dec!(120))];
        let annotations = group_swings(&extrema, dec!(15)).unwrap();

        assert_eq!(annotations[0].peak, PeakMark::Min);
        assert_eq!(annotations[1].peak, PeakMark::None);
        assert_eq!(annotations[2].group, 1);
    }

    #[test]
    fn test_lower_low_replaces_box() {
        // 더 낮은 저점이 박스를 교체 — 전환점은 나중의 더 낮은 저점
        let extrema = vec![low(0, dec!(100)), low(3, dec!(90)), high(6, dec!(120))];
        let annotations = group_swings(&extrema, dec!(15)).unwrap();

        assert_eq!(annotations[0].peak, PeakMark::None);
        assert_eq!(annotations[1].peak, PeakMark::Min);
        // (120-90)/90 = 33.33%
        assert_eq!(annotations[2].ratio, dec!(33.33));
        assert_eq!(annotations[2].group, 1);
    }

    #[test]
    fn test_breakout_resets_both_boxes() {
        // 돌파 후 박스는 돌파 극값에서 새로 시작한다.
        // 두 번째 돌파의 기준은 첫 돌파 고점(120)이어야 한다.
        let extrema = vec![
            low(0, dec!(100)),
            high(3, dec!(120)),  // 20% > 15 → 돌파, 박스 = {120, 120}
            low(6, dec!(96)),    // (120-96)/120 = 20% > 15 → 돌파
            high(9, dec!(100)),
        ];
        let annotations = group_swings(&extrema, dec!(15)).unwrap();

        assert_eq!(annotations[1].group, 1);
        assert_eq!(annotations[1].peak, PeakMark::Max);
        assert_eq!(annotations[2].group, 2);
        assert_eq!(annotations[2].ratio, dec!(-20.00));
        // 세 번째 박스는 96에서 시작: (100-96)/96 = 4.17% — 돌파 아님
        assert_eq!(annotations[3].group, 2);
        assert_eq!(annotations[3].ratio, dec!(4.17));
    }

    #[test]
    fn test_group_counter_monotonic() {
        let extrema = vec![
            low(0, dec!(100)),
            high(2, dec!(130)),
            low(4, dec!(95)),
            high(6, dec!(140)),
            low(8, dec!(100)),
        ];
        let annotations = group_swings(&extrema, dec!(15)).unwrap();

        let mut prev = 0;
        for annotation in &annotations {
            assert!(annotation.group >= prev);
            assert!(annotation.group - prev <= 1);
            prev = annotation.group;
        }
    }

    #[test]
    fn test_deterministic_repeat_run() {
        let extrema = vec![
            low(0, dec!(100)),
            high(2, dec!(118)),
            low(4, dec!(101)),
            high(6, dec!(125)),
            low(8, dec!(97)),
            high(10, dec!(133)),
        ];
        let first = group_swings(&extrema, dec!(15)).unwrap();
        let second = group_swings(&extrema, dec!(15)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_valued_box_extremum_never_divides() {
        // 값이 0인 저점이 박스에 들어가도 다음 고점에서 0으로 나누지
        // 않는다 — 변동률은 0으로 남고 돌파하지 않는다
        let extrema = vec![low(0, dec!(0)), high(5, dec!(120))];
        let annotations = group_swings(&extrema, dec!(15)).unwrap();

        assert_eq!(annotations[0].peak, PeakMark::None);
        assert_eq!(annotations[1].ratio, dec!(0));
        assert_eq!(annotations[1].group, 0);

        // 반대 방향도 동일: 값 0인 고점 대비 저점
        let extrema = vec![high(0, dec!(0)), low(5, dec!(80))];
        let annotations = group_swings(&extrema, dec!(15)).unwrap();
        assert_eq!(annotations[1].ratio, dec!(0));
        assert_eq!(annotations[1].group, 0);
    }

    #[test]
    fn test_ratio_rounding_two_decimals() {
        // (107-100)/107 * 100 = 6.5420...% → -6.54로 기록
        let extrema = vec![high(0, dec!(107)), low(3, dec!(100))];
        let annotations = group_swings(&extrema, dec!(3)).unwrap();
        assert_eq!(annotations[1].ratio, dec!(-6.54));
    }
}
