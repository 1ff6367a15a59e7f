//! 지표-가격 관계 feature.
//!
//! 각 지표에 대해 4개의 파생 시계열을 계산합니다:
//! - `slope` - 지표가 직전 바 대비 순증가했는지 (binary)
//! - `price_above` - 종가가 지표 위에 있는지 (binary)
//! - `dist_pct` - `(close − indicator) / indicator` (continuous)
//! - `slope_rate` - 지표의 직전 바 대비 변화율 (continuous)
//!
//! 지표 또는 그 직전 값이 미정의이거나 분모가 0이면 결과도 미정의입니다.
//! 미정의는 에러가 아니라 `None`으로 전파됩니다.

use super::super::indicators::{IndicatorError, IndicatorResult};

/// 하나의 지표에 대한 파생 feature 시계열.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedSeries {
    /// 지표가 직전 바 대비 순증가했는지
    pub slope: Vec<Option<bool>>,
    /// 종가가 지표 위에 있는지
    pub price_above: Vec<Option<bool>>,
    /// 종가와 지표의 상대 거리
    pub dist_pct: Vec<Option<f64>>,
    /// 지표의 변화율
    pub slope_rate: Vec<Option<f64>>,
}

/// 지표 시계열과 종가로부터 파생 feature를 계산합니다.
///
/// # 에러
///
/// 두 시계열의 길이가 다르면 [`IndicatorError::InvalidParameter`]를 반환합니다.
pub fn derive_features(
    closes: &[f64],
    indicator: &[Option<f64>],
) -> IndicatorResult<DerivedSeries> {
    if closes.len() != indicator.len() {
        return Err(IndicatorError::InvalidParameter(format!(
            "종가({})와 지표({}) 길이가 일치하지 않습니다",
            closes.len(),
            indicator.len()
        )));
    }

    let n = closes.len();
    let mut slope = vec![None; n];
    let mut price_above = vec![None; n];
    let mut dist_pct = vec![None; n];
    let mut slope_rate = vec![None; n];

    for i in 0..n {
        if let Some(value) = indicator[i] {
            price_above[i] = Some(closes[i] > value);
            if value != 0.0 {
                dist_pct[i] = Some((closes[i] - value) / value);
            }

            if i > 0 {
                if let Some(prev) = indicator[i - 1] {
                    slope[i] = Some(value > prev);
                    if prev != 0.0 {
                        slope_rate[i] = Some((value - prev) / prev);
                    }
                }
            }
        }
    }

    Ok(DerivedSeries {
        slope,
        price_above,
        dist_pct,
        slope_rate,
    })
}
