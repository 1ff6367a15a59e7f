//! 상대 거래량 정규화.

use super::super::indicators::{IndicatorError, IndicatorResult};

/// 거래량을 트레일링 이동평균 대비 비율로 정규화합니다.
///
/// 그날 거래량이 평균의 2배면 2.0, 절반이면 0.5가 됩니다.
/// 윈도우가 불완전하거나 평균이 0이면 `None`입니다 (거래가 희소한
/// 종목에서는 출력에 결측이 남을 수 있으며, 이는 허용됩니다).
pub fn relative_volume(volumes: &[f64], window: usize) -> IndicatorResult<Vec<Option<f64>>> {
    if window == 0 {
        return Err(IndicatorError::InvalidParameter(
            "윈도우는 0보다 커야 합니다".to_string(),
        ));
    }

    let mut out = vec![None; volumes.len()];
    if volumes.len() < window {
        return Ok(out);
    }

    for i in (window - 1)..volumes.len() {
        let mean: f64 = volumes[i + 1 - window..=i].iter().sum::<f64>() / window as f64;
        if mean > 0.0 {
            out[i] = Some(volumes[i] / mean);
        }
    }

    Ok(out)
}
