//! HHLL 피벗 기반 추세 감지기.
//!
//! 피벗 고점/저점을 확정하고 최근 확정 레벨(resistance/support)과
//! 종가를 비교하여 추세(1=상승, 0=하락)를 결정합니다.
//!
//! 피벗 확정에는 오른쪽 `right_bars`개의 미래 바가 필요하므로 이 감지기는
//! 완전한 과거 구간에 대한 배치 계산에서만 유효합니다. 피벗이 발생한 바에서
//! 실시간으로 확정하는 용도로 사용하면 안 됩니다. 확정된 레벨은 피벗 바가
//! 아니라 확정 바(`피벗 인덱스 + right_bars`)부터 적용됩니다.

use serde::{Deserialize, Serialize};

use super::{IndicatorError, IndicatorResult};

/// HHLL 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HhllParams {
    /// 피벗 왼쪽 비교 바 수
    pub left_bars: usize,
    /// 피벗 오른쪽 비교 바 수 (확정 lookahead)
    pub right_bars: usize,
}

impl Default for HhllParams {
    fn default() -> Self {
        Self {
            left_bars: 3,
            right_bars: 3,
        }
    }
}

/// HHLL 계산 결과.
#[derive(Debug, Clone, PartialEq)]
pub struct HhllResult {
    /// 바별 추세 (1=상승, 0=하락)
    pub trend: Vec<u8>,
    /// 최근 확정 피벗 고점 (확정 바부터 forward-fill)
    pub resistance: Vec<Option<f64>>,
    /// 최근 확정 피벗 저점 (확정 바부터 forward-fill)
    pub support: Vec<Option<f64>>,
}

/// 피벗 감지기.
#[derive(Debug, Default)]
pub struct PivotDetector;

impl PivotDetector {
    /// 새로운 피벗 감지기 생성.
    pub fn new() -> Self {
        Self
    }

    /// HHLL 추세 감지.
    ///
    /// 바 `i`는 고가가 `[i−L, i−1]`의 모든 고가를 초과하고
    /// `[i+1, i+R]`의 어떤 고가에게도 초과당하지 않으면 피벗 고점입니다
    /// (동률은 초과로 치지 않음). 저가에 대해 대칭으로 피벗 저점을 정의합니다.
    ///
    /// 추세: `close > resistance`면 1, `close < support`면 0,
    /// 그 외에는 직전 바의 추세를 유지 (첫 바는 0).
    pub fn detect(
        &self,
        highs: &[f64],
        lows: &[f64],
        closes: &[f64],
        params: HhllParams,
    ) -> IndicatorResult<HhllResult> {
        if params.left_bars == 0 || params.right_bars == 0 {
            return Err(IndicatorError::InvalidParameter(
                "left_bars/right_bars는 0보다 커야 합니다".to_string(),
            ));
        }
        if highs.len() != lows.len() || highs.len() != closes.len() {
            return Err(IndicatorError::InvalidParameter(
                "high/low/close 길이가 일치하지 않습니다".to_string(),
            ));
        }
        if closes.is_empty() {
            return Err(IndicatorError::InsufficientData {
                required: 1,
                provided: 0,
            });
        }

        let n = closes.len();
        let left = params.left_bars;
        let right = params.right_bars;

        // 확정 바 위치에 피벗 레벨 기록 후 forward-fill
        let mut resistance: Vec<Option<f64>> = vec![None; n];
        let mut support: Vec<Option<f64>> = vec![None; n];

        if n > left + right {
            for i in left..(n - right) {
                if Self::is_pivot_high(highs, i, left, right) {
                    resistance[i + right] = Some(highs[i]);
                }
                if Self::is_pivot_low(lows, i, left, right) {
                    support[i + right] = Some(lows[i]);
                }
            }
        }

        forward_fill(&mut resistance);
        forward_fill(&mut support);

        let mut trend = vec![0u8; n];
        for i in 0..n {
            trend[i] = match (resistance[i], support[i]) {
                (Some(res), _) if closes[i] > res => 1,
                (_, Some(sup)) if closes[i] < sup => 0,
                _ if i > 0 => trend[i - 1],
                _ => 0,
            };
        }

        Ok(HhllResult {
            trend,
            resistance,
            support,
        })
    }

    fn is_pivot_high(highs: &[f64], i: usize, left: usize, right: usize) -> bool {
        let candidate = highs[i];
        highs[i - left..i].iter().all(|h| *h < candidate)
            && highs[i + 1..=i + right].iter().all(|h| *h <= candidate)
    }

    fn is_pivot_low(lows: &[f64], i: usize, left: usize, right: usize) -> bool {
        let candidate = lows[i];
        lows[i - left..i].iter().all(|l| *l > candidate)
            && lows[i + 1..=i + right].iter().all(|l| *l >= candidate)
    }
}

fn forward_fill(values: &mut [Option<f64>]) {
    let mut last = None;
    for value in values.iter_mut() {
        match value {
            Some(v) => last = Some(*v),
            None => *value = last,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(highs: &[f64], lows: &[f64], closes: &[f64]) -> HhllResult {
        PivotDetector::new()
            .detect(highs, lows, closes, HhllParams::default())
            .unwrap()
    }

    #[test]
    fn test_single_spike_resistance_from_confirmation_bar() {
        let n = 20;
        let closes = vec![100.0; n];
        let lows = vec![90.0; n];
        let mut highs = vec![100.0; n];
        highs[8] = 110.0; // 바 8에 단일 스파이크

        let result = detect(&highs, &lows, &closes);

        // 확정 바(8+3=11) 이전에는 미정의
        assert!(result.resistance[..11].iter().all(|v| v.is_none()));
        // 확정 바부터 스파이크 고가로 forward-fill
        assert!(result.resistance[11..]
            .iter()
            .all(|v| *v == Some(110.0)));
        // 평평한 저가는 피벗 저점을 만들지 않음
        assert!(result.support.iter().all(|v| v.is_none()));
    }

    #[test]
    fn test_trend_breakout_above_resistance() {
        let n = 20;
        let mut closes = vec![100.0; n];
        let mut highs = vec![101.0; n];
        let lows = vec![90.0; n];
        highs[8] = 110.0;
        for i in 15..n {
            closes[i] = 115.0;
            highs[i] = 116.0;
        }

        let result = detect(&highs, &lows, &closes);

        assert_eq!(result.trend[14], 0);
        // 바 15부터 close(115) > resistance(110)
        assert_eq!(result.trend[15], 1);
        // 이후 하락 트리거가 없으므로 유지
        assert!(result.trend[15..].iter().all(|t| *t == 1));
    }

    #[test]
    fn test_trend_breakdown_below_support() {
        let n = 20;
        let mut closes = vec![100.0; n];
        let highs = vec![110.0; n];
        let mut lows = vec![99.0; n];
        lows[8] = 95.0; // 피벗 저점
        for i in 15..n {
            closes[i] = 90.0;
            lows[i] = 89.0;
        }

        let result = detect(&highs, &lows, &closes);

        assert!(result.support[11..15].iter().all(|v| *v == Some(95.0)));
        assert_eq!(result.trend[14], 0);
        assert!(result.trend[15..].iter().all(|t| *t == 0));
    }

    #[test]
    fn test_tie_on_left_disqualifies_pivot() {
        let n = 20;
        let closes = vec![100.0; n];
        let lows = vec![90.0; n];
        let mut highs = vec![100.0; n];
        highs[7] = 110.0;
        highs[8] = 110.0; // 왼쪽에 동률 → 바 8은 피벗 아님

        let result = detect(&highs, &lows, &closes);

        // 바 7은 오른쪽 동률(≤)을 허용하므로 피벗으로 확정
        assert_eq!(result.resistance[10], Some(110.0));
        assert!(result.resistance[..10].iter().all(|v| v.is_none()));
    }

    #[test]
    fn test_flat_series_trend_stays_zero() {
        let n = 15;
        let result = detect(&vec![100.0; n], &vec![90.0; n], &vec![95.0; n]);
        assert!(result.trend.iter().all(|t| *t == 0));
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let result = PivotDetector::new().detect(
            &[1.0, 2.0],
            &[1.0],
            &[1.0, 2.0],
            HhllParams::default(),
        );
        assert!(matches!(
            result.unwrap_err(),
            IndicatorError::InvalidParameter(_)
        ));
    }
}
