//! 추세 필터 (Trend Filters).
//!
//! 종가 시계열로부터 6개의 추세 필터를 계산합니다.
//! - **FINH**: 재귀 이중 지수 변환
//! - **KAMA**: 적응형 이동평균 (Kaufman Adaptive Moving Average)
//! - **BlueLine**: 삼중 지수 스무딩
//! - **OVT**: 이중 가중 이동평균 차분
//! - **LRB**: 롤링 선형회귀 종단값
//! - **ZLMA**: 제로랙 가중 이동평균
//!
//! 모든 함수는 입력과 같은 길이의 시계열을 반환하며,
//! 윈도우 기반 필터는 선행 구간이 `None`입니다.

use serde::{Deserialize, Serialize};

use super::smoothing::{rec_ema, wma, wma_f64};
use super::{IndicatorError, IndicatorResult};

/// FINH 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FinhParams {
    /// 기간 (내부적으로 p/2, √p 기간의 재귀 스무딩에 사용)
    pub period: usize,
}

impl Default for FinhParams {
    fn default() -> Self {
        Self { period: 110 }
    }
}

/// KAMA 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct KamaParams {
    /// efficiency ratio 계산 기간
    pub period: usize,
}

impl Default for KamaParams {
    fn default() -> Self {
        Self { period: 21 }
    }
}

/// BlueLine 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BlueLineParams {
    /// 지수 스무딩 기간
    pub period: usize,
}

impl Default for BlueLineParams {
    fn default() -> Self {
        Self { period: 144 }
    }
}

/// OVT 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OvtParams {
    /// WMA 기간
    pub period: usize,
}

impl Default for OvtParams {
    fn default() -> Self {
        Self { period: 89 }
    }
}

/// LRB 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LrbParams {
    /// 회귀 윈도우 길이
    pub period: usize,
}

impl Default for LrbParams {
    fn default() -> Self {
        Self { period: 105 }
    }
}

/// ZLMA 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ZlmaParams {
    /// WMA 기간
    pub period: usize,
    /// 중간 스무딩 기간
    pub smooth: usize,
}

impl Default for ZlmaParams {
    fn default() -> Self {
        Self {
            period: 144,
            smooth: 1,
        }
    }
}

/// KAMA smoothing constant 상한/하한.
const KAMA_FAST_END: f64 = 0.666;
const KAMA_SLOW_END: f64 = 0.0645;

/// 추세 필터 계산기.
#[derive(Debug, Default)]
pub struct TrendFilters;

impl TrendFilters {
    /// 새로운 추세 필터 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    fn check_input(closes: &[f64], period: usize) -> IndicatorResult<()> {
        if period == 0 {
            return Err(IndicatorError::InvalidParameter(
                "기간은 0보다 커야 합니다".to_string(),
            ));
        }
        if closes.len() < period {
            return Err(IndicatorError::InsufficientData {
                required: period,
                provided: closes.len(),
            });
        }
        Ok(())
    }

    /// FINH 계산.
    ///
    /// `raw = 2·R(close, p/2) − R(close, p)`, `FINH = R(raw, √p)`.
    /// 재귀 스무딩 `R`은 첫 값으로 시드되므로 선행 미정의 구간이 없습니다.
    pub fn finh(&self, closes: &[f64], params: FinhParams) -> IndicatorResult<Vec<Option<f64>>> {
        Self::check_input(closes, params.period)?;

        let period = params.period as f64;
        let ema_full = rec_ema(closes, period);
        let ema_half = rec_ema(closes, period / 2.0);

        let raw: Vec<f64> = ema_half
            .iter()
            .zip(&ema_full)
            .map(|(half, full)| 2.0 * half - full)
            .collect();

        Ok(rec_ema(&raw, period.sqrt()).into_iter().map(Some).collect())
    }

    /// KAMA 계산.
    ///
    /// `ER = |close[i] − close[i−p]| / Σ|Δclose|`,
    /// `sc = (ER·(0.666 − 0.0645) + 0.0645)²`,
    /// `KAMA[i] = KAMA[i−1] + sc·(close[i] − KAMA[i−1])`.
    ///
    /// noise가 0이거나 윈도우가 불완전하면 ER은 0으로 처리됩니다.
    pub fn kama(&self, closes: &[f64], params: KamaParams) -> IndicatorResult<Vec<Option<f64>>> {
        Self::check_input(closes, params.period)?;

        let length = params.period;
        let n = closes.len();

        // smoothing constant: ER 윈도우가 불완전한 초기 구간은 ER=0
        let mut sc = vec![KAMA_SLOW_END * KAMA_SLOW_END; n];
        for i in length..n {
            let signal = (closes[i] - closes[i - length]).abs();
            let noise: f64 = (i + 1 - length..=i)
                .map(|j| (closes[j] - closes[j - 1]).abs())
                .sum();

            let er = if noise > 0.0 {
                let ratio = signal / noise;
                if ratio.is_finite() {
                    ratio
                } else {
                    0.0
                }
            } else {
                0.0
            };

            let smooth = er * (KAMA_FAST_END - KAMA_SLOW_END) + KAMA_SLOW_END;
            sc[i] = smooth * smooth;
        }

        let mut out = Vec::with_capacity(n);
        let mut prev = closes[0];
        out.push(Some(prev));
        for i in 1..n {
            prev += sc[i] * (closes[i] - prev);
            out.push(Some(prev));
        }

        Ok(out)
    }

    /// BlueLine 계산.
    ///
    /// `e1 = R(close, p)`, `e2 = R(e1, p)`, `e3 = R(e2, p)`,
    /// `BlueLine = 3·(e1 − e2) + e3`.
    pub fn blueline(
        &self,
        closes: &[f64],
        params: BlueLineParams,
    ) -> IndicatorResult<Vec<Option<f64>>> {
        Self::check_input(closes, params.period)?;

        let period = params.period as f64;
        let e1 = rec_ema(closes, period);
        let e2 = rec_ema(&e1, period);
        let e3 = rec_ema(&e2, period);

        Ok(e1
            .iter()
            .zip(&e2)
            .zip(&e3)
            .map(|((a, b), c)| Some(3.0 * (a - b) + c))
            .collect())
    }

    /// OVT 계산.
    ///
    /// `diff = 2·WMA(close, round(p/2)) − WMA(close, p)`,
    /// `OVT = WMA(diff, round(√p))`.
    ///
    /// 윈도우 반올림은 half-to-even입니다 (홀수 기간의 `.5` 경계에서
    /// 짝수 윈도우 선택: 89/2 → 44).
    pub fn ovt(&self, closes: &[f64], params: OvtParams) -> IndicatorResult<Vec<Option<f64>>> {
        Self::check_input(closes, params.period)?;

        let period = params.period;
        let half = ((period as f64) / 2.0).round_ties_even() as usize;
        let sqn = (period as f64).sqrt().round_ties_even() as usize;

        let wma_half = wma_f64(closes, half.max(1));
        let wma_full = wma_f64(closes, period);

        let diff: Vec<Option<f64>> = wma_half
            .iter()
            .zip(&wma_full)
            .map(|(h, f)| match (h, f) {
                (Some(h), Some(f)) => Some(2.0 * h - f),
                _ => None,
            })
            .collect();

        Ok(wma(&diff, sqn.max(1)))
    }

    /// LRB 계산.
    ///
    /// 각 트레일링 윈도우(길이 p)에 대해 `x = 0..p−1`로 OLS를 적합하고
    /// `x = p−1`에서의 적합값(현재 바 추정치)을 출력합니다.
    pub fn lrb(&self, closes: &[f64], params: LrbParams) -> IndicatorResult<Vec<Option<f64>>> {
        Self::check_input(closes, params.period)?;

        let period = params.period;
        let n_f = period as f64;
        let sum_x: f64 = (period * (period - 1)) as f64 / 2.0;
        let sum_x2: f64 = (0..period).map(|x| (x * x) as f64).sum();
        let denom = n_f * sum_x2 - sum_x * sum_x;

        let mut out = vec![None; closes.len()];
        if denom == 0.0 {
            // period == 1: 회귀가 퇴화하므로 값 자체를 반환
            for (i, value) in closes.iter().enumerate() {
                out[i] = Some(*value);
            }
            return Ok(out);
        }

        for i in (period - 1)..closes.len() {
            let window = &closes[i + 1 - period..=i];
            let sum_y: f64 = window.iter().sum();
            let sum_xy: f64 = window
                .iter()
                .enumerate()
                .map(|(x, y)| x as f64 * y)
                .sum();

            let slope = (n_f * sum_xy - sum_x * sum_y) / denom;
            let intercept = (sum_y - slope * sum_x) / n_f;
            out[i] = Some(slope * (n_f - 1.0) + intercept);
        }

        Ok(out)
    }

    /// ZLMA 계산.
    ///
    /// `w1 = WMA(close, p)`, `w2 = WMA(w1, smooth)`,
    /// `ZLMA = 2·w2 − WMA(w2, p)`.
    pub fn zlma(&self, closes: &[f64], params: ZlmaParams) -> IndicatorResult<Vec<Option<f64>>> {
        Self::check_input(closes, params.period)?;
        if params.smooth == 0 {
            return Err(IndicatorError::InvalidParameter(
                "smooth는 0보다 커야 합니다".to_string(),
            ));
        }

        let w1 = wma_f64(closes, params.period);
        let w2 = wma(&w1, params.smooth);
        let w3 = wma(&w2, params.period);

        Ok(w2
            .iter()
            .zip(&w3)
            .map(|(a, b)| match (a, b) {
                (Some(a), Some(b)) => Some(2.0 * a - b),
                _ => None,
            })
            .collect())
    }
}
