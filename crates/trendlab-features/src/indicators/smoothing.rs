//! 스무딩 연산자.
//!
//! 필터 구현들이 공유하는 저수준 연산자입니다.
//! 재귀 연산자(EMA류)는 값마다 직전 값에 의존하므로 누산기를 사용한
//! 순방향 루프로 구현하여 시계열 길이에 선형 비용을 유지합니다.

/// 첫 값으로 시드하는 재귀 지수 스무딩.
///
/// `out[0] = x[0]`, `out[i] = α·x[i] + (1−α)·out[i−1]`, `α = 2/(period+1)`.
///
/// FINH가 `p/2`, `√p` 같은 비정수 기간을 사용하므로 기간은 f64입니다.
/// 윈도우 지표와 달리 선행 미정의 구간이 없습니다 (첫 바부터 수치적으로
/// 정의되지만 초기 값의 신뢰도는 낮습니다).
pub fn rec_ema(values: &[f64], period: f64) -> Vec<f64> {
    let alpha = 2.0 / (period + 1.0);
    let mut out = Vec::with_capacity(values.len());

    let mut prev = match values.first() {
        Some(first) => *first,
        None => return out,
    };
    out.push(prev);

    for value in &values[1..] {
        prev = alpha * value + (1.0 - alpha) * prev;
        out.push(prev);
    }

    out
}

/// 선형 가중 이동평균 (WMA).
///
/// 가중치는 1..=period이며 가장 최근 값이 가장 큰 가중치를 받습니다.
/// 윈도우가 불완전하거나 미정의 값을 포함하면 `None`입니다.
pub fn wma(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }

    let denom = (period * (period + 1)) as f64 / 2.0;

    'window: for i in (period - 1)..values.len() {
        let mut acc = 0.0;
        for (offset, value) in values[i + 1 - period..=i].iter().enumerate() {
            match value {
                Some(v) => acc += (offset + 1) as f64 * v,
                None => continue 'window,
            }
        }
        out[i] = Some(acc / denom);
    }

    out
}

/// 정의된 값만으로 이루어진 시계열에 대한 WMA 편의 함수.
pub fn wma_f64(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let wrapped: Vec<Option<f64>> = values.iter().copied().map(Some).collect();
    wma(&wrapped, period)
}
