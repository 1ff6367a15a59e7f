//! 시차 feature.
//!
//! 시프트는 하나의 심볼 시계열 안에서의 순수한 인덱스 오프셋입니다.
//! 파이프라인이 심볼별로 호출하므로 심볼 경계를 넘는 일은 없습니다.

/// `lag`개 바 이전의 값을 복사합니다 (`out[i] = values[i − lag]`).
///
/// 처음 `lag`개 바는 미정의입니다.
pub fn shift_back<T: Clone>(values: &[Option<T>], lag: usize) -> Vec<Option<T>> {
    let mut out = vec![None; values.len()];
    for i in lag..values.len() {
        out[i] = values[i - lag].clone();
    }
    out
}

/// `horizon`개 바 이후의 값을 복사합니다 (`out[i] = values[i + horizon]`).
///
/// 마지막 `horizon`개 바는 미정의입니다. target 파생에 사용됩니다.
pub fn shift_forward<T: Clone>(values: &[Option<T>], horizon: usize) -> Vec<Option<T>> {
    let n = values.len();
    let mut out = vec![None; n];
    for i in 0..n.saturating_sub(horizon) {
        out[i] = values[i + horizon].clone();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_back_basic() {
        let values = vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)];
        let lagged = shift_back(&values, 2);

        assert_eq!(lagged, vec![None, None, Some(1.0), Some(2.0)]);
    }

    #[test]
    fn test_shift_back_preserves_none() {
        let values = vec![None, Some(2.0), Some(3.0)];
        let lagged = shift_back(&values, 1);

        assert_eq!(lagged, vec![None, None, Some(2.0)]);
    }

    #[test]
    fn test_shift_back_lag_exceeds_length() {
        let values = vec![Some(1.0), Some(2.0)];
        let lagged = shift_back(&values, 5);
        assert_eq!(lagged, vec![None, None]);
    }

    #[test]
    fn test_shift_forward_basic() {
        let values = vec![Some(0u8), Some(0), Some(1), Some(1), Some(1)];
        let shifted = shift_forward(&values, 3);

        assert_eq!(shifted, vec![Some(1), Some(1), None, None, None]);
    }

    #[test]
    fn test_shift_roundtrip_identity() {
        let values: Vec<Option<i64>> = (0..20).map(Some).collect();
        let lagged = shift_back(&values, 4);

        for i in 4..values.len() {
            assert_eq!(lagged[i], values[i - 4]);
        }
        assert!(lagged[..4].iter().all(|v| v.is_none()));
    }
}
