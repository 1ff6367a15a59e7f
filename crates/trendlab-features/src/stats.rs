//! 파이프라인 실행 통계 구조체.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// feature 생성 실행 통계
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunStats {
    /// 총 심볼 수
    pub total: usize,
    /// 성공한 심볼 수
    pub success: usize,
    /// 에러로 제외된 심볼 수
    pub errors: usize,
    /// 히스토리 부족으로 건너뛴 심볼 수
    pub skipped: usize,
    /// 출력된 총 행 수
    pub output_rows: usize,
    /// 소요 시간
    #[serde(skip)]
    pub elapsed: Duration,
}

impl RunStats {
    /// 새 통계 객체 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 성공률 계산 (%)
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.success as f64 / self.total as f64) * 100.0
        }
    }

    /// 통계 요약 로그 출력
    pub fn log_summary(&self) {
        tracing::info!(
            total = self.total,
            success = self.success,
            errors = self.errors,
            skipped = self.skipped,
            output_rows = self.output_rows,
            success_rate = format!("{:.1}%", self.success_rate()),
            elapsed = format!("{:.1}s", self.elapsed.as_secs_f64()),
            "feature 생성 완료"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_rate() {
        let mut stats = RunStats::new();
        assert_eq!(stats.success_rate(), 0.0);

        stats.total = 4;
        stats.success = 3;
        stats.skipped = 1;
        assert!((stats.success_rate() - 75.0).abs() < 1e-12);
    }

    #[test]
    fn test_serialization_skips_elapsed() {
        let stats = RunStats {
            total: 2,
            success: 2,
            output_rows: 100,
            elapsed: Duration::from_secs(5),
            ..Default::default()
        };
        let json = serde_json::to_value(&stats).unwrap();

        assert_eq!(json["total"], 2);
        assert_eq!(json["output_rows"], 100);
        assert!(json.get("elapsed").is_none());
    }
}
