//! 엔진 설정 관리.
//!
//! 이 모듈은 feature 엔진의 설정을 정의하고 관리합니다.
//! 설정은 불변 구조체로 각 계산에 전달되며, 전역 상태를 사용하지 않습니다.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{EngineError, EngineResult};

/// feature 엔진 설정.
///
/// 기본값은 원본 데이터셋에 맞춰 조정된 파라미터입니다.
/// `warmup_bars`는 가장 긴 지표 기간 + 가장 큰 lag보다 커야 하며,
/// 이는 [`EngineConfig::validate`]에서 검증됩니다.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    /// warm-up 구간 바 수 (이 구간의 출력 행은 제거됨)
    pub warmup_bars: usize,
    /// warm-up 외에 추가로 요구되는 최소 바 수 (심볼 스킵 기준)
    pub min_extra_bars: usize,
    /// lag feature 오프셋 목록 (일 단위)
    pub lag_days: Vec<usize>,

    /// FINH 기간
    pub finh_period: usize,
    /// KAMA 기간
    pub kama_period: usize,
    /// BlueLine 기간
    pub blueline_period: usize,
    /// HHLL 피벗 왼쪽 바 수
    pub hhll_left_bars: usize,
    /// HHLL 피벗 오른쪽 바 수 (확정 lookahead)
    pub hhll_right_bars: usize,
    /// OVT 기간
    pub ovt_period: usize,
    /// LRB 기간
    pub lrb_period: usize,
    /// ZLMA 기간
    pub zlma_period: usize,
    /// ZLMA 스무딩 기간
    pub zlma_smooth: usize,
    /// 상대 거래량 이동평균 윈도우
    pub vol_rel_period: usize,

    /// 추론 모드: target 계산과 마지막 3행 제거를 생략
    pub is_inference: bool,
    /// 트리밍 후 심볼별로 유지할 최근 행 수 (일일 예측 내보내기용)
    pub keep_last_rows: Option<usize>,
    /// 누수 의심 컬럼 제거 여부
    pub drop_leak_columns: bool,
    /// 누수 컬럼으로 간주할 이름 접미사 목록
    pub leak_suffixes: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            warmup_bars: 300,
            min_extra_bars: 50,
            lag_days: vec![1, 2, 3],
            finh_period: 110,
            kama_period: 21,
            blueline_period: 144,
            hhll_left_bars: 3,
            hhll_right_bars: 3,
            ovt_period: 89,
            lrb_period: 105,
            zlma_period: 144,
            zlma_smooth: 1,
            vol_rel_period: 10,
            is_inference: false,
            keep_last_rows: None,
            drop_leak_columns: false,
            leak_suffixes: vec!["_PriceAbove".to_string()],
        }
    }
}

impl EngineConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일에 없는 필드는 기본값을 사용하며,
    /// `TRENDLAB__` 접두사의 환경 변수로 오버라이드할 수 있습니다.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("TRENDLAB")
                    .separator("__")
                    .try_parsing(true),
            );

        let loaded: Self = builder.build()?.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// 가장 긴 지표 기간을 반환합니다.
    pub fn max_indicator_period(&self) -> usize {
        [
            self.finh_period,
            self.kama_period,
            self.blueline_period,
            self.ovt_period,
            self.lrb_period,
            self.zlma_period,
            self.zlma_smooth,
            self.vol_rel_period,
            self.hhll_left_bars + self.hhll_right_bars + 1,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }

    /// 가장 큰 lag 오프셋을 반환합니다.
    pub fn max_lag(&self) -> usize {
        self.lag_days.iter().max().copied().unwrap_or(0)
    }

    /// 심볼 처리에 필요한 최소 바 수를 반환합니다.
    pub fn min_bars_required(&self) -> usize {
        self.warmup_bars + self.min_extra_bars
    }

    /// 설정 값의 일관성을 검증합니다.
    ///
    /// # 에러
    ///
    /// - 지표 기간 또는 lag가 0인 경우
    /// - `warmup_bars`가 가장 긴 기간 + 가장 큰 lag보다 작은 경우
    pub fn validate(&self) -> EngineResult<()> {
        let periods = [
            ("finh_period", self.finh_period),
            ("kama_period", self.kama_period),
            ("blueline_period", self.blueline_period),
            ("hhll_left_bars", self.hhll_left_bars),
            ("hhll_right_bars", self.hhll_right_bars),
            ("ovt_period", self.ovt_period),
            ("lrb_period", self.lrb_period),
            ("zlma_period", self.zlma_period),
            ("zlma_smooth", self.zlma_smooth),
            ("vol_rel_period", self.vol_rel_period),
        ];
        for (name, value) in periods {
            if value == 0 {
                return Err(EngineError::Config(format!("{}은(는) 0보다 커야 합니다", name)));
            }
        }

        if self.lag_days.iter().any(|&lag| lag == 0) {
            return Err(EngineError::Config(
                "lag_days의 값은 0보다 커야 합니다".to_string(),
            ));
        }

        if self.keep_last_rows == Some(0) {
            return Err(EngineError::Config(
                "keep_last_rows는 0보다 커야 합니다".to_string(),
            ));
        }

        let required = self.max_indicator_period() + self.max_lag();
        if self.warmup_bars < required {
            return Err(EngineError::Config(format!(
                "warmup_bars({})는 최대 지표 기간 + 최대 lag({}) 이상이어야 합니다",
                self.warmup_bars, required
            )));
        }

        Ok(())
    }
}
