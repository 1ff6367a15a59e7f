//! 기술적 지표 모듈.
//!
//! 이 모듈은 추세 분류 feature의 원천이 되는 지표들을 제공합니다.
//!
//! # 지원 지표
//!
//! ## 추세 필터 (Trend Filters)
//! - **FINH**: 재귀 이중 지수 변환
//! - **KAMA**: 적응형 이동평균
//! - **BlueLine**: 삼중 지수 스무딩
//! - **OVT**: 이중 가중 이동평균 차분
//! - **LRB**: 롤링 선형회귀 종단값
//! - **ZLMA**: 제로랙 가중 이동평균
//!
//! ## 구조 지표
//! - **HHLL**: 피벗 고점/저점 기반 추세 감지
//!
//! # 사용 예시
//!
//! ```ignore
//! use trendlab_features::indicators::{FilterEngine, KamaParams};
//!
//! let engine = FilterEngine::new();
//! let kama = engine.kama(&closes, KamaParams { period: 21 })?;
//! ```

pub mod filters;
pub mod hhll;
pub mod smoothing;

use thiserror::Error;

pub use filters::{
    BlueLineParams, FinhParams, KamaParams, LrbParams, OvtParams, TrendFilters, ZlmaParams,
};
pub use hhll::{HhllParams, HhllResult, PivotDetector};

/// 지표 계산 오류.
#[derive(Debug, Error)]
pub enum IndicatorError {
    /// 데이터 부족 오류
    #[error("데이터가 부족합니다: 필요 {required}개, 제공 {provided}개")]
    InsufficientData { required: usize, provided: usize },

    /// 잘못된 파라미터
    #[error("잘못된 파라미터: {0}")]
    InvalidParameter(String),

    /// 계산 오류
    #[error("계산 오류: {0}")]
    CalculationError(String),
}

/// 지표 계산 결과 타입.
pub type IndicatorResult<T> = Result<T, IndicatorError>;

impl From<IndicatorError> for trendlab_core::EngineError {
    fn from(err: IndicatorError) -> Self {
        match err {
            IndicatorError::InsufficientData { required, provided } => {
                trendlab_core::EngineError::InsufficientData { required, provided }
            }
            other => trendlab_core::EngineError::Computation(other.to_string()),
        }
    }
}

/// 통합 지표 엔진.
///
/// 모든 지표 계산을 위한 통합 인터페이스를 제공합니다.
#[derive(Debug, Default)]
pub struct FilterEngine {
    filters: TrendFilters,
    pivots: PivotDetector,
}

impl FilterEngine {
    /// 새로운 지표 엔진 생성.
    pub fn new() -> Self {
        Self::default()
    }

    /// FINH 계산.
    pub fn finh(&self, closes: &[f64], params: FinhParams) -> IndicatorResult<Vec<Option<f64>>> {
        self.filters.finh(closes, params)
    }

    /// KAMA 계산.
    pub fn kama(&self, closes: &[f64], params: KamaParams) -> IndicatorResult<Vec<Option<f64>>> {
        self.filters.kama(closes, params)
    }

    /// BlueLine 계산.
    pub fn blueline(
        &self,
        closes: &[f64],
        params: BlueLineParams,
    ) -> IndicatorResult<Vec<Option<f64>>> {
        self.filters.blueline(closes, params)
    }

    /// OVT 계산.
    pub fn ovt(&self, closes: &[f64], params: OvtParams) -> IndicatorResult<Vec<Option<f64>>> {
        self.filters.ovt(closes, params)
    }

    /// LRB 계산.
    pub fn lrb(&self, closes: &[f64], params: LrbParams) -> IndicatorResult<Vec<Option<f64>>> {
        self.filters.lrb(closes, params)
    }

    /// ZLMA 계산.
    pub fn zlma(&self, closes: &[f64], params: ZlmaParams) -> IndicatorResult<Vec<Option<f64>>> {
        self.filters.zlma(closes, params)
    }

    /// HHLL 추세 감지.
    pub fn hhll(
        &self,
        highs: &[f64],
        lows: &[f64],
        closes: &[f64],
        params: HhllParams,
    ) -> IndicatorResult<HhllResult> {
        self.pivots.detect(highs, lows, closes, params)
    }
}
