//! # TrendLab Features
//!
//! 일봉 OHLCV 시계열로부터 추세 분류용 feature 테이블을 생성하는 엔진입니다.
//!
//! 처리 단계 (심볼별, 순차):
//! 1. 지표 라이브러리 - 6개 추세 필터(FINH, KAMA, BlueLine, OVT, LRB, ZLMA)와
//!    피벗 기반 추세 감지기(HHLL)
//! 2. 파생 feature - 지표별 slope / price_above / dist_pct / slope_rate
//! 3. lag 확장 - 선택된 feature의 시차 복사본
//! 4. 라벨 상태 기계 - 7개 신호 만장일치 기반 히스테리시스 라벨과
//!    3일 후 target
//! 5. 트리밍 및 누수 가드 - warm-up 행과 target 미정의 행 제거
//! 6. 파이프라인 오케스트레이터 - 심볼별 격리 실행, 연결, 진단
//!
//! 모든 미정의 값(warm-up, 0으로 나누기, lag 공백)은 `Option::None`으로
//! 표현되어 산술 전체에 전파되며, 에러로 승격되지 않습니다.
//!
//! # 사용 예시
//!
//! ```ignore
//! use trendlab_core::{group_records, EngineConfig};
//! use trendlab_features::pipeline::FeaturePipeline;
//!
//! let series = group_records(records);
//! let pipeline = FeaturePipeline::new(EngineConfig::default())?;
//! let (table, stats) = pipeline.run(&series)?;
//! ```

pub mod features;
pub mod indicators;
pub mod label;
pub mod pipeline;
pub mod stats;
pub mod table;

pub use features::{derive_features, relative_volume, shift_back, shift_forward, DerivedSeries};
pub use indicators::{FilterEngine, IndicatorError, IndicatorResult};
pub use label::{run_state_machine, targets, SignalFlags, TrendState, TARGET_HORIZON_BARS};
pub use pipeline::{expected_columns, FeaturePipeline};
pub use stats::RunStats;
pub use table::{Column, ColumnData, FeatureTable};
