//! # TrendLab Core
//!
//! 추세 분류 feature 엔진의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 feature 엔진 전반에서 사용되는 기본 타입을 제공합니다:
//! - 일봉 OHLCV 데이터 구조체 및 입력 스키마 검증
//! - 심볼별 시계열 그룹화
//! - 엔진 설정 관리
//! - 에러 타입
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
