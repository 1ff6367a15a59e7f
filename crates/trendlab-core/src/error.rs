//! feature 엔진의 에러 타입.
//!
//! 이 모듈은 엔진 전반에서 사용되는 에러 타입을 정의합니다.
//! "값이 아직 정의되지 않음"(warm-up 구간, 0으로 나누기 등)은
//! 에러가 아니라 `Option::None`으로 표현됩니다.

use thiserror::Error;

/// 핵심 엔진 에러.
#[derive(Debug, Error)]
pub enum EngineError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 입력 스키마 에러 (필수 컬럼 누락)
    #[error("입력 스키마 에러: 필수 컬럼이 없습니다: {0}")]
    SchemaMismatch(String),

    /// 데이터 부족 에러
    #[error("데이터가 부족합니다: 필요 {required}개, 제공 {provided}개")]
    InsufficientData { required: usize, provided: usize },

    /// 지표/feature 계산 에러
    #[error("계산 에러: {0}")]
    Computation(String),

    /// 잘못된 입력 (중복 날짜 등)
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    /// 모든 심볼 처리 후 결과가 비어 있음
    #[error("결과가 비어 있습니다: 처리된 심볼이 없습니다")]
    EmptyResult,
}

/// 엔진 작업을 위한 Result 타입.
pub type EngineResult<T> = Result<T, EngineError>;

impl EngineError {
    /// 심볼 단위로 격리 가능한 에러인지 확인합니다.
    ///
    /// 격리 가능한 에러는 해당 심볼만 건너뛰고 배치를 계속 진행합니다.
    pub fn is_symbol_local(&self) -> bool {
        matches!(
            self,
            EngineError::InsufficientData { .. }
                | EngineError::Computation(_)
                | EngineError::InvalidInput(_)
        )
    }

    /// 배치 전체를 중단해야 하는 에러인지 확인합니다.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            EngineError::SchemaMismatch(_) | EngineError::Config(_) | EngineError::EmptyResult
        )
    }
}

impl From<config::ConfigError> for EngineError {
    fn from(err: config::ConfigError) -> Self {
        EngineError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_local_errors() {
        let err = EngineError::InsufficientData {
            required: 350,
            provided: 100,
        };
        assert!(err.is_symbol_local());
        assert!(!err.is_fatal());

        let err = EngineError::Computation("윈도우 길이 0".to_string());
        assert!(err.is_symbol_local());
    }

    #[test]
    fn test_fatal_errors() {
        let err = EngineError::SchemaMismatch("CLOSING_TL".to_string());
        assert!(err.is_fatal());
        assert!(!err.is_symbol_local());

        assert!(EngineError::EmptyResult.is_fatal());
    }

    #[test]
    fn test_error_display() {
        let err = EngineError::InsufficientData {
            required: 350,
            provided: 120,
        };
        assert_eq!(err.to_string(), "데이터가 부족합니다: 필요 350개, 제공 120개");
    }
}
