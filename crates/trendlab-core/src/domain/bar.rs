//! 일봉 바 및 입력 스키마.
//!
//! 외부 데이터 수집기는 `{CODE, DATE, CLOSING_TL, LOW_TL, HIGH_TL, VOLUME_TL}`
//! 컬럼을 가진 테이블을 공급합니다. 이 모듈은 해당 계약을 타입으로 고정하고
//! 스키마 검증을 제공합니다.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// 입력 테이블의 필수 컬럼.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "CODE",
    "DATE",
    "CLOSING_TL",
    "LOW_TL",
    "HIGH_TL",
    "VOLUME_TL",
];

/// 입력 계약 컬럼명을 그대로 따르는 원시 레코드.
///
/// 스프레드시트/CSV 리더가 역직렬화하여 엔진에 공급하는 단위입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    /// 종목 코드
    #[serde(rename = "CODE")]
    pub code: String,
    /// 거래일
    #[serde(rename = "DATE")]
    pub date: NaiveDate,
    /// 종가
    #[serde(rename = "CLOSING_TL")]
    pub close: Decimal,
    /// 저가
    #[serde(rename = "LOW_TL")]
    pub low: Decimal,
    /// 고가
    #[serde(rename = "HIGH_TL")]
    pub high: Decimal,
    /// 거래량
    #[serde(rename = "VOLUME_TL")]
    pub volume: Decimal,
}

/// 하나의 심볼-일 관측값.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    /// 거래일
    pub date: NaiveDate,
    /// 종가
    pub close: Decimal,
    /// 저가
    pub low: Decimal,
    /// 고가
    pub high: Decimal,
    /// 거래량
    pub volume: Decimal,
}

impl DailyBar {
    /// 새 일봉 바를 생성합니다.
    pub fn new(
        date: NaiveDate,
        close: Decimal,
        low: Decimal,
        high: Decimal,
        volume: Decimal,
    ) -> Self {
        Self {
            date,
            close,
            low,
            high,
            volume,
        }
    }
}

impl From<RawRecord> for DailyBar {
    fn from(record: RawRecord) -> Self {
        Self {
            date: record.date,
            close: record.close,
            low: record.low,
            high: record.high,
            volume: record.volume,
        }
    }
}

/// 입력 테이블의 헤더가 필수 컬럼을 모두 포함하는지 검증합니다.
///
/// # 에러
///
/// 누락된 첫 번째 컬럼에 대해 [`EngineError::SchemaMismatch`]를 반환합니다.
/// 이 에러는 배치 전체에 대해 치명적입니다 (가격 컬럼 없이는 진행 불가).
pub fn ensure_schema<S: AsRef<str>>(columns: &[S]) -> EngineResult<()> {
    for required in REQUIRED_COLUMNS {
        if !columns.iter().any(|c| c.as_ref() == required) {
            return Err(EngineError::SchemaMismatch(required.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_ensure_schema_complete() {
        let columns = vec![
            "CODE",
            "DATE",
            "CLOSING_TL",
            "LOW_TL",
            "HIGH_TL",
            "VOLUME_TL",
            "EXTRA",
        ];
        assert!(ensure_schema(&columns).is_ok());
    }

    #[test]
    fn test_ensure_schema_missing_column() {
        let columns = vec!["CODE", "DATE", "CLOSING_TL", "LOW_TL", "HIGH_TL"];
        let err = ensure_schema(&columns).unwrap_err();
        assert!(matches!(err, EngineError::SchemaMismatch(col) if col == "VOLUME_TL"));
    }

    #[test]
    fn test_raw_record_field_names() {
        let record = RawRecord {
            code: "THYAO".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            close: dec!(250.5),
            low: dec!(248.0),
            high: dec!(252.0),
            volume: dec!(1000000),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("CODE").is_some());
        assert!(json.get("CLOSING_TL").is_some());
        assert!(json.get("VOLUME_TL").is_some());
    }

    #[test]
    fn test_raw_record_converts_to_bar() {
        let record = RawRecord {
            code: "THYAO".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            close: dec!(100),
            low: dec!(98),
            high: dec!(103),
            volume: dec!(500),
        };

        let bar: DailyBar = record.into();
        assert_eq!(bar.close, dec!(100));
        assert_eq!(bar.high, dec!(103));
    }
}
