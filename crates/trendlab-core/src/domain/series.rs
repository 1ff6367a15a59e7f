//! 심볼별 시계열.
//!
//! 엔진의 모든 계산은 하나의 심볼 시계열에 대한 순수 함수입니다.
//! `SymbolSeries`는 생성 시점에 날짜순 정렬과 중복 날짜 검증을 보장하므로
//! 이후 단계는 정렬 여부를 다시 확인하지 않습니다.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::domain::bar::{DailyBar, RawRecord};
use crate::error::{EngineError, EngineResult};

/// 날짜순으로 정렬·검증된 심볼별 바 시계열.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolSeries {
    /// 종목 코드
    code: String,
    /// 날짜 오름차순 바
    bars: Vec<DailyBar>,
}

impl SymbolSeries {
    /// 바 목록으로부터 시계열을 생성합니다.
    ///
    /// 입력은 정렬되어 있지 않아도 되며, 내부에서 날짜순으로 정렬됩니다.
    ///
    /// # 에러
    ///
    /// 같은 날짜의 바가 둘 이상이면 [`EngineError::InvalidInput`]을 반환합니다.
    pub fn new(code: impl Into<String>, mut bars: Vec<DailyBar>) -> EngineResult<Self> {
        let code = code.into();
        bars.sort_by_key(|bar| bar.date);

        if let Some(pair) = bars.windows(2).find(|pair| pair[0].date == pair[1].date) {
            return Err(EngineError::InvalidInput(format!(
                "{}: 중복 날짜 {}",
                code, pair[0].date
            )));
        }

        Ok(Self { code, bars })
    }

    /// 종목 코드를 반환합니다.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// 바 시계열을 반환합니다.
    pub fn bars(&self) -> &[DailyBar] {
        &self.bars
    }

    /// 바 개수를 반환합니다.
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// 시계열이 비어 있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// 거래일 목록을 반환합니다.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|bar| bar.date).collect()
    }

    /// 종가를 f64 배열로 반환합니다.
    pub fn closes_f64(&self) -> Vec<f64> {
        self.bars
            .iter()
            .map(|bar| bar.close.to_f64().unwrap_or(0.0))
            .collect()
    }

    /// 저가를 f64 배열로 반환합니다.
    pub fn lows_f64(&self) -> Vec<f64> {
        self.bars
            .iter()
            .map(|bar| bar.low.to_f64().unwrap_or(0.0))
            .collect()
    }

    /// 고가를 f64 배열로 반환합니다.
    pub fn highs_f64(&self) -> Vec<f64> {
        self.bars
            .iter()
            .map(|bar| bar.high.to_f64().unwrap_or(0.0))
            .collect()
    }

    /// 거래량을 f64 배열로 반환합니다.
    pub fn volumes_f64(&self) -> Vec<f64> {
        self.bars
            .iter()
            .map(|bar| bar.volume.to_f64().unwrap_or(0.0))
            .collect()
    }
}

/// 원시 레코드를 심볼별 시계열로 그룹화합니다.
///
/// 결과는 종목 코드 오름차순으로 정렬됩니다 (결정성 보장).
/// 중복 날짜 등으로 검증에 실패한 심볼은 경고 로그 후 건너뜁니다.
pub fn group_records(records: Vec<RawRecord>) -> Vec<SymbolSeries> {
    let mut grouped: BTreeMap<String, Vec<DailyBar>> = BTreeMap::new();
    for record in records {
        grouped
            .entry(record.code.clone())
            .or_default()
            .push(record.into());
    }

    let mut series = Vec::with_capacity(grouped.len());
    for (code, bars) in grouped {
        match SymbolSeries::new(code.clone(), bars) {
            Ok(s) => series.push(s),
            Err(e) => {
                tracing::warn!(code = %code, error = %e, "심볼 검증 실패, 건너뜀");
            }
        }
    }
    series
}
