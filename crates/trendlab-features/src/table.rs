//! 컬럼 지향 feature 테이블.
//!
//! 파이프라인의 출력 컨테이너입니다. 컬럼 순서가 곧 출력 스키마이며,
//! 삽입 순서를 그대로 보존합니다. 결측값은 `None`으로 표현됩니다.

use chrono::NaiveDate;
use serde_json::{json, Map, Value};

use trendlab_core::{EngineError, EngineResult};

/// 컬럼 데이터.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    /// 문자열 컬럼 (심볼 코드)
    Text(Vec<String>),
    /// 날짜 컬럼
    Date(Vec<NaiveDate>),
    /// 수치 컬럼 (결측 허용)
    Float(Vec<Option<f64>>),
}

impl ColumnData {
    fn len(&self) -> usize {
        match self {
            ColumnData::Text(v) => v.len(),
            ColumnData::Date(v) => v.len(),
            ColumnData::Float(v) => v.len(),
        }
    }

    fn retain_range(&mut self, start: usize, end: usize) {
        match self {
            ColumnData::Text(v) => *v = v[start..end].to_vec(),
            ColumnData::Date(v) => *v = v[start..end].to_vec(),
            ColumnData::Float(v) => *v = v[start..end].to_vec(),
        }
    }

    fn append(&mut self, other: ColumnData) -> EngineResult<()> {
        match (self, other) {
            (ColumnData::Text(a), ColumnData::Text(b)) => a.extend(b),
            (ColumnData::Date(a), ColumnData::Date(b)) => a.extend(b),
            (ColumnData::Float(a), ColumnData::Float(b)) => a.extend(b),
            _ => {
                return Err(EngineError::SchemaMismatch(
                    "컬럼 타입이 일치하지 않습니다".to_string(),
                ))
            }
        }
        Ok(())
    }

    fn value_at(&self, row: usize) -> Value {
        match self {
            ColumnData::Text(v) => json!(v[row]),
            ColumnData::Date(v) => json!(v[row].format("%Y-%m-%d").to_string()),
            ColumnData::Float(v) => match v[row] {
                Some(x) => json!(x),
                None => Value::Null,
            },
        }
    }
}

/// 이름이 붙은 단일 컬럼.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

/// 순서가 고정된 컬럼 지향 테이블.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureTable {
    columns: Vec<Column>,
}

impl FeatureTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn push_column(&mut self, name: &str, data: ColumnData) -> EngineResult<()> {
        if self.columns.iter().any(|c| c.name == name) {
            return Err(EngineError::Computation(format!(
                "중복된 컬럼: {name}"
            )));
        }
        if let Some(first) = self.columns.first() {
            if first.data.len() != data.len() {
                return Err(EngineError::Computation(format!(
                    "컬럼 {name}의 행 수({})가 테이블({})과 다릅니다",
                    data.len(),
                    first.data.len()
                )));
            }
        }
        self.columns.push(Column {
            name: name.to_string(),
            data,
        });
        Ok(())
    }

    /// 문자열 컬럼을 추가합니다.
    pub fn push_text(&mut self, name: &str, values: Vec<String>) -> EngineResult<()> {
        self.push_column(name, ColumnData::Text(values))
    }

    /// 날짜 컬럼을 추가합니다.
    pub fn push_date(&mut self, name: &str, values: Vec<NaiveDate>) -> EngineResult<()> {
        self.push_column(name, ColumnData::Date(values))
    }

    /// 수치 컬럼을 추가합니다.
    pub fn push_float(&mut self, name: &str, values: Vec<Option<f64>>) -> EngineResult<()> {
        self.push_column(name, ColumnData::Float(values))
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map(|c| c.data.len()).unwrap_or(0)
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows() == 0
    }

    /// 삽입 순서대로의 컬럼 이름.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// 수치 컬럼을 이름으로 조회합니다.
    pub fn float_column(&self, name: &str) -> Option<&[Option<f64>]> {
        self.columns.iter().find(|c| c.name == name).and_then(|c| {
            match &c.data {
                ColumnData::Float(v) => Some(v.as_slice()),
                _ => None,
            }
        })
    }

    /// `[start, end)` 구간의 행만 남깁니다.
    pub fn retain_rows(&mut self, start: usize, end: usize) -> EngineResult<()> {
        let n = self.n_rows();
        if start > end || end > n {
            return Err(EngineError::Computation(format!(
                "잘못된 행 구간 [{start}, {end}) (전체 {n}행)"
            )));
        }
        for column in &mut self.columns {
            column.data.retain_range(start, end);
        }
        Ok(())
    }

    /// 마지막 `n`개 행만 남깁니다.
    ///
    /// 행 수가 `n` 이하면 아무것도 제거하지 않습니다. 일일 예측 내보내기에서
    /// 심볼별 최근 구간만 유지할 때 사용됩니다.
    pub fn tail_rows(&mut self, n: usize) {
        let total = self.n_rows();
        let start = total.saturating_sub(n);
        for column in &mut self.columns {
            column.data.retain_range(start, total);
        }
    }

    /// 접미사로 끝나는 컬럼을 제거하고, 제거된 이름을 반환합니다.
    pub fn drop_columns_with_suffix(&mut self, suffixes: &[String]) -> Vec<String> {
        let mut dropped = Vec::new();
        self.columns.retain(|column| {
            if suffixes.iter().any(|s| column.name.ends_with(s.as_str())) {
                dropped.push(column.name.clone());
                false
            } else {
                true
            }
        });
        dropped
    }

    /// 동일 스키마의 테이블을 뒤에 이어 붙입니다.
    pub fn append(&mut self, other: FeatureTable) -> EngineResult<()> {
        if self.columns.is_empty() {
            self.columns = other.columns;
            return Ok(());
        }
        if self.column_names() != other.column_names() {
            return Err(EngineError::SchemaMismatch(format!(
                "컬럼 구성이 다릅니다: {} vs {}",
                self.n_cols(),
                other.n_cols()
            )));
        }
        for (mine, theirs) in self.columns.iter_mut().zip(other.columns) {
            mine.data.append(theirs.data)?;
        }
        Ok(())
    }

    /// 컬럼별 결측 개수.
    pub fn missing_counts(&self) -> Vec<(String, usize)> {
        self.columns
            .iter()
            .filter_map(|c| match &c.data {
                ColumnData::Float(v) => {
                    let missing = v.iter().filter(|x| x.is_none()).count();
                    (missing > 0).then(|| (c.name.clone(), missing))
                }
                _ => None,
            })
            .collect()
    }

    /// binary 컬럼의 (0 개수, 1 개수, 결측 개수)를 셉니다.
    pub fn binary_distribution(&self, name: &str) -> Option<(usize, usize, usize)> {
        let values = self.float_column(name)?;
        let mut zeros = 0;
        let mut ones = 0;
        let mut missing = 0;
        for value in values {
            match value {
                Some(x) if *x == 0.0 => zeros += 1,
                Some(_) => ones += 1,
                None => missing += 1,
            }
        }
        Some((zeros, ones, missing))
    }

    /// 행 단위 JSON 레코드로 직렬화합니다.
    pub fn to_json_records(&self) -> Vec<Value> {
        (0..self.n_rows())
            .map(|row| {
                let mut record = Map::new();
                for column in &self.columns {
                    record.insert(column.name.clone(), column.data.value_at(row));
                }
                Value::Object(record)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> FeatureTable {
        let mut table = FeatureTable::new();
        table
            .push_text("CODE", vec!["A".into(), "A".into(), "A".into()])
            .unwrap();
        table
            .push_date(
                "DATE",
                vec![
                    NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                    NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
                    NaiveDate::from_ymd_opt(2024, 1, 4).unwrap(),
                ],
            )
            .unwrap();
        table
            .push_float("FINH_PriceAbove", vec![Some(1.0), Some(0.0), None])
            .unwrap();
        table
            .push_float("FINH_Dist_Pct", vec![Some(0.05), Some(-0.01), None])
            .unwrap();
        table
    }

    #[test]
    fn test_column_order_preserved() {
        let table = sample_table();
        assert_eq!(
            table.column_names(),
            vec!["CODE", "DATE", "FINH_PriceAbove", "FINH_Dist_Pct"]
        );
        assert_eq!(table.n_rows(), 3);
    }

    #[test]
    fn test_row_count_mismatch_rejected() {
        let mut table = sample_table();
        let result = table.push_float("X", vec![Some(1.0)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let mut table = sample_table();
        assert!(table.push_float("CODE", vec![None, None, None]).is_err());
    }

    #[test]
    fn test_retain_rows() {
        let mut table = sample_table();
        table.retain_rows(1, 3).unwrap();

        assert_eq!(table.n_rows(), 2);
        assert_eq!(
            table.float_column("FINH_Dist_Pct").unwrap(),
            &[Some(-0.01), None]
        );
    }

    #[test]
    fn test_retain_rows_invalid_range() {
        let mut table = sample_table();
        assert!(table.retain_rows(2, 1).is_err());
        assert!(table.retain_rows(0, 4).is_err());
    }

    #[test]
    fn test_tail_rows() {
        let mut table = sample_table();
        table.tail_rows(2);

        assert_eq!(table.n_rows(), 2);
        assert_eq!(
            table.float_column("FINH_Dist_Pct").unwrap(),
            &[Some(-0.01), None]
        );
    }

    #[test]
    fn test_tail_rows_larger_than_table_keeps_all() {
        let mut table = sample_table();
        table.tail_rows(10);
        assert_eq!(table.n_rows(), 3);
    }

    #[test]
    fn test_drop_columns_with_suffix() {
        let mut table = sample_table();
        let dropped = table.drop_columns_with_suffix(&["_PriceAbove".to_string()]);

        assert_eq!(dropped, vec!["FINH_PriceAbove".to_string()]);
        assert_eq!(
            table.column_names(),
            vec!["CODE", "DATE", "FINH_Dist_Pct"]
        );
    }

    #[test]
    fn test_append_same_schema() {
        let mut first = sample_table();
        let second = sample_table();
        first.append(second).unwrap();

        assert_eq!(first.n_rows(), 6);
        assert_eq!(first.n_cols(), 4);
    }

    #[test]
    fn test_append_schema_mismatch() {
        let mut first = sample_table();
        let mut second = FeatureTable::new();
        second.push_text("CODE", vec!["B".into()]).unwrap();

        assert!(first.append(second).is_err());
    }

    #[test]
    fn test_append_into_empty() {
        let mut table = FeatureTable::new();
        table.append(sample_table()).unwrap();
        assert_eq!(table.n_rows(), 3);
    }

    #[test]
    fn test_missing_counts() {
        let table = sample_table();
        let missing = table.missing_counts();

        assert_eq!(
            missing,
            vec![
                ("FINH_PriceAbove".to_string(), 1),
                ("FINH_Dist_Pct".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_binary_distribution() {
        let table = sample_table();
        assert_eq!(
            table.binary_distribution("FINH_PriceAbove"),
            Some((1, 1, 1))
        );
        assert_eq!(table.binary_distribution("CODE"), None);
    }

    #[test]
    fn test_json_records() {
        let table = sample_table();
        let records = table.to_json_records();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0]["CODE"], "A");
        assert_eq!(records[0]["DATE"], "2024-01-02");
        assert_eq!(records[0]["FINH_PriceAbove"], 1.0);
        assert!(records[2]["FINH_Dist_Pct"].is_null());
    }
}
