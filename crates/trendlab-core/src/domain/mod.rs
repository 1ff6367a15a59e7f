//! 도메인 타입.
//!
//! - `DailyBar` - 일봉 OHLCV 바
//! - `RawRecord` - 입력 계약 컬럼명을 따르는 원시 레코드
//! - `SymbolSeries` - 날짜순으로 정렬·검증된 심볼별 시계열

pub mod bar;
pub mod series;

pub use bar::{ensure_schema, DailyBar, RawRecord, REQUIRED_COLUMNS};
pub use series::{group_records, SymbolSeries};
