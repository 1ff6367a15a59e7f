//! 파생 feature 모듈.
//!
//! - `derived` - 지표-가격 관계 feature (slope, price_above, dist_pct, slope_rate)
//! - `lag` - 시차 복사본 생성
//! - `volume` - 상대 거래량 정규화

pub mod derived;
pub mod lag;
pub mod volume;

pub use derived::{derive_features, DerivedSeries};
pub use lag::{shift_back, shift_forward};
pub use volume::relative_volume;
