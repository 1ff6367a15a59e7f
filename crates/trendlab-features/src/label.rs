//! 라벨 상태 기계.
//!
//! 7개 binary 신호의 만장일치 규칙으로 레짐 라벨을 결정하는
//! 2-상태 히스테리시스 FSM입니다:
//! - 7개 신호가 모두 1이면 상승 레짐(1)으로 전이
//! - 7개 신호가 모두 0이면 하락 레짐(0)으로 전이
//! - 그 외(부분 일치, 미정의 포함)에는 현재 상태 유지
//!
//! target은 라벨을 3바 앞당긴 값입니다 (`target[i] = label[i+3]`).
//! 각 심볼의 마지막 3바는 target이 미정의이므로 출력에서 제외됩니다.

use serde::{Deserialize, Serialize};

use crate::features::lag::shift_forward;

/// target이 참조하는 미래 바 수.
pub const TARGET_HORIZON_BARS: usize = 3;

/// 레짐 상태.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendState {
    /// 하락 레짐 (0)
    #[default]
    Down,
    /// 상승 레짐 (1)
    Up,
}

impl TrendState {
    /// 전이 함수.
    ///
    /// 순수 함수이며 상태와 신호 플래그만으로 다음 상태를 결정합니다.
    pub fn step(self, flags: &SignalFlags) -> Self {
        if flags.unanimous_up() {
            TrendState::Up
        } else if flags.unanimous_down() {
            TrendState::Down
        } else {
            self
        }
    }

    /// 0/1 비트 값으로 변환합니다.
    pub fn as_bit(self) -> u8 {
        match self {
            TrendState::Down => 0,
            TrendState::Up => 1,
        }
    }
}

/// 하나의 바에 대한 7개 binary 신호.
///
/// 미정의 신호(`None`)는 어느 만장일치 조건도 만족시키지 않으므로
/// 상태가 유지됩니다.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SignalFlags {
    /// 종가 > FINH
    pub finh_above: Option<bool>,
    /// 종가 > KAMA
    pub kama_above: Option<bool>,
    /// 종가 > BlueLine
    pub blueline_above: Option<bool>,
    /// 종가 > LRB
    pub lrb_above: Option<bool>,
    /// OVT 순증가
    pub ovt_rising: Option<bool>,
    /// ZLMA 순증가
    pub zlma_rising: Option<bool>,
    /// HHLL 상승 추세
    pub hhll_up: Option<bool>,
}

impl SignalFlags {
    fn all_equal(&self, expected: bool) -> bool {
        [
            self.finh_above,
            self.kama_above,
            self.blueline_above,
            self.lrb_above,
            self.ovt_rising,
            self.zlma_rising,
            self.hhll_up,
        ]
        .iter()
        .all(|flag| *flag == Some(expected))
    }

    /// 7개 신호가 모두 1인지 확인합니다.
    pub fn unanimous_up(&self) -> bool {
        self.all_equal(true)
    }

    /// 7개 신호가 모두 0인지 확인합니다.
    pub fn unanimous_down(&self) -> bool {
        self.all_equal(false)
    }
}

/// 신호 시계열에 상태 기계를 순차 적용하여 바별 라벨을 생성합니다.
///
/// 초기 상태는 하락 레짐(0)입니다.
pub fn run_state_machine(flags: &[SignalFlags]) -> Vec<TrendState> {
    let mut state = TrendState::default();
    flags
        .iter()
        .map(|bar_flags| {
            state = state.step(bar_flags);
            state
        })
        .collect()
}

/// 라벨로부터 target 시계열을 파생합니다 (`target[i] = label[i+horizon]`).
///
/// 마지막 `horizon`개 바는 미정의입니다.
pub fn targets(labels: &[TrendState], horizon: usize) -> Vec<Option<u8>> {
    let bits: Vec<Option<u8>> = labels.iter().map(|label| Some(label.as_bit())).collect();
    shift_forward(&bits, horizon)
}
