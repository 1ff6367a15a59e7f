//! 핵심 연산의 속성 기반 테스트.

use proptest::prelude::*;

use trendlab_features::features::lag::{shift_back, shift_forward};
use trendlab_features::indicators::smoothing::wma_f64;
use trendlab_features::label::{run_state_machine, targets, SignalFlags, TARGET_HORIZON_BARS};

fn arb_flag() -> impl Strategy<Value = Option<bool>> {
    prop_oneof![Just(None), Just(Some(false)), Just(Some(true))]
}

fn arb_signal_flags() -> impl Strategy<Value = SignalFlags> {
    (
        arb_flag(),
        arb_flag(),
        arb_flag(),
        arb_flag(),
        arb_flag(),
        arb_flag(),
        arb_flag(),
    )
        .prop_map(
            |(finh, kama, blueline, lrb, ovt, zlma, hhll)| SignalFlags {
                finh_above: finh,
                kama_above: kama,
                blueline_above: blueline,
                lrb_above: lrb,
                ovt_rising: ovt,
                zlma_rising: zlma,
                hhll_up: hhll,
            },
        )
}

proptest! {
    #[test]
    fn shift_back_reproduces_past_values(
        values in prop::collection::vec(prop::option::of(-1e6f64..1e6), 0..100),
        lag in 1usize..10,
    ) {
        let shifted = shift_back(&values, lag);
        prop_assert_eq!(shifted.len(), values.len());

        for i in 0..values.len() {
            if i < lag {
                prop_assert_eq!(shifted[i], None);
            } else {
                prop_assert_eq!(shifted[i], values[i - lag]);
            }
        }
    }

    #[test]
    fn shift_forward_reproduces_future_values(
        values in prop::collection::vec(prop::option::of(0u8..2), 0..100),
        horizon in 1usize..10,
    ) {
        let shifted = shift_forward(&values, horizon);
        prop_assert_eq!(shifted.len(), values.len());

        for i in 0..values.len() {
            if i + horizon < values.len() {
                prop_assert_eq!(shifted[i], values[i + horizon]);
            } else {
                prop_assert_eq!(shifted[i], None);
            }
        }
    }

    #[test]
    fn state_changes_only_on_unanimous_bars(
        flags in prop::collection::vec(arb_signal_flags(), 1..200),
    ) {
        let labels = run_state_machine(&flags);
        prop_assert_eq!(labels.len(), flags.len());

        let mut prev = trendlab_features::label::TrendState::default();
        for (bar_flags, label) in flags.iter().zip(&labels) {
            if *label != prev {
                // 상태 전이가 있었다면 해당 바의 신호가 만장일치여야 함
                prop_assert!(bar_flags.unanimous_up() || bar_flags.unanimous_down());
            }
            prev = *label;
        }
    }

    #[test]
    fn targets_are_labels_shifted_forward(
        flags in prop::collection::vec(arb_signal_flags(), 4..200),
    ) {
        let labels = run_state_machine(&flags);
        let target = targets(&labels, TARGET_HORIZON_BARS);

        for i in 0..labels.len() {
            if i + TARGET_HORIZON_BARS < labels.len() {
                prop_assert_eq!(target[i], Some(labels[i + TARGET_HORIZON_BARS].as_bit()));
            } else {
                prop_assert_eq!(target[i], None);
            }
        }
    }

    #[test]
    fn wma_of_constant_is_constant(
        value in 1.0f64..1e4,
        len in 5usize..50,
        period in 1usize..5,
    ) {
        let values = vec![value; len];
        let result = wma_f64(&values, period);

        for (i, out) in result.iter().enumerate() {
            if i + 1 >= period {
                let out = out.unwrap();
                prop_assert!((out - value).abs() < 1e-9 * value);
            } else {
                prop_assert_eq!(*out, None);
            }
        }
    }

    #[test]
    fn wma_stays_within_input_range(
        values in prop::collection::vec(1.0f64..1e4, 10..60),
        period in 2usize..8,
    ) {
        let result = wma_f64(&values, period);

        for i in (period - 1)..values.len() {
            let window = &values[i + 1 - period..=i];
            let lo = window.iter().cloned().fold(f64::INFINITY, f64::min);
            let hi = window.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let out = result[i].unwrap();
            prop_assert!(out >= lo - 1e-9 && out <= hi + 1e-9);
        }
    }
}
