//! feature 생성 파이프라인.
//!
//! 심볼별로 지표 → 파생 feature → lag → 라벨 → 트리밍을 순서대로
//! 수행하고, 결과 테이블을 심볼 코드 순으로 이어 붙입니다.
//! 모든 계산은 하나의 심볼 시계열 안에서만 이루어지며 심볼 간
//! 상태 공유가 없습니다. 한 심볼의 실패는 로그 후 다음 심볼로
//! 계속 진행합니다.

use std::time::Instant;

use trendlab_core::{EngineConfig, EngineError, EngineResult, SymbolSeries};

use crate::features::{derive_features, relative_volume, shift_back, DerivedSeries};
use crate::indicators::{
    BlueLineParams, FilterEngine, FinhParams, HhllParams, KamaParams, LrbParams, OvtParams,
    ZlmaParams,
};
use crate::label::{run_state_machine, targets, SignalFlags, TARGET_HORIZON_BARS};
use crate::stats::RunStats;
use crate::table::FeatureTable;

/// 라벨 계산에 참여하는 추세 필터 이름 (출력 컬럼 접두사).
const FILTER_NAMES: [&str; 6] = ["FINH", "KAMA", "BlueLine", "OVT", "LRB", "ZLMA"];

/// 심볼별 독립 feature 파이프라인.
pub struct FeaturePipeline {
    config: EngineConfig,
    engine: FilterEngine,
}

impl FeaturePipeline {
    /// 설정을 검증하고 파이프라인을 생성합니다.
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            engine: FilterEngine::new(),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// 전체 심볼에 대해 feature 테이블을 생성합니다.
    ///
    /// 히스토리가 부족한 심볼은 건너뛰고, 심볼 단위 계산 오류는
    /// 로그 후 계속 진행합니다. 처리 순서는 심볼 코드 오름차순으로
    /// 고정되어 입력 순서와 무관하게 같은 출력을 냅니다.
    ///
    /// # 에러
    ///
    /// 모든 심볼이 제외되어 출력이 비면 [`EngineError::EmptyResult`]를
    /// 반환합니다.
    pub fn run(&self, series: &[SymbolSeries]) -> EngineResult<(FeatureTable, RunStats)> {
        let started = Instant::now();
        let mut stats = RunStats::new();
        stats.total = series.len();

        let mut ordered: Vec<&SymbolSeries> = series.iter().collect();
        ordered.sort_by(|a, b| a.code().cmp(b.code()));

        let mut combined = FeatureTable::new();
        for symbol in ordered {
            if symbol.len() < self.config.min_bars_required() {
                tracing::warn!(
                    code = %symbol.code(),
                    bars = symbol.len(),
                    required = self.config.min_bars_required(),
                    "히스토리 부족, 건너뜀"
                );
                stats.skipped += 1;
                continue;
            }

            match self.run_symbol(symbol) {
                Ok(table) => {
                    stats.success += 1;
                    stats.output_rows += table.n_rows();
                    combined.append(table)?;
                }
                Err(e) if e.is_symbol_local() => {
                    tracing::error!(code = %symbol.code(), error = %e, "심볼 처리 실패, 계속 진행");
                    stats.errors += 1;
                }
                Err(e) => {
                    tracing::error!(code = %symbol.code(), error = %e, fatal = e.is_fatal(), "배치 중단");
                    return Err(e);
                }
            }
        }

        stats.elapsed = started.elapsed();
        stats.log_summary();

        if combined.is_empty() {
            return Err(EngineError::EmptyResult);
        }

        self.log_diagnostics(&combined);
        Ok((combined, stats))
    }

    /// 하나의 심볼 시계열로부터 전체 컬럼 테이블을 생성합니다.
    fn run_symbol(&self, symbol: &SymbolSeries) -> EngineResult<FeatureTable> {
        let n = symbol.len();
        let closes = symbol.closes_f64();
        let lows = symbol.lows_f64();
        let highs = symbol.highs_f64();
        let volumes = symbol.volumes_f64();

        let finh = self.engine.finh(
            &closes,
            FinhParams {
                period: self.config.finh_period,
            },
        )?;
        let kama = self.engine.kama(
            &closes,
            KamaParams {
                period: self.config.kama_period,
            },
        )?;
        let blueline = self.engine.blueline(
            &closes,
            BlueLineParams {
                period: self.config.blueline_period,
            },
        )?;
        let ovt = self.engine.ovt(
            &closes,
            OvtParams {
                period: self.config.ovt_period,
            },
        )?;
        let lrb = self.engine.lrb(
            &closes,
            LrbParams {
                period: self.config.lrb_period,
            },
        )?;
        let zlma = self.engine.zlma(
            &closes,
            ZlmaParams {
                period: self.config.zlma_period,
                smooth: self.config.zlma_smooth,
            },
        )?;
        let hhll = self.engine.hhll(
            &highs,
            &lows,
            &closes,
            HhllParams {
                left_bars: self.config.hhll_left_bars,
                right_bars: self.config.hhll_right_bars,
            },
        )?;
        let vol_rel = relative_volume(&volumes, self.config.vol_rel_period)?;

        let filters: [(&str, Vec<Option<f64>>); 6] = [
            ("FINH", finh),
            ("KAMA", kama),
            ("BlueLine", blueline),
            ("OVT", ovt),
            ("LRB", lrb),
            ("ZLMA", zlma),
        ];
        let mut derived: Vec<DerivedSeries> = Vec::with_capacity(filters.len());
        for (_, values) in &filters {
            derived.push(derive_features(&closes, values)?);
        }

        // 라벨: 가격 위치 4종 + 기울기 2종 + HHLL 추세의 만장일치
        let flags: Vec<SignalFlags> = (0..n)
            .map(|i| SignalFlags {
                finh_above: derived[0].price_above[i],
                kama_above: derived[1].price_above[i],
                blueline_above: derived[2].price_above[i],
                lrb_above: derived[4].price_above[i],
                ovt_rising: derived[3].slope[i],
                zlma_rising: derived[5].slope[i],
                hhll_up: Some(hhll.trend[i] == 1),
            })
            .collect();
        let labels = run_state_machine(&flags);
        let target = targets(&labels, TARGET_HORIZON_BARS);

        let mut table = FeatureTable::new();
        table.push_text("CODE", vec![symbol.code().to_string(); n])?;
        table.push_date("DATE", symbol.dates())?;
        table.push_float("CLOSING_TL", defined(&closes))?;
        table.push_float("LOW_TL", defined(&lows))?;
        table.push_float("HIGH_TL", defined(&highs))?;
        table.push_float("VOL_Rel", vol_rel)?;

        for ((name, values), d) in filters.iter().zip(&derived) {
            table.push_float(name, values.clone())?;
            table.push_float(&format!("{name}_Dist_Pct"), d.dist_pct.clone())?;
            table.push_float(&format!("{name}_Slope_Rate"), d.slope_rate.clone())?;
            table.push_float(&format!("{name}_PriceAbove"), bits(&d.price_above))?;
            for lag in &self.config.lag_days {
                table.push_float(
                    &format!("{name}_Dist_Pct_Lag{lag}"),
                    shift_back(&d.dist_pct, *lag),
                )?;
                table.push_float(
                    &format!("{name}_Slope_Rate_Lag{lag}"),
                    shift_back(&d.slope_rate, *lag),
                )?;
            }
        }

        let hhll_trend: Vec<Option<f64>> =
            hhll.trend.iter().map(|t| Some(f64::from(*t))).collect();
        table.push_float("HHLL_Trend", hhll_trend.clone())?;
        for lag in &self.config.lag_days {
            table.push_float(
                &format!("HHLL_Trend_Lag{lag}"),
                shift_back(&hhll_trend, *lag),
            )?;
        }

        table.push_float(
            "Current_Trend",
            labels
                .iter()
                .map(|label| Some(f64::from(label.as_bit())))
                .collect(),
        )?;
        if !self.config.is_inference {
            table.push_float(
                "TARGET_3D",
                target.iter().map(|t| t.map(f64::from)).collect(),
            )?;
        }

        // 학습 모드: warm-up 구간과 target이 미정의인 마지막 3행 제거.
        // 추론 모드: 마지막 행이 예측 대상이므로 끝을 자르지 않음.
        let start = self.config.warmup_bars;
        let end = if self.config.is_inference {
            n
        } else {
            n - TARGET_HORIZON_BARS
        };
        if end <= start {
            return Err(EngineError::InsufficientData {
                required: start + TARGET_HORIZON_BARS + 1,
                provided: n,
            });
        }
        table.retain_rows(start, end)?;

        if self.config.drop_leak_columns {
            let dropped = table.drop_columns_with_suffix(&self.config.leak_suffixes);
            if !dropped.is_empty() {
                tracing::debug!(code = %symbol.code(), columns = ?dropped, "누수 의심 컬럼 제거");
            }
        }

        // 일일 예측 내보내기: 심볼별 최근 구간만 유지
        if let Some(keep) = self.config.keep_last_rows {
            table.tail_rows(keep);
        }

        tracing::debug!(code = %symbol.code(), rows = table.n_rows(), "심볼 처리 완료");
        Ok(table)
    }

    fn log_diagnostics(&self, table: &FeatureTable) {
        if let Some((zeros, ones, missing)) = table.binary_distribution("Current_Trend") {
            tracing::info!(zeros, ones, missing, "Current_Trend 분포");
        }
        if !self.config.is_inference {
            if let Some((zeros, ones, missing)) = table.binary_distribution("TARGET_3D") {
                tracing::info!(zeros, ones, missing, "TARGET_3D 분포");
            }
        }
        for (column, count) in table.missing_counts() {
            tracing::debug!(column = %column, count, "결측 잔존");
        }
    }
}

/// 전 구간 정의된 f64 배열을 결측 허용 컬럼으로 변환합니다.
fn defined(values: &[f64]) -> Vec<Option<f64>> {
    values.iter().copied().map(Some).collect()
}

/// binary 플래그를 0.0/1.0 컬럼으로 변환합니다.
fn bits(flags: &[Option<bool>]) -> Vec<Option<f64>> {
    flags
        .iter()
        .map(|flag| flag.map(|b| if b { 1.0 } else { 0.0 }))
        .collect()
}

/// 추세 필터 기준의 전체 출력 컬럼 순서를 생성합니다.
pub fn expected_columns(config: &EngineConfig) -> Vec<String> {
    let mut columns: Vec<String> = ["CODE", "DATE", "CLOSING_TL", "LOW_TL", "HIGH_TL", "VOL_Rel"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    for name in FILTER_NAMES {
        columns.push(name.to_string());
        columns.push(format!("{name}_Dist_Pct"));
        columns.push(format!("{name}_Slope_Rate"));
        columns.push(format!("{name}_PriceAbove"));
        for lag in &config.lag_days {
            columns.push(format!("{name}_Dist_Pct_Lag{lag}"));
            columns.push(format!("{name}_Slope_Rate_Lag{lag}"));
        }
    }

    columns.push("HHLL_Trend".to_string());
    for lag in &config.lag_days {
        columns.push(format!("HHLL_Trend_Lag{lag}"));
    }

    columns.push("Current_Trend".to_string());
    if !config.is_inference {
        columns.push("TARGET_3D".to_string());
    }

    if config.drop_leak_columns {
        columns.retain(|column| {
            !config
                .leak_suffixes
                .iter()
                .any(|suffix| column.ends_with(suffix.as_str()))
        });
    }
    columns
}
