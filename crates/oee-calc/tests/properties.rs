//! 屬性測試
//!
//! 覆蓋比率界限、OEE 乘積恆等式、損失單調性、
//! 柏拉圖排序與排行榜排列性質。

use chrono::NaiveDate;
use oee_calc::{
    Aggregator, LossCalculator, MetricCalculator, RankingBuilder, RecordFilter,
};
use oee_core::{CostConfig, MachineSpec, ShiftRecord, StoppageRecord, StoppageType};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, day).unwrap()
}

proptest! {
    #[test]
    fn metrics_are_bounded_ratios(
        operative in 0i64..2000,
        planned in 0i64..2000,
        production in 0i64..50_000,
        defect_pct in 0i64..=100,
        speed in 0i64..200,
    ) {
        let production = Decimal::from(production);
        let defects = production * Decimal::from(defect_pct) / Decimal::from(100);

        let result = MetricCalculator::compute(
            Decimal::from(operative),
            Decimal::from(planned),
            production,
            defects,
            Decimal::from(speed),
        );

        for ratio in [result.availability, result.performance, result.quality, result.oee] {
            prop_assert!(ratio >= Decimal::ZERO);
            prop_assert!(ratio <= Decimal::ONE);
        }
    }

    #[test]
    fn oee_is_exact_product_of_factors(
        operative in 1i64..2000,
        planned in 1i64..2000,
        production in 1i64..50_000,
        speed in 1i64..200,
    ) {
        let result = MetricCalculator::compute(
            Decimal::from(operative),
            Decimal::from(planned),
            Decimal::from(production),
            Decimal::ZERO,
            Decimal::from(speed),
        );

        prop_assert_eq!(
            result.oee,
            result.availability * result.performance * result.quality
        );
    }

    #[test]
    fn zero_operative_time_zeroes_availability_and_oee(
        planned in 0i64..2000,
        production in 0i64..50_000,
        speed in 0i64..200,
    ) {
        let result = MetricCalculator::compute(
            Decimal::ZERO,
            Decimal::from(planned),
            Decimal::from(production),
            Decimal::ZERO,
            Decimal::from(speed),
        );

        prop_assert_eq!(result.availability, Decimal::ZERO);
        prop_assert_eq!(result.oee, Decimal::ZERO);
    }

    #[test]
    fn zero_planned_time_zeroes_availability(
        operative in 0i64..2000,
        production in 0i64..50_000,
        speed in 0i64..200,
    ) {
        let result = MetricCalculator::compute(
            Decimal::from(operative),
            Decimal::ZERO,
            Decimal::from(production),
            Decimal::ZERO,
            Decimal::from(speed),
        );

        prop_assert_eq!(result.availability, Decimal::ZERO);
    }

    #[test]
    fn total_loss_is_monotonic_in_stoppage_and_defects(
        stop in 0i64..1000,
        stop_delta in 0i64..500,
        defects in 0i64..1000,
        defect_delta in 0i64..500,
        production in 0i64..5000,
    ) {
        let config = CostConfig::default();
        let planned = Decimal::from(480);
        let speed = Decimal::from(8);

        let base = LossCalculator::compute(
            Decimal::from(stop),
            Decimal::from(defects),
            Decimal::from(production),
            planned,
            speed,
            &config,
        );
        let more = LossCalculator::compute(
            Decimal::from(stop + stop_delta),
            Decimal::from(defects + defect_delta),
            Decimal::from(production),
            planned,
            speed,
            &config,
        );

        prop_assert!(more.total_loss >= base.total_loss);
    }

    #[test]
    fn total_loss_never_decreases_as_production_gap_widens(
        production in 0i64..5000,
        gap_delta in 0i64..2000,
    ) {
        let config = CostConfig::default();
        let planned = Decimal::from(480);
        let speed = Decimal::from(8);

        let base = LossCalculator::compute(
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::from(production + gap_delta),
            planned,
            speed,
            &config,
        );
        let wider_gap = LossCalculator::compute(
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::from(production),
            planned,
            speed,
            &config,
        );

        prop_assert!(wider_gap.total_loss >= base.total_loss);
    }

    #[test]
    fn pareto_is_sorted_with_deterministic_ties(
        durations in prop::collection::vec((0u8..6, 1i64..300), 1..40),
    ) {
        let reasons = [
            "Changeover",
            "Electrical failure",
            "Material shortage",
            "Mechanical failure",
            "Operator absent",
            "Quality issue",
        ];
        let stoppages: Vec<StoppageRecord> = durations
            .iter()
            .map(|&(idx, minutes)| {
                StoppageRecord::new(
                    "LINE-A".to_string(),
                    date(1),
                    reasons[idx as usize].to_string(),
                    StoppageType::Unplanned,
                    Decimal::from(minutes),
                )
            })
            .collect();

        let pareto = RankingBuilder::stoppage_pareto(&stoppages, &RecordFilter::new()).unwrap();

        for pair in pareto.windows(2) {
            prop_assert!(
                pair[0].total_minutes > pair[1].total_minutes
                    || (pair[0].total_minutes == pair[1].total_minutes
                        && pair[0].reason < pair[1].reason)
            );
        }
    }

    #[test]
    fn ranks_are_gapless_permutation_ordered_by_oee(
        outputs in prop::collection::vec((0i64..500, 0i64..4000), 1..8),
    ) {
        let machines: Vec<MachineSpec> = (0..outputs.len())
            .map(|i| {
                MachineSpec::new(format!("M-{i}"), Decimal::from(8), Decimal::from(480))
            })
            .collect();
        let shifts: Vec<ShiftRecord> = outputs
            .iter()
            .enumerate()
            .map(|(i, &(operative, production))| {
                ShiftRecord::new(
                    format!("M-{i}"),
                    date(1),
                    "MORNING".to_string(),
                    Decimal::from(operative),
                    Decimal::from(production),
                    Decimal::ZERO,
                )
            })
            .collect();

        let aggregator = Aggregator::new(machines);
        let totals = aggregator
            .per_machine(&shifts, &[], &RecordFilter::new())
            .unwrap();
        let ranking = RankingBuilder::rank_machines(&totals, &CostConfig::default());

        // 名次是 1..N 的無間斷排列
        let mut ranks: Vec<usize> = ranking.iter().map(|r| r.rank).collect();
        ranks.sort_unstable();
        prop_assert_eq!(ranks, (1..=ranking.len()).collect::<Vec<_>>());

        // OEE 嚴格遞減蘊涵名次遞增
        for pair in ranking.windows(2) {
            prop_assert!(pair[0].metrics.oee >= pair[1].metrics.oee);
            prop_assert!(pair[0].rank < pair[1].rank);
        }
    }
}
