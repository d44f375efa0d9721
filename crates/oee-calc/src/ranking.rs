//! 機台排行與停機柏拉圖
//!
//! 由聚合結果產出確定性排序的機台排行榜，以及依影響程度
//! 降冪排列的停機原因表。

use oee_core::{CostConfig, StoppageRecord};
use rayon::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::aggregate::{MachineTotals, RecordFilter};
use crate::loss::{LossCalculator, LossSummary};
use crate::metrics::{MetricCalculator, MetricSummary, OeeLevel};

/// 排行榜中的單一機台
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineRanking {
    /// 名次（1..N，無間斷、無重複）
    pub rank: usize,

    /// 機台ID
    pub machine_id: String,

    /// 機台名稱
    pub name: String,

    /// 所屬區域
    pub area: String,

    /// OEE 指標
    pub metrics: MetricSummary,

    /// 經濟損失
    pub losses: LossSummary,

    /// OEE 等級
    pub level: OeeLevel,

    /// 是否為危急機台（OEE 落在不佳區間）
    pub critical: bool,

    /// 總產量
    pub total_production: Decimal,
}

/// 柏拉圖中的單一停機原因
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParetoEntry {
    /// 停機原因
    pub reason: String,

    /// 累計停機時長（分鐘）
    pub total_minutes: Decimal,

    /// 停機事件次數
    pub event_count: usize,
}

/// 排行與柏拉圖建構器
pub struct RankingBuilder;

impl RankingBuilder {
    /// 建立機台排行榜
    ///
    /// 依 OEE 降冪排序，同分依總產量降冪，再同分依機台登錄順序
    /// （穩定排序保證）。名次為 1..N 的排列。逐機台的指標/損失
    /// 計算彼此獨立，以 rayon 平行展開。
    pub fn rank_machines(
        machine_totals: &[MachineTotals],
        config: &CostConfig,
    ) -> Vec<MachineRanking> {
        let mut rows: Vec<MachineRanking> = machine_totals
            .par_iter()
            .map(|mt| {
                let metrics = MetricCalculator::from_totals(&mt.totals);
                let losses = LossCalculator::from_totals(&mt.totals, config);
                let level = metrics.level();
                MachineRanking {
                    rank: 0, // 排序後回填
                    machine_id: mt.machine.id.clone(),
                    name: mt.machine.name.clone(),
                    area: mt.machine.area.clone(),
                    metrics,
                    losses,
                    critical: level.is_critical(),
                    level,
                    total_production: mt.totals.total_production,
                }
            })
            .collect();

        // 穩定排序：OEE 降冪 → 總產量降冪 → 登錄順序
        rows.sort_by(|a, b| {
            b.metrics
                .oee
                .cmp(&a.metrics.oee)
                .then(b.total_production.cmp(&a.total_production))
        });

        for (i, row) in rows.iter_mut().enumerate() {
            row.rank = i + 1;
        }

        rows
    }

    /// 建立停機原因柏拉圖
    ///
    /// 依原因分組加總停機時長，降冪排序，同分依原因字母序。
    /// 回傳完整排序；顯示層自行取前 K 項。
    pub fn stoppage_pareto(
        stoppages: &[StoppageRecord],
        filter: &RecordFilter,
    ) -> oee_core::Result<Vec<ParetoEntry>> {
        let mut grouped: HashMap<String, (Decimal, usize)> = HashMap::new();

        for record in stoppages.iter().filter(|r| filter.matches_stoppage(r)) {
            record.validate()?;
            let entry = grouped
                .entry(record.reason.clone())
                .or_insert((Decimal::ZERO, 0));
            entry.0 += record.duration_minutes;
            entry.1 += 1;
        }

        let mut entries: Vec<ParetoEntry> = grouped
            .into_iter()
            .map(|(reason, (total_minutes, event_count))| ParetoEntry {
                reason,
                total_minutes,
                event_count,
            })
            .collect();

        entries.sort_by(|a, b| {
            b.total_minutes
                .cmp(&a.total_minutes)
                .then_with(|| a.reason.cmp(&b.reason))
        });

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use oee_core::{MachineSpec, ShiftRecord, StoppageType};

    use crate::aggregate::Aggregator;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, day).unwrap()
    }

    fn spec(id: &str, speed: i64) -> MachineSpec {
        MachineSpec::new(id.to_string(), Decimal::from(speed), Decimal::from(480))
    }

    fn record(machine_id: &str, operative: i64, production: i64, defects: i64) -> ShiftRecord {
        ShiftRecord::new(
            machine_id.to_string(),
            date(1),
            "MORNING".to_string(),
            Decimal::from(operative),
            Decimal::from(production),
            Decimal::from(defects),
        )
    }

    fn stop(machine_id: &str, reason: &str, minutes: i64) -> StoppageRecord {
        StoppageRecord::new(
            machine_id.to_string(),
            date(1),
            reason.to_string(),
            StoppageType::Unplanned,
            Decimal::from(minutes),
        )
    }

    #[test]
    fn test_ranking_order_and_ranks() {
        let aggregator = Aggregator::new(vec![
            spec("POOR", 8),
            spec("GOOD", 8),
            spec("IDLE", 8),
        ]);
        let shifts = vec![
            record("POOR", 240, 1000, 200), // 低可用率、低良率
            record("GOOD", 432, 2880, 58),  // OEE ≈ 0.73
        ];

        let totals = aggregator
            .per_machine(&shifts, &[], &RecordFilter::new())
            .unwrap();
        let ranking = RankingBuilder::rank_machines(&totals, &CostConfig::default());

        assert_eq!(ranking.len(), 3);
        assert_eq!(ranking[0].machine_id, "GOOD");
        assert_eq!(ranking[1].machine_id, "POOR");
        // 空窗口的機台指標全零，確定性地排在最後
        assert_eq!(ranking[2].machine_id, "IDLE");
        assert_eq!(ranking[2].metrics.oee, Decimal::ZERO);

        // 名次是 1..N 的排列
        let ranks: Vec<usize> = ranking.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn test_ranking_tie_breaks() {
        // 兩台機台指標完全相同 → 依總產量降冪；再同分依登錄順序
        let aggregator = Aggregator::new(vec![
            spec("M-1", 8),
            spec("M-2", 8),
            spec("M-3", 8),
        ]);
        let shifts = vec![
            record("M-1", 0, 0, 0),
            record("M-2", 0, 0, 0),
            record("M-3", 0, 0, 0),
        ];

        let totals = aggregator
            .per_machine(&shifts, &[], &RecordFilter::new())
            .unwrap();
        let ranking = RankingBuilder::rank_machines(&totals, &CostConfig::default());

        // 全部 OEE = 0、產量 = 0 → 保持登錄順序
        let ids: Vec<&str> = ranking.iter().map(|r| r.machine_id.as_str()).collect();
        assert_eq!(ids, vec!["M-1", "M-2", "M-3"]);
    }

    #[test]
    fn test_critical_flag_follows_poor_band() {
        let aggregator = Aggregator::new(vec![spec("POOR", 8), spec("GOOD", 8)]);
        let shifts = vec![
            record("POOR", 240, 1000, 200),
            record("GOOD", 432, 2880, 58),
        ];

        let totals = aggregator
            .per_machine(&shifts, &[], &RecordFilter::new())
            .unwrap();
        let ranking = RankingBuilder::rank_machines(&totals, &CostConfig::default());

        let poor = ranking.iter().find(|r| r.machine_id == "POOR").unwrap();
        let good = ranking.iter().find(|r| r.machine_id == "GOOD").unwrap();
        assert!(poor.critical);
        assert_eq!(poor.level, OeeLevel::Poor);
        assert!(!good.critical);
    }

    #[test]
    fn test_pareto_ordering() {
        let stops = vec![
            stop("LINE-A", "Changeover", 30),
            stop("LINE-A", "Mechanical failure", 50),
            stop("CNC-01", "Changeover", 40),
            stop("CNC-01", "Material shortage", 70),
        ];

        let pareto = RankingBuilder::stoppage_pareto(&stops, &RecordFilter::new()).unwrap();

        assert_eq!(pareto.len(), 3);
        // 換型 70 分鐘與缺料 70 分鐘同分 → 字母序 Changeover 在前
        assert_eq!(pareto[0].reason, "Changeover");
        assert_eq!(pareto[0].total_minutes, Decimal::from(70));
        assert_eq!(pareto[0].event_count, 2);
        assert_eq!(pareto[1].reason, "Material shortage");
        assert_eq!(pareto[2].reason, "Mechanical failure");
    }

    #[test]
    fn test_pareto_respects_filter() {
        let stops = vec![
            stop("LINE-A", "Changeover", 30),
            stop("CNC-01", "Changeover", 40),
        ];

        let filter = RecordFilter::new().with_machine_id("LINE-A".to_string());
        let pareto = RankingBuilder::stoppage_pareto(&stops, &filter).unwrap();

        assert_eq!(pareto.len(), 1);
        assert_eq!(pareto[0].total_minutes, Decimal::from(30));
    }

    #[test]
    fn test_pareto_rejects_negative_duration() {
        let stops = vec![stop("LINE-A", "Changeover", -5)];

        let err = RankingBuilder::stoppage_pareto(&stops, &RecordFilter::new()).unwrap_err();
        assert!(matches!(err, oee_core::OeeError::InvalidRecord(_)));
    }
}
