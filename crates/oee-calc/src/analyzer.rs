//! 全廠分析器
//!
//! 組合聚合器、指標/損失計算器與排行/趨勢建構器，
//! 一次產出儀表板所需的完整報告。

use oee_core::{CostConfig, MachineSpec, ShiftRecord, StoppageRecord};

use crate::aggregate::{Aggregator, RecordFilter};
use crate::loss::LossCalculator;
use crate::metrics::MetricCalculator;
use crate::ranking::RankingBuilder;
use crate::trend::TrendBuilder;
use crate::PlantReport;

/// 全廠 OEE 分析器
///
/// 無狀態、無副作用：每次呼叫都是對輸入快照的純折疊，
/// 多個分析可對相同或不同的快照平行執行而無需協調。
pub struct OeeAnalyzer {
    /// 記錄聚合器（持有機台規格表）
    aggregator: Aggregator,

    /// 成本與目標配置
    config: CostConfig,
}

impl OeeAnalyzer {
    /// 創建新的分析器
    pub fn new(machines: Vec<MachineSpec>, config: CostConfig) -> Self {
        Self {
            aggregator: Aggregator::new(machines),
            config,
        }
    }

    /// 主分析入口
    pub fn analyze(
        &self,
        shift_records: &[ShiftRecord],
        stoppages: &[StoppageRecord],
        filter: &RecordFilter,
    ) -> oee_core::Result<PlantReport> {
        tracing::info!(
            "開始全廠分析：生產記錄 {} 筆，停機記錄 {} 筆，機台 {} 台",
            shift_records.len(),
            stoppages.len(),
            self.aggregator.machines().len()
        );

        let start_time = std::time::Instant::now();

        // Step 1: 逐機台聚合與排行
        tracing::debug!("Step 1: 逐機台聚合");
        let machine_totals = self.aggregator.per_machine(shift_records, stoppages, filter)?;
        let ranking = RankingBuilder::rank_machines(&machine_totals, &self.config);
        let critical_machines = ranking.iter().filter(|r| r.critical).count();

        // Step 2: 全廠指標與損失
        tracing::debug!("Step 2: 全廠指標與損失");
        let global = self.aggregator.global(shift_records, stoppages, filter)?;
        let metrics = MetricCalculator::from_totals(&global);
        let losses = LossCalculator::from_totals(&global, &self.config);
        let loss_distribution = LossCalculator::distribution(&losses);

        // Step 3: 逐日趨勢
        tracing::debug!("Step 3: 逐日趨勢");
        let days = self.aggregator.per_day(shift_records, stoppages, filter)?;
        let trend = TrendBuilder::oee_series(&days);
        let production_trend = TrendBuilder::production_series(&days);

        // Step 4: 停機柏拉圖
        tracing::debug!("Step 4: 停機柏拉圖");
        let stop_pareto = RankingBuilder::stoppage_pareto(stoppages, filter)?;

        let report = PlantReport {
            metrics,
            losses,
            loss_distribution,
            trend,
            production_trend,
            stop_pareto,
            total_machines: self.aggregator.machines().len(),
            critical_machines,
            ranking,
            calculation_time_ms: Some(start_time.elapsed().as_millis()),
        };

        tracing::info!("全廠分析完成，耗時 {:?}", start_time.elapsed());
        tracing::info!(
            "OEE {:.4}，危急機台 {}/{}",
            report.metrics.oee,
            report.critical_machines,
            report.total_machines
        );

        Ok(report)
    }

    /// 獲取成本配置引用
    pub fn config(&self) -> &CostConfig {
        &self.config
    }

    /// 獲取聚合器引用
    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }
}
