//! # OEE Calculation Engine
//!
//! OEE 與經濟損失分析引擎

pub mod aggregate;
pub mod analyzer;
pub mod loss;
pub mod metrics;
pub mod ranking;
pub mod trend;

// Re-export 主要類型
pub use aggregate::{Aggregator, MachineTotals, ProductionTotals, RecordFilter};
pub use analyzer::OeeAnalyzer;
pub use loss::{LossCalculator, LossCategory, LossShare, LossSummary};
pub use metrics::{MetricCalculator, MetricSummary, OeeLevel};
pub use ranking::{MachineRanking, ParetoEntry, RankingBuilder};
pub use trend::{ProductionPoint, TrendBuilder, TrendPoint};

use serde::{Deserialize, Serialize};

/// 全廠分析報告
///
/// 所有欄位皆為純結構化值，不含任何格式化字串；
/// 百分比/貨幣格式化屬於顯示層的責任。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlantReport {
    /// 全廠 OEE 指標
    pub metrics: MetricSummary,

    /// 全廠經濟損失
    pub losses: LossSummary,

    /// 損失分布（三類損失的金額與占比）
    pub loss_distribution: Vec<LossShare>,

    /// 逐日 OEE 趨勢（日期升冪，稀疏）
    pub trend: Vec<TrendPoint>,

    /// 逐日產量趨勢（日期升冪，稀疏）
    pub production_trend: Vec<ProductionPoint>,

    /// 停機原因柏拉圖（完整排序，顯示層取前 K 項）
    pub stop_pareto: Vec<ParetoEntry>,

    /// 機台排行榜
    pub ranking: Vec<MachineRanking>,

    /// 機台總數
    pub total_machines: usize,

    /// 危急機台數（OEE 落在不佳區間）
    pub critical_machines: usize,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,
}

impl PlantReport {
    /// 取前 K 項停機原因
    pub fn top_stop_reasons(&self, k: usize) -> &[ParetoEntry] {
        &self.stop_pareto[..self.stop_pareto.len().min(k)]
    }
}
