//! # OEE
//!
//! 廠區效率指標與經濟損失分析引擎的統一入口。
//! 資料模型見 [`oee_core`]，計算引擎見 [`oee_calc`]。

pub use oee_calc::{
    Aggregator, LossCalculator, LossCategory, LossShare, LossSummary, MachineRanking,
    MachineTotals, MetricCalculator, MetricSummary, OeeAnalyzer, OeeLevel, ParetoEntry,
    PlantReport, ProductionPoint, ProductionTotals, RankingBuilder, RecordFilter, TrendBuilder,
    TrendPoint,
};
pub use oee_core::{
    CostConfig, MachineSpec, OeeError, Result, ShiftRecord, StoppageRecord, StoppageType,
};
