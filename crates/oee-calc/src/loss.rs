//! 經濟損失計算
//!
//! 由停機、產量缺口與不良品推導金額損失，
//! 以及達成 OEE 目標可回收的潛在收益。

use oee_core::CostConfig;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::aggregate::ProductionTotals;

/// 經濟損失計算結果，金額均 ≥ 0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LossSummary {
    /// 停機損失
    pub stoppage_loss: Decimal,
    /// 低產量損失
    pub production_loss: Decimal,
    /// 不良品損失
    pub defect_loss: Decimal,
    /// 總損失
    pub total_loss: Decimal,
    /// 達成 OEE 目標的潛在收益
    pub potential_gain: Decimal,
}

impl LossSummary {
    /// 全零結果
    pub fn zero() -> Self {
        Self {
            stoppage_loss: Decimal::ZERO,
            production_loss: Decimal::ZERO,
            defect_loss: Decimal::ZERO,
            total_loss: Decimal::ZERO,
            potential_gain: Decimal::ZERO,
        }
    }
}

/// 損失類別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossCategory {
    /// 停機
    Stoppage,
    /// 低產量
    Production,
    /// 不良品
    Defect,
}

/// 單一損失類別的金額與占比
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LossShare {
    /// 損失類別
    pub category: LossCategory,
    /// 金額
    pub amount: Decimal,
    /// 占總損失比率（0–1，總損失為零時為 0）
    pub share: Decimal,
}

/// 經濟損失計算器
pub struct LossCalculator;

impl LossCalculator {
    /// 計算經濟損失
    ///
    /// # 參數
    /// * `stop_duration` - 停機總時長（分鐘）
    /// * `defects` - 不良品數量（件）
    /// * `total_production` - 實際總產量（件）
    /// * `planned_time` - 計劃生產時間（分鐘）
    /// * `ideal_speed` - 理想速度（件/分鐘）
    /// * `config` - 成本參數與 OEE 目標
    ///
    /// 低產量損失以「計劃時間」的滿載產能為基準（衡量與滿產能
    /// 潛力的差距，而非與實際運轉時間的差距）。全函數，無錯誤分支。
    pub fn compute(
        stop_duration: Decimal,
        defects: Decimal,
        total_production: Decimal,
        planned_time: Decimal,
        ideal_speed: Decimal,
        config: &CostConfig,
    ) -> LossSummary {
        let ideal_production = ideal_speed * planned_time;
        Self::compute_against_capacity(
            stop_duration,
            defects,
            total_production,
            ideal_production,
            config,
        )
    }

    /// 由聚合總計計算損失
    ///
    /// 滿載產能取自逐筆累計的 Σ 理想速度 × 計劃時間。
    pub fn from_totals(totals: &ProductionTotals, config: &CostConfig) -> LossSummary {
        Self::compute_against_capacity(
            totals.stop_minutes,
            totals.defects,
            totals.total_production,
            totals.ideal_capacity,
            config,
        )
    }

    fn compute_against_capacity(
        stop_duration: Decimal,
        defects: Decimal,
        total_production: Decimal,
        ideal_production: Decimal,
        config: &CostConfig,
    ) -> LossSummary {
        // 停機損失
        let stoppage_loss = stop_duration * config.stop_cost_per_min;

        // 低產量損失（與滿載產能的差距）
        let lost_production = (ideal_production - total_production).max(Decimal::ZERO);
        let production_loss = lost_production * config.production_value_per_unit;

        // 不良品損失
        let defect_loss = defects * config.defect_cost_per_unit;

        let total_loss = stoppage_loss + production_loss + defect_loss;

        // 潛在收益：良品數與目標產量之間的缺口
        let target_production = ideal_production * config.oee_goal;
        let good_units = total_production - defects;
        let potential_gain =
            (target_production - good_units).max(Decimal::ZERO) * config.production_value_per_unit;

        LossSummary {
            stoppage_loss,
            production_loss,
            defect_loss,
            total_loss,
            potential_gain,
        }
    }

    /// 損失分布：三類損失的金額與占比
    ///
    /// 總損失為零時占比為 0，避免除零。
    pub fn distribution(summary: &LossSummary) -> Vec<LossShare> {
        let share_of = |amount: Decimal| {
            if summary.total_loss > Decimal::ZERO {
                amount / summary.total_loss
            } else {
                Decimal::ZERO
            }
        };

        vec![
            LossShare {
                category: LossCategory::Stoppage,
                amount: summary.stoppage_loss,
                share: share_of(summary.stoppage_loss),
            },
            LossShare {
                category: LossCategory::Production,
                amount: summary.production_loss,
                share: share_of(summary.production_loss),
            },
            LossShare {
                category: LossCategory::Defect,
                amount: summary.defect_loss,
                share: share_of(summary.defect_loss),
            },
        ]
    }
}
