//! OEE 指標計算
//!
//! 由單一班次（或聚合後）的原始計數計算可用率、效率、
//! 良率與 OEE。所有比率鉗制在 [0,1]，退化輸入（零產能、
//! 零產量）得到零值結果而非錯誤。

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::aggregate::ProductionTotals;

/// OEE 指標計算結果，四個比率均在 [0,1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    /// 可用率 = 運轉時間 / 計劃時間
    pub availability: Decimal,
    /// 效率 = 總產量 / 理想產量
    pub performance: Decimal,
    /// 良率 = 良品數 / 總產量
    pub quality: Decimal,
    /// OEE = 可用率 × 效率 × 良率
    pub oee: Decimal,
}

impl MetricSummary {
    /// 全零結果（空窗口、閒置機台的正常狀態）
    pub fn zero() -> Self {
        Self {
            availability: Decimal::ZERO,
            performance: Decimal::ZERO,
            quality: Decimal::ZERO,
            oee: Decimal::ZERO,
        }
    }

    /// OEE 等級分類
    pub fn level(&self) -> OeeLevel {
        OeeLevel::from_oee(self.oee)
    }
}

/// OEE 等級
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OeeLevel {
    /// 優秀（OEE ≥ 0.85）
    Excellent,
    /// 良好（OEE ≥ 0.70）
    Good,
    /// 可接受（OEE ≥ 0.50）
    Acceptable,
    /// 不佳（OEE < 0.50）
    Poor,
}

impl OeeLevel {
    /// 依固定閾值分類 OEE 值
    pub fn from_oee(oee: Decimal) -> Self {
        if oee >= Decimal::new(85, 2) {
            OeeLevel::Excellent
        } else if oee >= Decimal::new(70, 2) {
            OeeLevel::Good
        } else if oee >= Decimal::new(50, 2) {
            OeeLevel::Acceptable
        } else {
            OeeLevel::Poor
        }
    }

    /// 對應的顯示顏色
    pub fn color(&self) -> &'static str {
        match self {
            OeeLevel::Excellent => "#00ff9d",
            OeeLevel::Good => "#00d4ff",
            OeeLevel::Acceptable => "#ffb800",
            OeeLevel::Poor => "#ff4757",
        }
    }

    /// 不佳等級視為危急機台
    pub fn is_critical(&self) -> bool {
        *self == OeeLevel::Poor
    }
}

/// 比率鉗制到 [0,1]
fn clamp_ratio(value: Decimal) -> Decimal {
    value.min(Decimal::ONE).max(Decimal::ZERO)
}

/// OEE 指標計算器
pub struct MetricCalculator;

impl MetricCalculator {
    /// 計算 OEE 三因子與 OEE
    ///
    /// # 參數
    /// * `operative_time` - 實際運轉時間（分鐘）
    /// * `planned_time` - 計劃生產時間（分鐘）
    /// * `total_production` - 總產量（件）
    /// * `defects` - 不良品數量（件）
    /// * `ideal_speed` - 理想速度（件/分鐘）
    ///
    /// 全函數：計劃時間、理想產量或總產量為零時，對應因子為 0，
    /// 不會產生除零錯誤。超出理想產能的效率鉗制在 1。
    pub fn compute(
        operative_time: Decimal,
        planned_time: Decimal,
        total_production: Decimal,
        defects: Decimal,
        ideal_speed: Decimal,
    ) -> MetricSummary {
        // 可用率 = 運轉時間 / 計劃時間
        let availability = if planned_time > Decimal::ZERO {
            clamp_ratio(operative_time / planned_time)
        } else {
            Decimal::ZERO
        };

        // 理想產量 = 理想速度 × 運轉時間
        let ideal_production = ideal_speed * operative_time;

        // 效率 = 總產量 / 理想產量
        let performance = if ideal_production > Decimal::ZERO {
            clamp_ratio(total_production / ideal_production)
        } else {
            Decimal::ZERO
        };

        // 良率 = 良品數 / 總產量
        let good_units = total_production - defects;
        let quality = if total_production > Decimal::ZERO {
            clamp_ratio(good_units / total_production)
        } else {
            Decimal::ZERO
        };

        // OEE = 可用率 × 效率 × 良率
        let oee = availability * performance * quality;

        MetricSummary {
            availability,
            performance,
            quality,
            oee,
        }
    }

    /// 由聚合總計計算指標
    ///
    /// 效率以逐筆累計的理想產量（Σ 理想速度 × 運轉時間）為分母，
    /// 跨機台聚合時不需退回平均速度的近似。
    pub fn from_totals(totals: &ProductionTotals) -> MetricSummary {
        let availability = if totals.planned_time > Decimal::ZERO {
            clamp_ratio(totals.operative_time / totals.planned_time)
        } else {
            Decimal::ZERO
        };

        let performance = if totals.ideal_production > Decimal::ZERO {
            clamp_ratio(totals.total_production / totals.ideal_production)
        } else {
            Decimal::ZERO
        };

        let good_units = totals.total_production - totals.defects;
        let quality = if totals.total_production > Decimal::ZERO {
            clamp_ratio(good_units / totals.total_production)
        } else {
            Decimal::ZERO
        };

        let oee = availability * performance * quality;

        MetricSummary {
            availability,
            performance,
            quality,
            oee,
        }
    }
}
