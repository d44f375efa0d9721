//! 成本與目標配置模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 全域經濟參數配置
///
/// 以顯式值傳入每一次損失計算，不使用全域單例狀態。
/// 班次標籤與停機原因只作為上游過濾/驗證用的列舉集合，
/// 引擎本身不解讀其內容。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostConfig {
    /// 每分鐘停機成本
    pub stop_cost_per_min: Decimal,

    /// 每件不良品成本
    pub defect_cost_per_unit: Decimal,

    /// 每件產品價值
    pub production_value_per_unit: Decimal,

    /// OEE 目標（0–1）
    pub oee_goal: Decimal,

    /// 有效班次標籤
    pub shift_labels: Vec<String>,

    /// 有效停機原因
    pub stop_reasons: Vec<String>,
}

impl CostConfig {
    /// 創建新的成本配置
    pub fn new(
        stop_cost_per_min: Decimal,
        defect_cost_per_unit: Decimal,
        production_value_per_unit: Decimal,
        oee_goal: Decimal,
    ) -> Self {
        Self {
            stop_cost_per_min,
            defect_cost_per_unit,
            production_value_per_unit,
            oee_goal,
            shift_labels: Vec::new(),
            stop_reasons: Vec::new(),
        }
    }

    /// 建構器模式：設置班次標籤
    pub fn with_shift_labels(mut self, shift_labels: Vec<String>) -> Self {
        self.shift_labels = shift_labels;
        self
    }

    /// 建構器模式：設置停機原因
    pub fn with_stop_reasons(mut self, stop_reasons: Vec<String>) -> Self {
        self.stop_reasons = stop_reasons;
        self
    }

    /// 建構器模式：設置 OEE 目標
    pub fn with_oee_goal(mut self, oee_goal: Decimal) -> Self {
        self.oee_goal = oee_goal;
        self
    }

    /// 檢查班次標籤是否有效
    pub fn is_known_shift(&self, shift: &str) -> bool {
        self.shift_labels.iter().any(|s| s == shift)
    }

    /// 檢查停機原因是否有效
    pub fn is_known_reason(&self, reason: &str) -> bool {
        self.stop_reasons.iter().any(|r| r == reason)
    }
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            stop_cost_per_min: Decimal::from(50),
            defect_cost_per_unit: Decimal::from(15),
            production_value_per_unit: Decimal::from(25),
            oee_goal: Decimal::new(85, 2), // 0.85
            shift_labels: vec![
                "MORNING".to_string(),
                "AFTERNOON".to_string(),
                "NIGHT".to_string(),
            ],
            stop_reasons: vec![
                "Mechanical failure".to_string(),
                "Electrical failure".to_string(),
                "Material shortage".to_string(),
                "Changeover".to_string(),
                "Preventive maintenance".to_string(),
                "Operator absent".to_string(),
                "Quality issue".to_string(),
                "Other".to_string(),
            ],
        }
    }
}
