//! 機台規格模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 機台產能規格
///
/// 靜態產能參考值，用於把實際產量換算成比率。
/// `ideal_speed` 與 `planned_time` 必須大於零，比率計算才有意義；
/// 零值不會造成錯誤，只會得到零值的計算結果。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineSpec {
    /// 機台ID
    pub id: String,

    /// 機台名稱
    pub name: String,

    /// 所屬區域（如：生產、塗裝、機加工）
    pub area: String,

    /// 理想速度（件/分鐘）
    pub ideal_speed: Decimal,

    /// 每班計劃時間（分鐘）
    pub planned_time: Decimal,
}

impl MachineSpec {
    /// 創建新的機台規格
    pub fn new(id: String, ideal_speed: Decimal, planned_time: Decimal) -> Self {
        Self {
            name: id.clone(),
            id,
            area: String::new(),
            ideal_speed,
            planned_time,
        }
    }

    /// 建構器模式：設置機台名稱
    pub fn with_name(mut self, name: String) -> Self {
        self.name = name;
        self
    }

    /// 建構器模式：設置所屬區域
    pub fn with_area(mut self, area: String) -> Self {
        self.area = area;
        self
    }

    /// 每班理想產量 = 理想速度 × 計劃時間
    pub fn ideal_shift_output(&self) -> Decimal {
        self.ideal_speed * self.planned_time
    }
}
