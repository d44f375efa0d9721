//! 生產與停機記錄模型

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 停機類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoppageType {
    /// 計劃停機（如預防保養、換型）
    Planned,
    /// 非計劃停機（如設備故障、缺料）
    Unplanned,
}

/// 班次生產記錄
///
/// 一台機台在一個班次的產出。由外部協作者（持久層）提供，
/// 傳入引擎後視為不可變。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftRecord {
    /// 記錄ID
    pub id: Uuid,

    /// 機台ID
    pub machine_id: String,

    /// 生產日期
    pub date: NaiveDate,

    /// 班次標籤（來自配置的班次集合）
    pub shift: String,

    /// 實際運轉時間（分鐘，≥0）
    pub operative_time: Decimal,

    /// 總產量（件，≥0）
    pub total_production: Decimal,

    /// 不良品數量（件，0 ≤ defects ≤ total_production）
    pub defects: Decimal,

    /// 登錄人員（僅供追溯，引擎不解讀）
    pub recorded_by: Option<String>,
}

impl ShiftRecord {
    /// 創建新的班次生產記錄
    pub fn new(
        machine_id: String,
        date: NaiveDate,
        shift: String,
        operative_time: Decimal,
        total_production: Decimal,
        defects: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            machine_id,
            date,
            shift,
            operative_time,
            total_production,
            defects,
            recorded_by: None,
        }
    }

    /// 建構器模式：設置登錄人員
    pub fn with_recorded_by(mut self, recorded_by: String) -> Self {
        self.recorded_by = Some(recorded_by);
        self
    }

    /// 良品數量 = 總產量 − 不良品
    pub fn good_units(&self) -> Decimal {
        self.total_production - self.defects
    }

    /// 驗證記錄完整性
    ///
    /// 不良品超過總產量、或任何負值欄位，都代表上游資料完整性問題，
    /// 以 `InvalidRecord` 回報而非靜默鉗制。
    pub fn validate(&self) -> crate::Result<()> {
        if self.operative_time < Decimal::ZERO {
            return Err(crate::OeeError::InvalidRecord(format!(
                "機台 {} 於 {} 的運轉時間為負值: {}",
                self.machine_id, self.date, self.operative_time
            )));
        }
        if self.total_production < Decimal::ZERO {
            return Err(crate::OeeError::InvalidRecord(format!(
                "機台 {} 於 {} 的總產量為負值: {}",
                self.machine_id, self.date, self.total_production
            )));
        }
        if self.defects < Decimal::ZERO || self.defects > self.total_production {
            return Err(crate::OeeError::InvalidRecord(format!(
                "機台 {} 於 {} 的不良品數量超出範圍: {} (總產量 {})",
                self.machine_id, self.date, self.defects, self.total_production
            )));
        }
        Ok(())
    }
}

/// 停機記錄
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoppageRecord {
    /// 記錄ID
    pub id: Uuid,

    /// 機台ID
    pub machine_id: String,

    /// 停機日期
    pub date: NaiveDate,

    /// 停機原因（來自配置的原因集合的自由文字標籤）
    pub reason: String,

    /// 停機類型
    pub stoppage_type: StoppageType,

    /// 停機時長（分鐘，≥0）
    pub duration_minutes: Decimal,

    /// 備註
    pub observations: Option<String>,
}

impl StoppageRecord {
    /// 創建新的停機記錄
    pub fn new(
        machine_id: String,
        date: NaiveDate,
        reason: String,
        stoppage_type: StoppageType,
        duration_minutes: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            machine_id,
            date,
            reason,
            stoppage_type,
            duration_minutes,
            observations: None,
        }
    }

    /// 建構器模式：設置備註
    pub fn with_observations(mut self, observations: String) -> Self {
        self.observations = Some(observations);
        self
    }

    /// 檢查是否為計劃停機
    pub fn is_planned(&self) -> bool {
        self.stoppage_type == StoppageType::Planned
    }

    /// 驗證記錄完整性
    pub fn validate(&self) -> crate::Result<()> {
        if self.duration_minutes < Decimal::ZERO {
            return Err(crate::OeeError::InvalidRecord(format!(
                "機台 {} 於 {} 的停機時長為負值: {}",
                self.machine_id, self.date, self.duration_minutes
            )));
        }
        Ok(())
    }
}
