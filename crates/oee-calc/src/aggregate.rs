//! 記錄聚合
//!
//! 把生產/停機記錄序列（可選依機台、班次、日期範圍過濾）
//! 折疊成指標與損失計算所需的分組總計。

use chrono::NaiveDate;
use oee_core::{MachineSpec, OeeError, ShiftRecord, StoppageRecord};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// 記錄過濾條件
///
/// 缺席的條件代表「不設限」而非「空集合」。日期上下界各自獨立
/// 生效且為閉區間；班次條件只作用於生產記錄。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordFilter {
    /// 機台ID
    pub machine_id: Option<String>,

    /// 班次標籤
    pub shift: Option<String>,

    /// 起始日期（含）
    pub from: Option<NaiveDate>,

    /// 結束日期（含）
    pub to: Option<NaiveDate>,
}

impl RecordFilter {
    /// 創建無約束的過濾條件
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：設置機台
    pub fn with_machine_id(mut self, machine_id: String) -> Self {
        self.machine_id = Some(machine_id);
        self
    }

    /// 建構器模式：設置班次
    pub fn with_shift(mut self, shift: String) -> Self {
        self.shift = Some(shift);
        self
    }

    /// 建構器模式：設置日期範圍（含兩端）
    pub fn with_date_range(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    /// 建構器模式：設置起始日期
    pub fn with_from(mut self, from: NaiveDate) -> Self {
        self.from = Some(from);
        self
    }

    /// 建構器模式：設置結束日期
    pub fn with_to(mut self, to: NaiveDate) -> Self {
        self.to = Some(to);
        self
    }

    fn date_in_range(&self, date: NaiveDate) -> bool {
        if let Some(from) = self.from {
            if date < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if date > to {
                return false;
            }
        }
        true
    }

    /// 檢查生產記錄是否符合條件
    pub fn matches_shift_record(&self, record: &ShiftRecord) -> bool {
        if let Some(machine_id) = &self.machine_id {
            if &record.machine_id != machine_id {
                return false;
            }
        }
        if let Some(shift) = &self.shift {
            if &record.shift != shift {
                return false;
            }
        }
        self.date_in_range(record.date)
    }

    /// 檢查停機記錄是否符合條件（班次條件不適用）
    pub fn matches_stoppage(&self, record: &StoppageRecord) -> bool {
        if let Some(machine_id) = &self.machine_id {
            if &record.machine_id != machine_id {
                return false;
            }
        }
        self.date_in_range(record.date)
    }
}

/// 分組聚合總計
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProductionTotals {
    /// 運轉時間總計（分鐘）
    pub operative_time: Decimal,

    /// 計劃時間總計（分鐘）：每筆生產記錄累計一份完整的
    /// 機台計劃時間配額（每班一份，而非每日一份）
    pub planned_time: Decimal,

    /// 總產量
    pub total_production: Decimal,

    /// 不良品總計
    pub defects: Decimal,

    /// 停機時長總計（分鐘）
    pub stop_minutes: Decimal,

    /// 理想產量總計 = Σ 理想速度 × 運轉時間（效率分母）
    pub ideal_production: Decimal,

    /// 滿載產能總計 = Σ 理想速度 × 計劃時間（損失基準）
    pub ideal_capacity: Decimal,

    /// 生產記錄筆數
    pub record_count: usize,
}

impl ProductionTotals {
    /// 全零總計
    pub fn zero() -> Self {
        Self {
            operative_time: Decimal::ZERO,
            planned_time: Decimal::ZERO,
            total_production: Decimal::ZERO,
            defects: Decimal::ZERO,
            stop_minutes: Decimal::ZERO,
            ideal_production: Decimal::ZERO,
            ideal_capacity: Decimal::ZERO,
            record_count: 0,
        }
    }

    /// 累計一筆生產記錄
    pub fn add_shift(&mut self, record: &ShiftRecord, spec: &MachineSpec) {
        self.operative_time += record.operative_time;
        self.planned_time += spec.planned_time;
        self.total_production += record.total_production;
        self.defects += record.defects;
        self.ideal_production += spec.ideal_speed * record.operative_time;
        self.ideal_capacity += spec.ideal_speed * spec.planned_time;
        self.record_count += 1;
    }

    /// 累計一筆停機記錄
    pub fn add_stoppage(&mut self, record: &StoppageRecord) {
        self.stop_minutes += record.duration_minutes;
    }

    /// 合併另一組總計
    pub fn merge(&mut self, other: &ProductionTotals) {
        self.operative_time += other.operative_time;
        self.planned_time += other.planned_time;
        self.total_production += other.total_production;
        self.defects += other.defects;
        self.stop_minutes += other.stop_minutes;
        self.ideal_production += other.ideal_production;
        self.ideal_capacity += other.ideal_capacity;
        self.record_count += other.record_count;
    }
}

/// 單機台聚合結果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineTotals {
    /// 機台規格
    pub machine: MachineSpec,

    /// 聚合總計
    pub totals: ProductionTotals,
}

/// 記錄聚合器
///
/// 持有機台規格表；機台的登錄順序即排行榜的最終決勝順序。
#[derive(Debug, Clone)]
pub struct Aggregator {
    machines: Vec<MachineSpec>,
    index: HashMap<String, usize>,
}

impl Aggregator {
    /// 創建新的聚合器
    pub fn new(machines: Vec<MachineSpec>) -> Self {
        let index = machines
            .iter()
            .enumerate()
            .map(|(i, m)| (m.id.clone(), i))
            .collect();
        Self { machines, index }
    }

    /// 獲取機台規格列表（登錄順序）
    pub fn machines(&self) -> &[MachineSpec] {
        &self.machines
    }

    /// 依機台ID查找規格
    pub fn spec_for(&self, machine_id: &str) -> oee_core::Result<&MachineSpec> {
        self.index
            .get(machine_id)
            .map(|&i| &self.machines[i])
            .ok_or_else(|| OeeError::MachineNotFound(machine_id.to_string()))
    }

    /// 逐機台聚合
    ///
    /// 回傳登錄順序的列表；沒有符合記錄的機台以零值總計保留
    /// （閒置機台是正常業務狀態，計劃時間為零時可用率映射為 0）。
    pub fn per_machine(
        &self,
        shift_records: &[ShiftRecord],
        stoppages: &[StoppageRecord],
        filter: &RecordFilter,
    ) -> oee_core::Result<Vec<MachineTotals>> {
        let mut buckets: Vec<ProductionTotals> =
            vec![ProductionTotals::zero(); self.machines.len()];

        for record in shift_records.iter().filter(|r| filter.matches_shift_record(r)) {
            record.validate()?;
            let idx = *self
                .index
                .get(&record.machine_id)
                .ok_or_else(|| OeeError::MachineNotFound(record.machine_id.clone()))?;
            buckets[idx].add_shift(record, &self.machines[idx]);
        }

        for record in stoppages.iter().filter(|r| filter.matches_stoppage(r)) {
            record.validate()?;
            let idx = *self
                .index
                .get(&record.machine_id)
                .ok_or_else(|| OeeError::MachineNotFound(record.machine_id.clone()))?;
            buckets[idx].add_stoppage(record);
        }

        Ok(self
            .machines
            .iter()
            .zip(buckets)
            .map(|(machine, totals)| MachineTotals {
                machine: machine.clone(),
                totals,
            })
            .collect())
    }

    /// 逐日聚合（供趨勢序列使用）
    ///
    /// 依日期分桶，沒有記錄的日期不補零（稀疏序列）。
    pub fn per_day(
        &self,
        shift_records: &[ShiftRecord],
        stoppages: &[StoppageRecord],
        filter: &RecordFilter,
    ) -> oee_core::Result<BTreeMap<NaiveDate, ProductionTotals>> {
        let mut days: BTreeMap<NaiveDate, ProductionTotals> = BTreeMap::new();

        for record in shift_records.iter().filter(|r| filter.matches_shift_record(r)) {
            record.validate()?;
            let spec = self.spec_for(&record.machine_id)?;
            days.entry(record.date)
                .or_insert_with(ProductionTotals::zero)
                .add_shift(record, spec);
        }

        for record in stoppages.iter().filter(|r| filter.matches_stoppage(r)) {
            record.validate()?;
            // 停機記錄同樣必須對應到已登錄的機台
            self.spec_for(&record.machine_id)?;
            days.entry(record.date)
                .or_insert_with(ProductionTotals::zero)
                .add_stoppage(record);
        }

        Ok(days)
    }

    /// 全廠聚合：跨所有機台加總
    pub fn global(
        &self,
        shift_records: &[ShiftRecord],
        stoppages: &[StoppageRecord],
        filter: &RecordFilter,
    ) -> oee_core::Result<ProductionTotals> {
        let mut total = ProductionTotals::zero();
        for machine_totals in self.per_machine(shift_records, stoppages, filter)? {
            total.merge(&machine_totals.totals);
        }
        Ok(total)
    }
}
