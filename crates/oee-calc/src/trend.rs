//! 趨勢序列
//!
//! 把逐日聚合映射成日期升冪的指標/產量序列，
//! 缺資料的日期不插值、不補零。

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::aggregate::ProductionTotals;
use crate::metrics::MetricCalculator;

/// 單日指標趨勢點
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// 日期
    pub date: NaiveDate,
    /// 可用率
    pub availability: Decimal,
    /// 效率
    pub performance: Decimal,
    /// 良率
    pub quality: Decimal,
    /// OEE
    pub oee: Decimal,
}

/// 單日產量趨勢點
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProductionPoint {
    /// 日期
    pub date: NaiveDate,
    /// 總產量
    pub total_production: Decimal,
    /// 不良品數量
    pub defects: Decimal,
}

/// 趨勢序列建構器
pub struct TrendBuilder;

impl TrendBuilder {
    /// 建立逐日 OEE 趨勢序列（日期升冪）
    pub fn oee_series(days: &BTreeMap<NaiveDate, ProductionTotals>) -> Vec<TrendPoint> {
        days.iter()
            .map(|(&date, totals)| {
                let metrics = MetricCalculator::from_totals(totals);
                TrendPoint {
                    date,
                    availability: metrics.availability,
                    performance: metrics.performance,
                    quality: metrics.quality,
                    oee: metrics.oee,
                }
            })
            .collect()
    }

    /// 建立逐日產量/不良品序列（日期升冪）
    pub fn production_series(days: &BTreeMap<NaiveDate, ProductionTotals>) -> Vec<ProductionPoint> {
        days.iter()
            .map(|(&date, totals)| ProductionPoint {
                date,
                total_production: totals.total_production,
                defects: totals.defects,
            })
            .collect()
    }
}
