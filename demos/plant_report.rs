//! 全廠 OEE 分析完整範例
//!
//! 展示從原始生產/停機記錄到完整分析報告的流程

use chrono::NaiveDate;
use oee::{
    CostConfig, MachineSpec, OeeAnalyzer, RecordFilter, ShiftRecord, StoppageRecord, StoppageType,
};
use rust_decimal::Decimal;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().init();

    println!("===== Plant OEE Analysis Example =====\n");

    // 步驟 1: 機台規格
    println!("[1] Register Machine Specs");
    let machines = vec![
        MachineSpec::new("LINE-A".to_string(), Decimal::from(80), Decimal::from(480))
            .with_name("Línea A - Ensamble".to_string())
            .with_area("Producción".to_string()),
        MachineSpec::new("CNC-01".to_string(), Decimal::from(45), Decimal::from(480))
            .with_name("CNC-01".to_string())
            .with_area("Mecanizado".to_string()),
        MachineSpec::new("INJ-PL5".to_string(), Decimal::from(90), Decimal::from(480))
            .with_name("Inyectora PL-5".to_string())
            .with_area("Plásticos".to_string()),
    ];
    for machine in &machines {
        println!(
            "    {}: {} u/min, {} min/shift",
            machine.id, machine.ideal_speed, machine.planned_time
        );
    }
    println!();

    // 步驟 2: 成本配置（預設：停機 50/分、不良 15/件、產值 25/件、目標 0.85）
    println!("[2] Cost Configuration");
    let config = CostConfig::default();
    println!(
        "    Stop {}/min | Defect {}/unit | Value {}/unit | Goal {}\n",
        config.stop_cost_per_min,
        config.defect_cost_per_unit,
        config.production_value_per_unit,
        config.oee_goal
    );

    // 步驟 3: 原始記錄（兩天、三台機台）
    println!("[3] Load Raw Records");
    let shifts = sample_shift_records();
    let stoppages = sample_stoppages();
    println!(
        "    {} shift records, {} stoppages\n",
        shifts.len(),
        stoppages.len()
    );

    // 步驟 4: 執行分析
    println!("[4] Run Analysis");
    let analyzer = OeeAnalyzer::new(machines, config);
    let report = analyzer.analyze(&shifts, &stoppages, &RecordFilter::new())?;
    println!(
        "    Completed in {} ms\n",
        report.calculation_time_ms.unwrap_or(0)
    );

    // 步驟 5: 顯示結果
    println!("[5] Plant Report");
    println!(
        "    OEE {} | A {} | P {} | Q {}",
        report.metrics.oee.round_dp(4),
        report.metrics.availability.round_dp(4),
        report.metrics.performance.round_dp(4),
        report.metrics.quality.round_dp(4)
    );
    println!(
        "    Total loss {} | Potential gain {}",
        report.losses.total_loss.round_dp(2),
        report.losses.potential_gain.round_dp(2)
    );
    println!(
        "    Critical machines: {}/{}\n",
        report.critical_machines, report.total_machines
    );

    println!("    Machine ranking:");
    for row in &report.ranking {
        println!(
            "      #{} {} ({}) OEE {} [{:?}]",
            row.rank,
            row.name,
            row.area,
            row.metrics.oee.round_dp(4),
            row.level
        );
    }
    println!();

    println!("    Top stop reasons:");
    for entry in report.top_stop_reasons(7) {
        println!(
            "      {} — {} min ({} events)",
            entry.reason, entry.total_minutes, entry.event_count
        );
    }
    println!();

    // 報告可直接序列化供顯示層使用
    println!("[6] JSON Output");
    println!("{}", serde_json::to_string_pretty(&report.metrics)?);

    println!("\n===== Analysis Complete =====\n");

    Ok(())
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, day).unwrap()
}

/// 兩天份的班次生產記錄
fn sample_shift_records() -> Vec<ShiftRecord> {
    vec![
        ShiftRecord::new(
            "LINE-A".to_string(),
            date(1),
            "MORNING".to_string(),
            Decimal::from(432),
            Decimal::from(28800),
            Decimal::from(580),
        ),
        ShiftRecord::new(
            "LINE-A".to_string(),
            date(2),
            "MORNING".to_string(),
            Decimal::from(445),
            Decimal::from(30100),
            Decimal::from(420),
        ),
        ShiftRecord::new(
            "CNC-01".to_string(),
            date(1),
            "AFTERNOON".to_string(),
            Decimal::from(400),
            Decimal::from(15500),
            Decimal::from(310),
        ),
        ShiftRecord::new(
            "CNC-01".to_string(),
            date(2),
            "AFTERNOON".to_string(),
            Decimal::from(410),
            Decimal::from(16200),
            Decimal::from(280),
        ),
        ShiftRecord::new(
            "INJ-PL5".to_string(),
            date(1),
            "NIGHT".to_string(),
            Decimal::from(290),
            Decimal::from(20000),
            Decimal::from(2400),
        ),
        ShiftRecord::new(
            "INJ-PL5".to_string(),
            date(2),
            "NIGHT".to_string(),
            Decimal::from(310),
            Decimal::from(21500),
            Decimal::from(2100),
        ),
    ]
}

/// 兩天份的停機記錄
fn sample_stoppages() -> Vec<StoppageRecord> {
    vec![
        StoppageRecord::new(
            "LINE-A".to_string(),
            date(1),
            "Changeover".to_string(),
            StoppageType::Planned,
            Decimal::from(48),
        ),
        StoppageRecord::new(
            "CNC-01".to_string(),
            date(1),
            "Material shortage".to_string(),
            StoppageType::Unplanned,
            Decimal::from(80),
        ),
        StoppageRecord::new(
            "INJ-PL5".to_string(),
            date(1),
            "Mechanical failure".to_string(),
            StoppageType::Unplanned,
            Decimal::from(190),
        ),
        StoppageRecord::new(
            "INJ-PL5".to_string(),
            date(2),
            "Mechanical failure".to_string(),
            StoppageType::Unplanned,
            Decimal::from(170),
        )
        .with_observations("Se repite la falla del husillo".to_string()),
    ]
}
