//! Condition evaluator: per-sensor status and the aggregate machine condition.
//!
//! Pure given its inputs; the evaluation time is passed in by the caller.

use chrono::{DateTime, Utc};

use crate::domain::{ConditionStatus, MachineCondition, SensorReading, SensorStatus};

pub const CRITICAL_SCORE: u32 = 20;
pub const WARNING_SCORE: u32 = 60;
pub const NORMAL_SCORE: u32 = 100;

/// Values at or below `min + LOW_CRITICAL_OFFSET` count as critical.
pub const LOW_CRITICAL_OFFSET: f64 = 1.0;

pub const ALL_OPTIMAL: &str = "All systems optimal";

/// Status and score contribution of a single reading.
pub fn classify(reading: &SensorReading) -> (SensorStatus, u32) {
    let t = &reading.definition.threshold;
    let v = reading.value;
    if v >= t.critical || v <= t.min + LOW_CRITICAL_OFFSET {
        (SensorStatus::Critical, CRITICAL_SCORE)
    } else if v >= t.warning {
        (SensorStatus::Warning, WARNING_SCORE)
    } else {
        (SensorStatus::Normal, NORMAL_SCORE)
    }
}

fn tier(critical: usize, warning: usize, average: f64) -> ConditionStatus {
    if critical > 2 || average < 40.0 {
        ConditionStatus::Weak
    } else if warning > 3 || average < 70.0 {
        ConditionStatus::Neutral
    } else {
        ConditionStatus::Strong
    }
}

/// Assign a status to every reading and derive the machine condition.
///
/// `readings` must be non-empty; catalogs guarantee this.
pub fn evaluate(readings: &[SensorReading], now: DateTime<Utc>) -> (Vec<SensorReading>, MachineCondition) {
    let mut total = 0u32;
    let mut critical = 0usize;
    let mut warning = 0usize;
    let mut factors = Vec::new();

    let updated: Vec<SensorReading> = readings
        .iter()
        .map(|r| {
            let (status, score) = classify(r);
            match status {
                SensorStatus::Critical => {
                    critical += 1;
                    factors.push(format!("{} critical", r.definition.name));
                }
                SensorStatus::Warning => {
                    warning += 1;
                    factors.push(format!("{} warning", r.definition.name));
                }
                SensorStatus::Normal => {}
            }
            total += score;
            SensorReading { status, ..r.clone() }
        })
        .collect();

    let average = total as f64 / readings.len().max(1) as f64;
    if factors.is_empty() {
        factors.push(ALL_OPTIMAL.to_string());
    }

    let condition = MachineCondition {
        status: tier(critical, warning, average),
        score: average.round().clamp(0.0, 100.0) as u8,
        factors,
        last_updated: now,
    };
    (updated, condition)
}
