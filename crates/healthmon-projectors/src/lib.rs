//! Read-only views over monitor snapshots for dashboards and terminals.

use std::fmt::Write as _;

use healthmon_core::{
    AlertSnapshot, ConditionStatus, MachineCondition, SensorData, SensorReading, SensorStatus, StatusCounts,
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Stable,
    Down,
}

impl Trend {
    pub fn from_score(score: u8) -> Self {
        if score >= 80 {
            Trend::Up
        } else if score <= 40 {
            Trend::Down
        } else {
            Trend::Stable
        }
    }

    fn arrow(&self) -> &'static str {
        match self {
            Trend::Up => "↑",
            Trend::Stable => "→",
            Trend::Down => "↓",
        }
    }
}

/// Headline and one-line description of the machine status panel.
pub fn status_title(status: ConditionStatus) -> &'static str {
    match status {
        ConditionStatus::Strong => "STRONG",
        ConditionStatus::Neutral => "NEUTRAL",
        ConditionStatus::Weak => "WEAK",
    }
}

pub fn status_description(status: ConditionStatus) -> &'static str {
    match status {
        ConditionStatus::Strong => "Machine operating optimally",
        ConditionStatus::Neutral => "Machine requires attention",
        ConditionStatus::Weak => "Machine needs immediate action",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorRow {
    pub id: String,
    pub name: String,
    pub value: f64,
    pub unit: String,
    pub status: SensorStatus,
    /// Fill level of the gauge, `value / max` capped at 100.
    pub gauge_percent: f64,
}

impl SensorRow {
    pub fn project(reading: &SensorReading) -> Self {
        let max = reading.definition.threshold.max;
        let gauge_percent = if max > 0.0 {
            (reading.value / max * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };
        Self {
            id: reading.definition.id.clone(),
            name: reading.definition.name.clone(),
            value: reading.value,
            unit: reading.definition.unit.clone(),
            status: reading.status,
            gauge_percent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub timestamp: String,
    pub total_sensors: usize,
    pub counts: StatusCounts,
    pub status: ConditionStatus,
    pub title: &'static str,
    pub description: &'static str,
    pub score: u8,
    pub trend: Trend,
    pub factors: Vec<String>,
    pub sensors: Vec<SensorRow>,
}

impl DashboardView {
    pub fn project(data: &SensorData) -> Self {
        Self {
            timestamp: data.timestamp.to_rfc3339(),
            total_sensors: data.sensors.len(),
            counts: data.counts(),
            status: data.condition.status,
            title: status_title(data.condition.status),
            description: status_description(data.condition.status),
            score: data.condition.score,
            trend: Trend::from_score(data.condition.score),
            factors: data.condition.factors.clone(),
            sensors: data.sensors.iter().map(SensorRow::project).collect(),
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "[{}] machine {} {}/100 {} {}  sensors {} (normal {}, warning {}, critical {})",
            self.timestamp,
            self.title,
            self.score,
            self.trend.arrow(),
            self.description,
            self.total_sensors,
            self.counts.normal,
            self.counts.warning,
            self.counts.critical,
        );
        for row in &self.sensors {
            let _ = writeln!(
                out,
                "  {:<16} {:>10.2} {:<5} {:<8} {:>5.1}%",
                row.name,
                row.value,
                row.unit,
                row.status.as_str(),
                row.gauge_percent
            );
        }
        let _ = write!(out, "  factors: {}", self.factors.join("; "));
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertView {
    pub modal: bool,
    pub banner: bool,
    pub acknowledged: bool,
    pub message: Option<String>,
    /// Issues listed in the modal.
    pub factors: Vec<String>,
    pub triggered_at: Option<String>,
}

impl AlertView {
    /// Message, factors and trigger time are only carried while something
    /// is on screen.
    pub fn project(alert: &AlertSnapshot, condition: &MachineCondition) -> Self {
        let visible = alert.is_alerting();
        Self {
            modal: alert.show_modal,
            banner: alert.show_banner,
            acknowledged: alert.is_acknowledged,
            message: visible.then(|| alert.alert_message.clone()),
            factors: if visible { condition.factors.clone() } else { Vec::new() },
            triggered_at: visible.then(|| condition.last_updated.to_rfc3339()),
        }
    }

    pub fn render_text(&self) -> Option<String> {
        let message = self.message.as_ref()?;
        let mut out = String::new();
        if self.banner {
            let _ = writeln!(out, "!! {message}  [dismiss]");
        }
        if self.modal {
            let _ = writeln!(out, "!! ALERT: {message}  [ack | close]");
            for factor in &self.factors {
                let _ = writeln!(out, "   - {factor}");
            }
            if let Some(at) = &self.triggered_at {
                let _ = writeln!(out, "   triggered at {at}");
            }
        }
        Some(out.trim_end().to_string())
    }
}

/// Combined per-tick frame, as emitted by the CLI in JSON mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub dashboard: DashboardView,
    pub alert: AlertView,
}

impl Frame {
    pub fn project(data: &SensorData, alert: &AlertSnapshot) -> Self {
        Self {
            dashboard: DashboardView::project(data),
            alert: AlertView::project(alert, &data.condition),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
