use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Operating bounds of a sensor. Ordering `min <= warning <= critical <= max`
/// is enforced when a catalog is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub min: f64,
    pub max: f64,
    pub warning: f64,
    pub critical: f64,
}

impl Threshold {
    pub const fn new(min: f64, max: f64, warning: f64, critical: f64) -> Self {
        Self { min, max, warning, critical }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }
}

/// Static description of one sensor, created once at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorDefinition {
    pub id: String,
    pub name: String,
    pub unit: String,
    pub threshold: Threshold,
    /// Opaque icon reference for whatever renders the dashboard.
    #[serde(default)]
    pub icon: String,
    pub initial_value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorStatus {
    Normal,
    Warning,
    Critical,
}

impl SensorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SensorStatus::Normal => "normal",
            SensorStatus::Warning => "warning",
            SensorStatus::Critical => "critical",
        }
    }
}

/// One sensor's value for the current tick. Readings are rebuilt every tick,
/// never patched in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub definition: SensorDefinition,
    pub value: f64,
    pub status: SensorStatus,
}

impl SensorReading {
    pub fn new(definition: SensorDefinition, value: f64) -> Self {
        Self { definition, value, status: SensorStatus::Normal }
    }

    pub fn with_value(&self, value: f64) -> Self {
        Self { definition: self.definition.clone(), value, status: self.status }
    }

    pub fn id(&self) -> &str {
        &self.definition.id
    }
}

/// Aggregate health tier of the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionStatus {
    Strong,
    Neutral,
    Weak,
}

impl ConditionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionStatus::Strong => "strong",
            ConditionStatus::Neutral => "neutral",
            ConditionStatus::Weak => "weak",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineCondition {
    pub status: ConditionStatus,
    /// 0..=100
    pub score: u8,
    /// In sensor evaluation order; never empty.
    pub factors: Vec<String>,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub normal: usize,
    pub warning: usize,
    pub critical: usize,
}

/// Snapshot published once per tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorData {
    pub timestamp: DateTime<Utc>,
    pub sensors: Vec<SensorReading>,
    pub condition: MachineCondition,
}

impl SensorData {
    pub fn counts(&self) -> StatusCounts {
        self.sensors.iter().fold(StatusCounts::default(), |mut acc, s| {
            match s.status {
                SensorStatus::Normal => acc.normal += 1,
                SensorStatus::Warning => acc.warning += 1,
                SensorStatus::Critical => acc.critical += 1,
            }
            acc
        })
    }
}
