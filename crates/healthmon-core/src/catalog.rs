//! Sensor catalog: the fixed set of sensors a monitor simulates.

use std::collections::HashSet;

use crate::domain::{SensorDefinition, SensorReading, Threshold};
use crate::validation::{validate_definition, ThresholdError};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("sensor catalog is empty")]
    Empty,
    #[error("duplicate sensor id `{0}`")]
    DuplicateId(String),
    #[error("invalid sensor `{id}`: {source}")]
    InvalidSensor {
        id: String,
        #[source]
        source: ThresholdError,
    },
}

/// Validated, ordered set of sensor definitions. Order is evaluation order.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorCatalog {
    definitions: Vec<SensorDefinition>,
}

impl SensorCatalog {
    pub fn new(definitions: Vec<SensorDefinition>) -> Result<Self, CatalogError> {
        if definitions.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::new();
        for def in &definitions {
            validate_definition(def).map_err(|source| CatalogError::InvalidSensor {
                id: def.id.clone(),
                source,
            })?;
            if !seen.insert(def.id.as_str()) {
                return Err(CatalogError::DuplicateId(def.id.clone()));
            }
        }
        Ok(Self { definitions })
    }

    /// The nine sensors of the reference machine.
    pub fn default_machine() -> Self {
        Self { definitions: default_definitions() }
    }

    pub fn definitions(&self) -> &[SensorDefinition] {
        &self.definitions
    }

    pub fn get(&self, id: &str) -> Option<&SensorDefinition> {
        self.definitions.iter().find(|d| d.id == id)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn initial_readings(&self) -> Vec<SensorReading> {
        self.definitions
            .iter()
            .map(|d| SensorReading::new(d.clone(), d.initial_value))
            .collect()
    }
}

impl Default for SensorCatalog {
    fn default() -> Self {
        Self::default_machine()
    }
}

fn sensor(id: &str, name: &str, unit: &str, threshold: Threshold, icon: &str, initial_value: f64) -> SensorDefinition {
    SensorDefinition {
        id: id.into(),
        name: name.into(),
        unit: unit.into(),
        threshold,
        icon: icon.into(),
        initial_value,
    }
}

pub fn default_definitions() -> Vec<SensorDefinition> {
    vec![
        sensor("vibration", "Vibration", "mm/s", Threshold::new(0.0, 10.0, 5.0, 8.0), "Activity", 2.5),
        sensor("temperature", "Temperature", "°C", Threshold::new(-20.0, 100.0, 70.0, 85.0), "Thermometer", 45.0),
        sensor("pressure", "Pressure", "bar", Threshold::new(0.0, 50.0, 35.0, 45.0), "Gauge", 15.2),
        sensor("current", "Current", "A", Threshold::new(0.0, 20.0, 15.0, 18.0), "Zap", 8.3),
        sensor("voltage", "Voltage", "V", Threshold::new(0.0, 300.0, 250.0, 280.0), "Battery", 230.0),
        sensor("rpm", "RPM/Speed", "RPM", Threshold::new(0.0, 3000.0, 2500.0, 2800.0), "RotateCw", 1450.0),
        // Expressed as degradation so that higher is worse, like every other sensor.
        sensor("oil", "Oil Degradation", "%", Threshold::new(0.0, 100.0, 60.0, 80.0), "Droplet", 15.0),
        sensor("acoustic", "Acoustic", "dB", Threshold::new(0.0, 120.0, 85.0, 100.0), "Volume2", 65.0),
        sensor("humidity", "Humidity", "%", Threshold::new(0.0, 100.0, 80.0, 90.0), "Cloud", 45.0),
    ]
}
