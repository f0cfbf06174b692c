use crate::domain::{SensorDefinition, Threshold};

/// Configuration errors for a single sensor definition.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ThresholdError {
    #[error("threshold bound `{0}` is not a finite number")]
    NonFinite(&'static str),
    #[error("threshold ordering violated: expected min <= warning <= critical <= max, got {min} / {warning} / {critical} / {max}")]
    Ordering { min: f64, warning: f64, critical: f64, max: f64 },
    #[error("sensor id must not be empty")]
    EmptyId,
    #[error("initial value {value} of `{id}` lies outside [{min}, {max}]")]
    InitialOutOfRange { id: String, value: f64, min: f64, max: f64 },
}

/// Validate a threshold quadruple before it enters a catalog.
pub fn validate_threshold(t: &Threshold) -> Result<(), ThresholdError> {
    for (label, v) in [("min", t.min), ("max", t.max), ("warning", t.warning), ("critical", t.critical)] {
        if !v.is_finite() {
            return Err(ThresholdError::NonFinite(label));
        }
    }
    if !(t.min <= t.warning && t.warning <= t.critical && t.critical <= t.max) {
        return Err(ThresholdError::Ordering {
            min: t.min,
            warning: t.warning,
            critical: t.critical,
            max: t.max,
        });
    }
    Ok(())
}

pub fn validate_definition(def: &SensorDefinition) -> Result<(), ThresholdError> {
    if def.id.trim().is_empty() {
        return Err(ThresholdError::EmptyId);
    }
    validate_threshold(&def.threshold)?;
    let t = &def.threshold;
    if !def.initial_value.is_finite() || def.initial_value < t.min || def.initial_value > t.max {
        return Err(ThresholdError::InitialOutOfRange {
            id: def.id.clone(),
            value: def.initial_value,
            min: t.min,
            max: t.max,
        });
    }
    Ok(())
}
