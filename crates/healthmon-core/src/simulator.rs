use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::{SensorReading, Threshold};

/// Fraction of the sensor range used as the walk variance.
const VARIANCE_FRACTION: f64 = 0.1;
/// Step width relative to the variance; steps fall in `[-v*0.1, +v*0.1]`.
const STEP_SCALE: f64 = 0.2;

/// One bounded random-walk step, clamped to the threshold range and rounded
/// to two decimals.
pub fn simulate<R: Rng + ?Sized>(value: f64, threshold: &Threshold, rng: &mut R) -> f64 {
    let variance = (threshold.max - threshold.min) * VARIANCE_FRACTION;
    let change = (rng.gen::<f64>() - 0.5) * variance * STEP_SCALE;
    let next = threshold.clamp(value + change);
    round2(next)
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Owns the random source driving the readings.
#[derive(Debug, Clone)]
pub struct Simulator {
    rng: StdRng,
}

impl Simulator {
    pub fn from_entropy() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    pub fn new(seed: Option<u64>) -> Self {
        seed.map(Self::seeded).unwrap_or_else(Self::from_entropy)
    }

    /// Produce a fresh reading set; the input is left untouched.
    pub fn step(&mut self, readings: &[SensorReading]) -> Vec<SensorReading> {
        readings
            .iter()
            .map(|r| r.with_value(simulate(r.value, &r.definition.threshold, &mut self.rng)))
            .collect()
    }
}
