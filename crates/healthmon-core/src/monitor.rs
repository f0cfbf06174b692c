use chrono::{DateTime, Utc};
use log::debug;

use crate::alert::{AlertLifecycle, AlertSnapshot, AlertSound, AlertState};
use crate::catalog::SensorCatalog;
use crate::domain::{SensorData, SensorReading};
use crate::evaluator::evaluate;
use crate::simulator::Simulator;

/// Owns the current snapshot and the alert lifecycle. Every mutation goes
/// through `&mut self`, so ticks and user actions cannot interleave.
#[derive(Debug)]
pub struct Monitor {
    catalog: SensorCatalog,
    simulator: Simulator,
    data: SensorData,
    alerts: AlertLifecycle,
    ticks: u64,
}

impl Monitor {
    pub fn new(
        catalog: SensorCatalog,
        simulator: Simulator,
        sound: Box<dyn AlertSound + Send>,
        now: DateTime<Utc>,
    ) -> Self {
        let (sensors, condition) = evaluate(&catalog.initial_readings(), now);
        let alerts = AlertLifecycle::new(condition.status, sound);
        Self {
            catalog,
            simulator,
            data: SensorData { timestamp: now, sensors, condition },
            alerts,
            ticks: 0,
        }
    }

    /// Simulate the next reading set and apply it.
    pub fn tick(&mut self, now: DateTime<Utc>) -> &SensorData {
        let simulated = self.simulator.step(&self.data.sensors);
        self.apply(simulated, now)
    }

    /// Evaluate a complete reading set, feed the alert lifecycle, then swap
    /// in the new snapshot.
    pub fn apply(&mut self, readings: Vec<SensorReading>, now: DateTime<Utc>) -> &SensorData {
        let (sensors, condition) = evaluate(&readings, now);
        self.alerts.observe(&condition);
        self.ticks += 1;
        debug!(
            "tick {}: {} score {} ({})",
            self.ticks,
            condition.status.as_str(),
            condition.score,
            condition.factors.join(", ")
        );
        self.data = SensorData { timestamp: now, sensors, condition };
        &self.data
    }

    pub fn acknowledge(&mut self) {
        self.alerts.acknowledge();
    }

    pub fn dismiss_banner(&mut self) {
        self.alerts.dismiss_banner();
    }

    pub fn close_modal(&mut self) {
        self.alerts.close_modal();
    }

    pub fn snapshot(&self) -> &SensorData {
        &self.data
    }

    pub fn alert_snapshot(&self) -> AlertSnapshot {
        self.alerts.snapshot(self.data.condition.score)
    }

    pub fn alert_state(&self) -> AlertState {
        self.alerts.state()
    }

    pub fn catalog(&self) -> &SensorCatalog {
        &self.catalog
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::SilentSound;
    use crate::domain::ConditionStatus;
    use crate::evaluator::ALL_OPTIMAL;

    fn monitor(seed: u64) -> Monitor {
        Monitor::new(
            SensorCatalog::default_machine(),
            Simulator::seeded(seed),
            Box::new(SilentSound),
            Utc::now(),
        )
    }

    #[test]
    fn starts_strong_and_quiet() {
        let m = monitor(1);
        let cond = &m.snapshot().condition;
        assert_eq!(cond.status, ConditionStatus::Strong);
        assert_eq!(cond.score, 100);
        assert_eq!(cond.factors, vec![ALL_OPTIMAL.to_string()]);
        let alert = m.alert_snapshot();
        assert!(!alert.show_modal && !alert.show_banner && !alert.is_acknowledged);
        assert_eq!(m.ticks(), 0);
        assert_eq!(m.catalog().len(), m.snapshot().sensors.len());
    }

    #[test]
    fn tick_replaces_snapshot() {
        let mut m = monitor(5);
        let before = m.snapshot().clone();
        let later = before.timestamp + chrono::Duration::seconds(2);
        let after = m.tick(later).clone();
        assert_eq!(after.timestamp, later);
        assert_eq!(after.condition.last_updated, later);
        assert_eq!(after.sensors.len(), before.sensors.len());
        assert_eq!(m.ticks(), 1);
    }

    #[test]
    fn readings_stay_in_range_over_many_ticks() {
        let mut m = monitor(42);
        let mut now = Utc::now();
        for _ in 0..300 {
            now += chrono::Duration::seconds(2);
            let data = m.tick(now);
            for s in &data.sensors {
                let t = s.definition.threshold;
                assert!(s.value >= t.min && s.value <= t.max);
            }
            assert!(data.condition.score <= 100);
            assert!(!data.condition.factors.is_empty());
        }
    }

    fn with_values(m: &Monitor, critical: &[&str]) -> Vec<SensorReading> {
        m.snapshot()
            .sensors
            .iter()
            .map(|r| {
                if critical.contains(&r.id()) {
                    r.with_value(r.definition.threshold.max)
                } else {
                    r.with_value(r.definition.initial_value)
                }
            })
            .collect()
    }

    #[test]
    fn weak_readings_raise_alert_until_acknowledged() {
        let mut m = monitor(3);
        let weak = with_values(&m, &["vibration", "pressure", "current"]);
        let now = Utc::now();

        let data = m.apply(weak.clone(), now);
        assert_eq!(data.condition.status, ConditionStatus::Weak);
        let alert = m.alert_snapshot();
        assert!(alert.show_modal && alert.show_banner);
        assert_eq!(
            alert.alert_message,
            "CRITICAL: Machine health is WEAK (73/100) - Immediate attention required!"
        );

        m.dismiss_banner();
        assert!(!m.alert_snapshot().show_banner);
        assert!(!m.alert_snapshot().is_acknowledged);
        m.acknowledge();
        let alert = m.alert_snapshot();
        assert!(alert.is_acknowledged && !alert.show_modal && !alert.show_banner);

        // still weak: stays quiet
        m.apply(weak.clone(), now);
        assert!(!m.alert_snapshot().show_modal);

        // recover, then degrade again
        let healthy = with_values(&m, &[]);
        m.apply(healthy, now);
        assert!(!m.alert_snapshot().is_acknowledged);
        m.apply(weak, now);
        let alert = m.alert_snapshot();
        assert!(alert.show_modal && alert.show_banner);
    }

    #[test]
    fn machine_that_starts_weak_stays_quiet() {
        let defs = SensorCatalog::default_machine()
            .definitions()
            .iter()
            .cloned()
            .map(|mut d| {
                d.initial_value = d.threshold.max;
                d
            })
            .collect();
        let m = Monitor::new(
            SensorCatalog::new(defs).unwrap(),
            Simulator::seeded(9),
            Box::new(SilentSound),
            Utc::now(),
        );
        assert_eq!(m.snapshot().condition.status, ConditionStatus::Weak);
        assert_eq!(m.alert_state().previous_status, ConditionStatus::Weak);
        assert!(!m.alert_snapshot().show_modal);
    }
}
