use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use crate::catalog::CatalogError;
use crate::config::{ConfigError, HealthmonConfig};

// `load` reads the process environment; tests that call it hold this lock.
static ENV_LOCK: Mutex<()> = Mutex::new(());

fn env_lock() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

/// Sets environment variables for the duration of a test.
struct EnvVars(Vec<&'static str>);

impl EnvVars {
    fn set(vars: &[(&'static str, &str)]) -> Self {
        for (k, v) in vars {
            std::env::set_var(k, v);
        }
        Self(vars.iter().map(|(k, _)| *k).collect())
    }
}

impl Drop for EnvVars {
    fn drop(&mut self) {
        for k in &self.0 {
            std::env::remove_var(k);
        }
    }
}

fn load_locked(path: Option<&Path>) -> Result<HealthmonConfig, ConfigError> {
    let _env = env_lock();
    HealthmonConfig::load(path)
}

fn write_config(body: &str) -> tempfile::NamedTempFile {
    let mut f = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    f.write_all(body.as_bytes()).unwrap();
    f
}

#[test]
fn defaults_match_reference_machine() {
    let cfg = HealthmonConfig::default();
    assert_eq!(cfg.monitor.tick_interval_ms, 2000);
    assert!(cfg.monitor.seed.is_none());
    assert!(cfg.alert.sound);
    assert_eq!(cfg.catalog().unwrap().len(), 9);
    cfg.validate().unwrap();
}

#[test]
fn file_overrides_monitor_section() {
    let f = write_config(
        r#"
[monitor]
tick_interval_ms = 500
seed = 7

[alert]
sound = false
"#,
    );
    let cfg = load_locked(Some(f.path())).unwrap();
    assert_eq!(cfg.monitor.tick_interval_ms, 500);
    assert_eq!(cfg.monitor.seed, Some(7));
    assert!(!cfg.alert.sound);
    assert!(cfg.sensors.is_none());
}

#[test]
fn custom_sensor_catalog() {
    let f = write_config(
        r#"
[[sensors]]
id = "coolant"
name = "Coolant"
unit = "°C"
initial_value = 60.0
threshold = { min = 0.0, max = 120.0, warning = 90.0, critical = 105.0 }
"#,
    );
    let cfg = load_locked(Some(f.path())).unwrap();
    let catalog = cfg.catalog().unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.get("coolant").unwrap().icon, "");
}

#[test]
fn inverted_thresholds_are_rejected_at_load() {
    let f = write_config(
        r#"
[[sensors]]
id = "oil"
name = "Oil Quality"
unit = "%"
initial_value = 85.0
threshold = { min = 0.0, max = 100.0, warning = 40.0, critical = 20.0 }
"#,
    );
    let err = load_locked(Some(f.path())).unwrap_err();
    assert!(matches!(err, ConfigError::Catalog(CatalogError::InvalidSensor { .. })));
}

#[test]
fn zero_interval_is_rejected() {
    let f = write_config("[monitor]\ntick_interval_ms = 0\n");
    let err = load_locked(Some(f.path())).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_locked(Some(&dir.path().join("absent.toml"))).unwrap_err();
    assert!(matches!(err, ConfigError::Load(_)));
}

#[test]
fn rendered_toml_loads_back() {
    let mut cfg = HealthmonConfig::default();
    cfg.monitor.seed = Some(11);
    cfg.sensors = Some(crate::catalog::default_definitions());
    let text = cfg.to_toml().unwrap();
    assert!(text.contains("tick_interval_ms = 2000"));
    let f = write_config(&text);
    let loaded = load_locked(Some(f.path())).unwrap();
    assert_eq!(loaded.monitor, cfg.monitor);
    assert_eq!(loaded.catalog().unwrap().len(), 9);
}

#[test]
fn environment_overrides_file_values() {
    let f = write_config(
        r#"
[monitor]
tick_interval_ms = 500

[alert]
sound = true
"#,
    );
    let _env = env_lock();
    let _vars = EnvVars::set(&[
        ("HEALTHMON__MONITOR__TICK_INTERVAL_MS", "750"),
        ("HEALTHMON__ALERT__SOUND", "false"),
    ]);
    let cfg = HealthmonConfig::load(Some(f.path())).unwrap();
    assert_eq!(cfg.monitor.tick_interval_ms, 750);
    assert!(!cfg.alert.sound);
}

#[test]
fn environment_alone_configures_monitor() {
    let _env = env_lock();
    let _vars = EnvVars::set(&[("HEALTHMON__MONITOR__SEED", "42")]);
    let cfg = HealthmonConfig::load(None).unwrap();
    assert_eq!(cfg.monitor.seed, Some(42));
    assert_eq!(cfg.monitor.tick_interval_ms, 2000);
}
