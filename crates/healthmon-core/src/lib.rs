//! Healthmon core domain: sensor catalog, simulated readings, condition
//! scoring, and the alert lifecycle.

pub mod domain;
pub mod validation;
pub mod catalog;
pub mod simulator;
pub mod evaluator;
pub mod alert;
pub mod monitor;
pub mod runtime;
pub mod config;

pub use domain::*;
pub use validation::*;
pub use catalog::*;
pub use simulator::*;
pub use evaluator::*;
pub use alert::*;
pub use monitor::*;
pub use runtime::*;
pub use crate::config::*;

#[cfg(test)]
mod tests_determinism;
#[cfg(test)]
mod tests_config;
