//! Alert lifecycle: modal/banner visibility and acknowledgment driven by
//! machine condition transitions.
//!
//! [`AlertState::reduce`] is a pure reducer. Side effects come back as
//! [`AlertEffect`]s and are carried out by [`AlertLifecycle`], which owns the
//! [`AlertSound`] capability.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::domain::{ConditionStatus, MachineCondition};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertState {
    pub show_modal: bool,
    pub show_banner: bool,
    pub is_acknowledged: bool,
    pub previous_status: ConditionStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertEvent {
    Tick(ConditionStatus),
    Acknowledge,
    DismissBanner,
    CloseModal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertEffect {
    PlayCue,
}

impl AlertState {
    /// Quiet state seeded with the status of the first evaluation, so a
    /// machine that starts weak does not alert until it re-enters weak.
    pub fn new(initial: ConditionStatus) -> Self {
        Self {
            show_modal: false,
            show_banner: false,
            is_acknowledged: false,
            previous_status: initial,
        }
    }

    pub fn reduce(self, event: AlertEvent) -> (Self, Vec<AlertEffect>) {
        let mut next = self;
        let mut effects = Vec::new();
        match event {
            AlertEvent::Tick(current) => {
                let previous = self.previous_status;
                let weak = ConditionStatus::Weak;
                if current == weak && previous != weak && !self.is_acknowledged {
                    next.show_modal = true;
                    next.show_banner = true;
                    effects.push(AlertEffect::PlayCue);
                }
                if current != weak && previous == weak {
                    // modal stays as it is until closed explicitly
                    next.is_acknowledged = false;
                    next.show_banner = false;
                }
                next.previous_status = current;
            }
            AlertEvent::Acknowledge => {
                next.is_acknowledged = true;
                next.show_modal = false;
                next.show_banner = false;
            }
            AlertEvent::DismissBanner => next.show_banner = false,
            AlertEvent::CloseModal => next.show_modal = false,
        }
        (next, effects)
    }
}

/// Fixed human-readable alert text.
pub fn alert_message(score: u8) -> String {
    format!("CRITICAL: Machine health is WEAK ({score}/100) - Immediate attention required!")
}

/// Alert state as published to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertSnapshot {
    pub show_modal: bool,
    pub show_banner: bool,
    pub is_acknowledged: bool,
    pub alert_message: String,
}

impl AlertSnapshot {
    /// Modal or banner is on screen.
    pub fn is_alerting(&self) -> bool {
        self.show_modal || self.show_banner
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SoundError {
    #[error("alert sound unavailable: {0}")]
    Unavailable(String),
    #[error("alert sound output failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Audible cue capability. Failures are reported but never block an alert.
pub trait AlertSound {
    fn play(&mut self) -> Result<(), SoundError>;
}

/// Sink that never makes a sound.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSound;

impl AlertSound for SilentSound {
    fn play(&mut self) -> Result<(), SoundError> {
        Ok(())
    }
}

pub struct AlertLifecycle {
    state: AlertState,
    sound: Box<dyn AlertSound + Send>,
}

impl std::fmt::Debug for AlertLifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlertLifecycle").field("state", &self.state).finish_non_exhaustive()
    }
}

impl AlertLifecycle {
    pub fn new(initial: ConditionStatus, sound: Box<dyn AlertSound + Send>) -> Self {
        Self { state: AlertState::new(initial), sound }
    }

    pub fn state(&self) -> AlertState {
        self.state
    }

    pub fn observe(&mut self, condition: &MachineCondition) {
        let before = self.state;
        self.dispatch(AlertEvent::Tick(condition.status));
        if before.previous_status != condition.status {
            info!(
                "machine condition {} -> {} (score {})",
                before.previous_status.as_str(),
                condition.status.as_str(),
                condition.score
            );
        }
    }

    pub fn acknowledge(&mut self) {
        self.dispatch(AlertEvent::Acknowledge);
    }

    pub fn dismiss_banner(&mut self) {
        self.dispatch(AlertEvent::DismissBanner);
    }

    pub fn close_modal(&mut self) {
        self.dispatch(AlertEvent::CloseModal);
    }

    pub fn snapshot(&self, score: u8) -> AlertSnapshot {
        AlertSnapshot {
            show_modal: self.state.show_modal,
            show_banner: self.state.show_banner,
            is_acknowledged: self.state.is_acknowledged,
            alert_message: alert_message(score),
        }
    }

    fn dispatch(&mut self, event: AlertEvent) {
        let (next, effects) = self.state.reduce(event);
        if next != self.state {
            debug!("alert {:?}: {:?} -> {:?}", event, self.state, next);
        }
        self.state = next;
        for effect in effects {
            match effect {
                AlertEffect::PlayCue => {
                    if let Err(e) = self.sound.play() {
                        warn!("could not play alert sound: {e}");
                    }
                }
            }
        }
    }
}
