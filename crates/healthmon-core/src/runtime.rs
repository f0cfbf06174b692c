//! Cooperative update loop: one periodic tick plus user commands, handled
//! one at a time on the calling thread.

use std::time::Duration;

use chrono::Utc;
use crossbeam_channel::{select, tick, Receiver};
use log::{debug, info};

use crate::alert::AlertSnapshot;
use crate::domain::SensorData;
use crate::monitor::Monitor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Acknowledge,
    DismissBanner,
    CloseModal,
    Shutdown,
}

/// Why [`run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Shutdown,
    CommandsClosed,
    TickLimit,
}

/// Drive `monitor` until shutdown. `observer` sees the fresh snapshots after
/// every tick and every command. The timer is dropped on return.
pub fn run<F>(
    monitor: &mut Monitor,
    period: Duration,
    max_ticks: Option<u64>,
    commands: &Receiver<Command>,
    mut observer: F,
) -> StopReason
where
    F: FnMut(&SensorData, &AlertSnapshot),
{
    let ticker = tick(period);
    let mut ticks = 0u64;
    info!("monitor loop started (period {} ms)", period.as_millis());

    let reason = loop {
        if max_ticks.is_some_and(|limit| ticks >= limit) {
            break StopReason::TickLimit;
        }
        let stop = select! {
            recv(ticker) -> _ => {
                monitor.tick(Utc::now());
                ticks += 1;
                None
            }
            recv(commands) -> msg => match msg {
                Ok(Command::Shutdown) => Some(StopReason::Shutdown),
                Ok(cmd) => {
                    debug!("command {:?}", cmd);
                    apply(monitor, cmd);
                    None
                }
                Err(_) => Some(StopReason::CommandsClosed),
            },
        };
        if let Some(reason) = stop {
            break reason;
        }
        observer(monitor.snapshot(), &monitor.alert_snapshot());
    };

    info!("monitor loop stopped after {} ticks: {:?}", ticks, reason);
    reason
}

/// Apply one user command.
pub fn apply(monitor: &mut Monitor, cmd: Command) {
    match cmd {
        Command::Acknowledge => monitor.acknowledge(),
        Command::DismissBanner => monitor.dismiss_banner(),
        Command::CloseModal => monitor.close_modal(),
        Command::Shutdown => {}
    }
}
