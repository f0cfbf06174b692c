use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use crossbeam_channel::unbounded;
use healthmon_core::{AlertSound, HealthmonConfig, Monitor, SilentSound, Simulator};
use healthmon_projectors::{AlertView, DashboardView, Frame};

mod input;
mod sound;

#[derive(Parser)]
#[command(name = "healthmon", version, about = "Simulated machine health monitor")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ConfigArg {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the monitor loop; type ack, dismiss, close or quit on stdin
    Run {
        #[command(flatten)]
        config: ConfigArg,
        #[arg(long)]
        interval_ms: Option<u64>,
        #[arg(long)]
        seed: Option<u64>,
        /// Stop after this many ticks
        #[arg(long)]
        ticks: Option<u64>,
        /// Emit one JSON frame per line
        #[arg(long)]
        json: bool,
        #[arg(long)]
        no_sound: bool,
    },
    /// Validate the configuration and sensor catalog
    Check {
        #[command(flatten)]
        config: ConfigArg,
    },
    /// Print the effective configuration as TOML
    Config {
        #[command(flatten)]
        config: ConfigArg,
    },
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "healthmon=info,healthmon_core=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, interval_ms, seed, ticks, json, no_sound } => {
            let mut cfg = HealthmonConfig::load(config.config.as_deref())?;
            if let Some(ms) = interval_ms {
                cfg.monitor.tick_interval_ms = ms;
            }
            if seed.is_some() {
                cfg.monitor.seed = seed;
            }
            if ticks.is_some() {
                cfg.monitor.max_ticks = ticks;
            }
            if no_sound {
                cfg.alert.sound = false;
            }
            cfg.validate()?;
            run(&cfg, json)?;
        }
        Commands::Check { config } => {
            let cfg = HealthmonConfig::load(config.config.as_deref())?;
            let catalog = cfg.catalog()?;
            println!(
                "ok: {} sensors, tick every {} ms",
                catalog.len(),
                cfg.monitor.tick_interval_ms
            );
            for def in catalog.definitions() {
                let t = def.threshold;
                println!(
                    "  {:<12} {:<16} [{} .. {}] warn {} crit {} {}",
                    def.id, def.name, t.min, t.max, t.warning, t.critical, def.unit
                );
            }
        }
        Commands::Config { config } => {
            let cfg = HealthmonConfig::load(config.config.as_deref())?;
            print!("{}", cfg.to_toml()?);
        }
    }
    Ok(())
}

fn run(cfg: &HealthmonConfig, json: bool) -> anyhow::Result<()> {
    let catalog = cfg.catalog().context("building sensor catalog")?;
    let sound: Box<dyn AlertSound + Send> = if cfg.alert.sound {
        Box::new(sound::TerminalBell)
    } else {
        Box::new(SilentSound)
    };
    let mut monitor = Monitor::new(catalog, Simulator::new(cfg.monitor.seed), sound, Utc::now());
    log::info!(
        "monitoring {} sensors every {} ms",
        monitor.catalog().len(),
        cfg.monitor.tick_interval_ms
    );

    let (tx, rx) = unbounded();
    // `tx` stays alive here so a closed stdin does not end the loop.
    input::spawn_stdin_reader(tx.clone());

    let mut emit = |data: &healthmon_core::SensorData, alert: &healthmon_core::AlertSnapshot| {
        if json {
            match Frame::project(data, alert).to_json() {
                Ok(line) => println!("{line}"),
                Err(e) => log::error!("failed to encode frame: {e}"),
            }
        } else {
            println!("{}", DashboardView::project(data).render_text());
            if let Some(text) = AlertView::project(alert, &data.condition).render_text() {
                println!("{text}");
            }
        }
    };

    emit(monitor.snapshot(), &monitor.alert_snapshot());
    let reason = healthmon_core::run(
        &mut monitor,
        cfg.monitor.tick_interval(),
        cfg.monitor.max_ticks,
        &rx,
        &mut emit,
    );
    drop(tx);
    log::info!("stopped: {:?}", reason);
    Ok(())
}
