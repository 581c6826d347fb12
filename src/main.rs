//! vjoystick - virtual joystick playground
//!
//! Opens the egui visualizer by default, or replays a scripted drag headlessly.

use anyhow::Result;
use clap::Parser;
use colored::*;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vjoystick::config::{ConfigWatcher, JoystickConfig};
use vjoystick::replay::ReplayScript;
use vjoystick::Joystick;

/// Virtual joystick - drag a handle, get angle, direction and power
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to joystick configuration file (defaults are used when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Replay a YAML pointer script instead of opening a window
    #[arg(long)]
    replay: Option<PathBuf>,

    /// Print replay results as a table instead of JSON lines
    #[arg(long, requires = "replay")]
    table: bool,

    /// Print the effective configuration as YAML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();

    init_logging(&args.log_level)?;

    if args.print_config {
        let config = load_config(args.config.as_ref())?;
        print!("{}", config.to_yaml()?);
        return Ok(());
    }

    if let Some(script_path) = &args.replay {
        let config = load_config(args.config.as_ref())?;
        return run_replay(&config, script_path, args.table);
    }

    // Visualizer: watch the config file when one was given
    let (config, watcher) = match &args.config {
        Some(path) => {
            let (watcher, config) = ConfigWatcher::new(path)?;
            info!("Configuration loaded with hot-reload enabled: {}", path.display());
            (config, Some(watcher))
        },
        None => {
            info!("No configuration file given, using defaults");
            (JoystickConfig::default(), None)
        },
    };

    vjoystick::visualizer::run_visualizer(config, watcher)
}

fn load_config(path: Option<&PathBuf>) -> Result<JoystickConfig> {
    match path {
        Some(path) => {
            info!("Configuration file: {}", path.display());
            JoystickConfig::load(path)
        },
        None => Ok(JoystickConfig::default()),
    }
}

fn run_replay(config: &JoystickConfig, script_path: &PathBuf, table: bool) -> Result<()> {
    let script = ReplayScript::load(script_path)?;
    info!(
        "Replaying {} events from {}",
        script.events.len(),
        script_path.display()
    );

    let mut joystick = Joystick::new(config.to_settings()?);
    joystick.set_position(config.position);

    let steps = script.run(&mut joystick);

    if table {
        println!("\n{}", "=== Joystick Replay ===".bold().cyan());
        println!(
            "  Position: ({}, {})  outer radius: {}  inner radius: {}\n",
            config.position.x,
            config.position.y,
            format!("{:.1}", joystick.outer_radius()).green(),
            format!("{:.1}", joystick.inner_radius()).green()
        );
        for step in &steps {
            println!("{}", step.to_table_row());
        }
        println!();
    } else {
        for step in &steps {
            println!("{}", step.to_json_line()?);
        }
    }

    Ok(())
}

fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // Logs go to stderr so replay output on stdout stays machine-readable
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false),
        )
        .init();

    Ok(())
}
