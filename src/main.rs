// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use hospital_network::config::{AppConfig, DEFAULT_CONFIG_FILE};
use hospital_network::demo::{self, DEMO_PATIENT};
use hospital_network::{logging, HospitalNetwork};

#[derive(Parser)]
#[command(name = "hospital")]
#[command(about = "Manage a regional hospital network from the terminal", version)]
struct Cli {
    /// Configuration file (optional)
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Pre-load the demonstration network
    #[arg(long)]
    seed: bool,

    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the scripted demonstration and print a report
    Demo {
        /// Print the patient's record as JSON instead
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config)?;
    let now = Local::now().naive_local();

    match cli.command {
        Some(Command::Demo { json }) => run_demo(&config, cli.verbose, now, json)?,
        // UI mode (default)
        None => run_ui_mode(&config, cli.verbose, cli.seed || config.seed_demo, now)?,
    }

    Ok(())
}

fn run_demo(config: &AppConfig, verbose: bool, now: NaiveDateTime, json: bool) -> Result<()> {
    logging::init_cli_logger(&config.log, verbose)?;

    let mut network = HospitalNetwork::new();
    demo::seed_network(&mut network).context("Failed to seed the demonstration network")?;
    let report = demo::run_scenario(&mut network, now).context("Demonstration scenario failed")?;

    if json {
        let record = network.record(DEMO_PATIENT)?;
        println!("{}", serde_json::to_string_pretty(record)?);
        return Ok(());
    }

    println!("🏥 Hospital Network - demonstration");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for line in report {
        println!("{}", line);
    }
    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(config: &AppConfig, verbose: bool, seed: bool, now: NaiveDateTime) -> Result<()> {
    logging::init_file_logger(&config.log, verbose)?;

    let mut network = HospitalNetwork::new();
    if seed {
        demo::seed_network(&mut network).context("Failed to seed the demonstration network")?;
    }

    let mut app = ui::App::new(network, &config.form_defaults(now));
    ui::run_ui(&mut app)?;

    println!("✅ Session closed (log: {})", config.log.file.display());
    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_config: &AppConfig, _verbose: bool, _seed: bool, _now: NaiveDateTime) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or run the scripted walkthrough: hospital demo");
    std::process::exit(1);
}
