//! Command-line entry point for the predator-prey simulation.

mod config_file;
mod render;
mod telemetry;

use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use tracing::info;
use wator_core::RulesConfig;
use wator_world::Simulation;

struct CliArgs {
    config_path: PathBuf,
    json_output: bool,
    quiet: bool,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<CliArgs> {
    let mut config_path = None;
    let mut json_output = false;
    let mut quiet = false;

    for arg in args {
        if arg == "--json" {
            json_output = true;
        } else if arg == "--quiet" {
            quiet = true;
        } else if arg.starts_with("--") {
            bail!("unexpected flag '{}'", arg);
        } else if config_path.is_none() {
            config_path = Some(PathBuf::from(arg));
        } else {
            bail!("unexpected argument '{}'", arg);
        }
    }

    let Some(config_path) = config_path else {
        bail!("usage: wator <config-file> [--json] [--quiet]");
    };

    Ok(CliArgs {
        config_path,
        json_output,
        quiet,
    })
}

fn main() -> Result<()> {
    telemetry::init_telemetry();

    let args = parse_args(std::env::args().skip(1))?;

    let config = config_file::load_config(&args.config_path)
        .with_context(|| format!("failed to load {}", args.config_path.display()))?;
    let max_ticks = config.max_ticks;

    info!(config = ?config, "Configuration loaded");

    let mut simulation = Simulation::new(config, RulesConfig::default())?;

    let result = if args.quiet {
        simulation.run()?
    } else {
        println!("{}", render::draw(&simulation.snapshot()));
        for _ in 0..max_ticks {
            simulation.step()?;
            println!("{}", render::draw(&simulation.snapshot()));
        }
        simulation.result()
    };

    info!(
        ticks = result.ticks_run,
        prey = result.prey_alive,
        predators = result.predators_alive,
        "Simulation finished"
    );

    if args.json_output {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    Ok(())
}
