//! Configuration file loading.
//!
//! The format is one `Key: value` pair per line:
//!
//! ```text
//! Board length: 10
//! Board width: 8
//! Prey: 12
//! Predators: 4
//! Iterations: 100
//! Seed: 42
//! ```
//!
//! `Board length` is the number of columns and `Board width` the number of
//! rows. `Seed` is optional; when absent the current time seeds the run,
//! so repeated runs differ. Unknown keys are ignored.

use std::fs;
use std::path::Path;
use wator_core::{Error, Result, SimulationConfig};

pub fn load_config(path: &Path) -> Result<SimulationConfig> {
    let contents = fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> Result<SimulationConfig> {
    let mut width = None;
    let mut height = None;
    let mut prey = None;
    let mut predators = None;
    let mut iterations = None;
    let mut seed = None;

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some((key, value)) = line.split_once(':') else {
            return Err(Error::Configuration(format!(
                "malformed line '{}', expected 'Key: value'",
                line
            )));
        };

        match key.trim() {
            "Board length" => width = Some(parse_value(key, value)?),
            "Board width" => height = Some(parse_value(key, value)?),
            "Prey" => prey = Some(parse_value(key, value)?),
            "Predators" => predators = Some(parse_value(key, value)?),
            "Iterations" => iterations = Some(parse_value(key, value)?),
            "Seed" => seed = Some(parse_value(key, value)?),
            // Unknown keys are ignored
            _ => {}
        }
    }

    let config = SimulationConfig {
        width: narrow(
            "Board length",
            width.ok_or_else(|| missing("Board length"))?,
        )?,
        height: narrow("Board width", height.ok_or_else(|| missing("Board width"))?)?,
        initial_prey: narrow("Prey", prey.ok_or_else(|| missing("Prey"))?)?,
        initial_predators: narrow("Predators", predators.ok_or_else(|| missing("Predators"))?)?,
        max_ticks: narrow("Iterations", iterations.ok_or_else(|| missing("Iterations"))?)?,
        seed: match seed {
            Some(value) => value as u64,
            None => default_seed(),
        },
    };

    config.validate()?;
    Ok(config)
}

fn parse_value(key: &str, value: &str) -> Result<i64> {
    value.trim().parse::<i64>().map_err(|_| {
        Error::Configuration(format!(
            "could not convert '{}' (value for {}) to an integer",
            value.trim(),
            key.trim()
        ))
    })
}

fn missing(key: &str) -> Error {
    Error::Configuration(format!("missing required key '{}'", key))
}

fn narrow<T: TryFrom<i64>>(key: &str, value: i64) -> Result<T> {
    T::try_from(value)
        .map_err(|_| Error::Configuration(format!("value {} for {} is out of range", value, key)))
}

fn default_seed() -> u64 {
    chrono::Utc::now().timestamp_millis() as u64
}
