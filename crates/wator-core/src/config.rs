//! Configuration types for the simulation.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Board and population parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Width of the board (columns)
    pub width: i32,
    /// Height of the board (rows)
    pub height: i32,
    /// Number of prey placed at startup
    pub initial_prey: u32,
    /// Number of predators placed at startup
    pub initial_predators: u32,
    /// Number of ticks to run
    pub max_ticks: u64,
    /// Random seed for reproducibility
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            initial_prey: 10,
            initial_predators: 4,
            max_ticks: 100,
            seed: 0,
        }
    }
}

impl SimulationConfig {
    /// Total number of cells on the board
    pub fn area(&self) -> i64 {
        self.width as i64 * self.height as i64
    }

    /// Check the constraints the engine assumes hold before any state is
    /// built: positive dimensions, positive populations and tick budget,
    /// and a population that fits on the board.
    pub fn validate(&self) -> Result<()> {
        if self.width <= 0 || self.height <= 0 {
            return Err(Error::Configuration(format!(
                "board dimensions must be greater than 0, got {}x{}",
                self.width, self.height
            )));
        }

        if self.initial_prey == 0 || self.initial_predators == 0 {
            return Err(Error::Configuration(
                "initial populations must be greater than 0".to_string(),
            ));
        }

        if self.max_ticks == 0 {
            return Err(Error::Configuration(
                "tick budget must be greater than 0".to_string(),
            ));
        }

        let population = self.initial_prey as i64 + self.initial_predators as i64;
        if population > self.area() {
            return Err(Error::Configuration(format!(
                "population {} exceeds board capacity {}",
                population,
                self.area()
            )));
        }

        Ok(())
    }
}

/// Behavior rules that can be adjusted without touching the engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Ticks a predator survives without feeding; it dies once its
    /// starvation counter exceeds this value
    pub starvation_threshold: u32,
    /// Allow agents to breed
    pub breeding: bool,
    /// Ticks between prey breeding attempts
    pub prey_breed_interval: u32,
    /// Ticks between predator breeding attempts
    pub predator_breed_interval: u32,
    /// Stop the run once either species is extinct
    pub stop_on_extinction: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            starvation_threshold: 4,
            breeding: false,
            prey_breed_interval: 3,
            predator_breed_interval: 8,
            stop_on_extinction: false,
        }
    }
}

impl RulesConfig {
    pub fn validate(&self) -> Result<()> {
        if self.breeding && (self.prey_breed_interval == 0 || self.predator_breed_interval == 0) {
            return Err(Error::Configuration(
                "breed intervals must be greater than 0 when breeding is enabled".to_string(),
            ));
        }

        Ok(())
    }
}
