//! Simulation engine driving the tick loop.

use crate::agent::AgentRegistry;
use crate::behavior;
use crate::grid::Grid;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};
use wator_core::{CellContent, Position, Result, RulesConfig, SimulationConfig, Snapshot, Species};

/// The whole simulation state: board, agents, rules, RNG, and clock.
///
/// Single-threaded and synchronous; a tick runs to completion before
/// control returns, so the state observed between ticks is always
/// internally consistent.
pub struct Simulation {
    config: SimulationConfig,
    rules: RulesConfig,
    grid: Grid,
    registry: AgentRegistry,
    rng: ChaCha8Rng,
    tick: u64,
}

impl Simulation {
    /// Validate the configuration, allocate the board, and scatter the
    /// initial populations on distinct random cells.
    pub fn new(config: SimulationConfig, rules: RulesConfig) -> Result<Self> {
        config.validate()?;
        rules.validate()?;

        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        let grid = Grid::new(config.width, config.height)?;

        let mut sim = Self {
            config,
            rules,
            grid,
            registry: AgentRegistry::new(),
            rng,
            tick: 0,
        };

        for _ in 0..sim.config.initial_prey {
            sim.scatter(Species::Prey)?;
        }
        for _ in 0..sim.config.initial_predators {
            sim.scatter(Species::Predator)?;
        }

        info!(
            width = sim.config.width,
            height = sim.config.height,
            prey = sim.registry.prey_alive(),
            predators = sim.registry.predators_alive(),
            seed = sim.config.seed,
            "Simulation initialized"
        );

        Ok(sim)
    }

    /// Place one agent on a random unoccupied cell.
    fn scatter(&mut self, species: Species) -> Result<()> {
        // Validation guarantees the population fits, so a free cell
        // always exists and rejection sampling terminates.
        loop {
            let index = self.rng.gen_range(0..self.grid.area());
            let pos = Position::from_index(index, self.grid.width);
            if self.grid.get(pos).is_none() {
                let id = self.registry.spawn(species, pos);
                self.grid.place(pos, id)?;
                return Ok(());
            }
        }
    }

    /// Run the simulation to its tick budget and collect the result.
    pub fn run(&mut self) -> Result<SimulationResult> {
        info!(max_ticks = self.config.max_ticks, "Starting simulation");

        while self.tick < self.config.max_ticks {
            self.step()?;

            if self.rules.stop_on_extinction
                && (self.registry.prey_alive() == 0 || self.registry.predators_alive() == 0)
            {
                info!(tick = self.tick, "Species extinct, stopping early");
                break;
            }
        }

        self.emit_run_summary();
        Ok(self.result())
    }

    /// Execute one tick: every agent alive at the start of the tick acts
    /// at most once, in reverse spawn order. Agents removed earlier in
    /// the same tick are skipped when their turn comes.
    pub fn step(&mut self) -> Result<()> {
        for id in self.registry.turn_order() {
            if !self.registry.contains(id) {
                continue;
            }

            let outcome =
                behavior::take_turn(&mut self.grid, &mut self.registry, &self.rules, &mut self.rng, id)?;
            trace!(tick = self.tick, agent_id = %id, outcome = ?outcome, "Turn resolved");
        }

        self.tick += 1;

        if self.tick % 100 == 0 {
            self.emit_population_metrics();
        }

        Ok(())
    }

    /// Read-only view of the board and clock. Calling this twice without
    /// an intervening tick returns identical results.
    pub fn snapshot(&self) -> Snapshot {
        let cells = self
            .grid
            .iter()
            .map(|(_, cell)| match cell {
                Some(id) => self
                    .registry
                    .get(id)
                    .map(|agent| CellContent::from(agent.species))
                    .unwrap_or(CellContent::Empty),
                None => CellContent::Empty,
            })
            .collect();

        Snapshot {
            width: self.grid.width,
            height: self.grid.height,
            tick: self.tick,
            cells,
        }
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn prey_alive(&self) -> usize {
        self.registry.prey_alive()
    }

    pub fn predators_alive(&self) -> usize {
        self.registry.predators_alive()
    }

    fn emit_population_metrics(&self) {
        info!(
            event = "population_metrics",
            tick = self.tick,
            prey = self.registry.prey_alive(),
            predators = self.registry.predators_alive(),
            "Population snapshot"
        );
    }

    fn emit_run_summary(&self) {
        info!(
            event = "run_summary",
            final_tick = self.tick,
            prey = self.registry.prey_alive(),
            predators = self.registry.predators_alive(),
            "Run complete"
        );
    }

    /// Summarize the current state as a run result.
    pub fn result(&self) -> SimulationResult {
        debug!(tick = self.tick, "Collecting result");
        SimulationResult {
            ticks_run: self.tick,
            prey_alive: self.registry.prey_alive(),
            predators_alive: self.registry.predators_alive(),
            final_snapshot: self.snapshot(),
        }
    }
}

/// Outcome of a completed run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    pub ticks_run: u64,
    pub prey_alive: usize,
    pub predators_alive: usize,
    pub final_snapshot: Snapshot,
}
