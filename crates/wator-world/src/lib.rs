//! World simulation engine.
//!
//! This crate implements the bounded 2D board where prey and predators
//! live, move, feed, and starve, one deterministic tick at a time.

pub mod agent;
pub mod behavior;
pub mod grid;
pub mod neighbors;
pub mod simulation;

pub use agent::{Agent, AgentRegistry};
pub use behavior::TurnOutcome;
pub use grid::Grid;
pub use neighbors::Neighborhood;
pub use simulation::{Simulation, SimulationResult};
