//! Neighborhood scanning and classification.

use crate::agent::AgentRegistry;
use crate::grid::Grid;
use wator_core::{Direction, Error, Position, Result, Species};

/// The in-bounds orthogonal neighbors of a cell, classified by occupant.
///
/// Bucket contents follow the scan order (east, west, north, south), which
/// keeps seeded random picks stable between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Neighborhood {
    pub empty: Vec<Position>,
    pub prey: Vec<Position>,
    pub predators: Vec<Position>,
}

impl Neighborhood {
    /// Scan the four orthogonal neighbors of `pos`.
    ///
    /// Cells beyond the board edge are omitted. There is no wrapping: a
    /// cell in the last column has no east neighbor even though the next
    /// row-major index exists, and likewise for the first column, top row,
    /// and bottom row.
    pub fn scan(grid: &Grid, registry: &AgentRegistry, pos: Position) -> Result<Self> {
        let mut neighborhood = Self::default();

        for direction in Direction::all() {
            let (dx, dy) = direction.to_delta();
            let neighbor = pos.add(dx, dy);
            if !grid.in_bounds(neighbor) {
                continue;
            }

            match grid.get(neighbor) {
                None => neighborhood.empty.push(neighbor),
                Some(id) => {
                    let agent = registry.get(id).ok_or_else(|| {
                        Error::InvariantViolation(format!(
                            "cell ({}, {}) references agent {} which is not in the registry",
                            neighbor.x, neighbor.y, id
                        ))
                    })?;
                    match agent.species {
                        Species::Prey => neighborhood.prey.push(neighbor),
                        Species::Predator => neighborhood.predators.push(neighbor),
                    }
                }
            }
        }

        Ok(neighborhood)
    }
}
