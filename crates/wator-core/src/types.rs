//! Core type definitions for the simulation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an agent.
///
/// Ids are handed out sequentially by the registry and never reused, so a
/// fixed seed produces the same id sequence on every run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub u64);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Agent species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    Prey,
    Predator,
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Species::Prey => write!(f, "prey"),
            Species::Predator => write!(f, "predator"),
        }
    }
}

/// Contents of a single board cell as seen by a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellContent {
    Empty,
    Prey,
    Predator,
}

impl From<Species> for CellContent {
    fn from(species: Species) -> Self {
        match species {
            Species::Prey => CellContent::Prey,
            Species::Predator => CellContent::Predator,
        }
    }
}

/// 2D position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn add(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Row-major cell index for a board of the given width
    pub fn to_index(&self, width: i32) -> usize {
        (self.y * width + self.x) as usize
    }

    /// Position from a row-major cell index
    pub fn from_index(index: usize, width: i32) -> Self {
        Self {
            x: (index as i32) % width,
            y: (index as i32) / width,
        }
    }
}

/// Direction for movement.
///
/// The board has orthogonal adjacency only; there are no diagonal moves
/// and no wrapping at the edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    East,
    West,
    North,
    South,
}

impl Direction {
    pub fn to_delta(&self) -> (i32, i32) {
        match self {
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::North => (0, -1),
            Direction::South => (0, 1),
        }
    }

    /// All four directions, in the order neighbors are scanned.
    pub fn all() -> [Direction; 4] {
        [
            Direction::East,
            Direction::West,
            Direction::North,
            Direction::South,
        ]
    }
}

/// Read-only view of the board at the end of a tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub width: i32,
    pub height: i32,
    pub tick: u64,
    pub cells: Vec<CellContent>,
}

impl Snapshot {
    pub fn get(&self, pos: Position) -> CellContent {
        self.cells[pos.to_index(self.width)]
    }

    /// Iterator over all cells with their positions, row by row
    pub fn iter(&self) -> impl Iterator<Item = (Position, CellContent)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &cell)| (Position::from_index(i, self.width), cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        let width = 7;
        for index in 0..35 {
            let pos = Position::from_index(index, width);
            assert_eq!(pos.to_index(width), index);
        }

        assert_eq!(Position::from_index(0, width), Position::new(0, 0));
        assert_eq!(Position::from_index(6, width), Position::new(6, 0));
        assert_eq!(Position::from_index(7, width), Position::new(0, 1));
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::East.to_delta(), (1, 0));
        assert_eq!(Direction::West.to_delta(), (-1, 0));
        assert_eq!(Direction::North.to_delta(), (0, -1));
        assert_eq!(Direction::South.to_delta(), (0, 1));
    }

    #[test]
    fn test_cell_content_from_species() {
        assert_eq!(CellContent::from(Species::Prey), CellContent::Prey);
        assert_eq!(CellContent::from(Species::Predator), CellContent::Predator);
    }

    #[test]
    fn test_snapshot_get() {
        let snapshot = Snapshot {
            width: 2,
            height: 1,
            tick: 0,
            cells: vec![CellContent::Prey, CellContent::Empty],
        };

        assert_eq!(snapshot.get(Position::new(0, 0)), CellContent::Prey);
        assert_eq!(snapshot.get(Position::new(1, 0)), CellContent::Empty);
    }
}
