//! 2D occupancy board for the world.

use wator_core::{AgentId, Error, Position, Result};

/// A bounded 2D board mapping each cell to the agent standing on it.
///
/// The board is the single source of truth for "who is where". Cells hold
/// agent ids, never agent state; the registry owns the agents themselves.
#[derive(Debug, Clone)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    cells: Vec<Option<AgentId>>,
}

impl Grid {
    /// Allocate an empty board.
    ///
    /// Fails with `ResourceExhausted` when the cell vector cannot be
    /// allocated, rather than aborting the process.
    pub fn new(width: i32, height: i32) -> Result<Self> {
        let size = (width as i64)
            .checked_mul(height as i64)
            .and_then(|area| usize::try_from(area).ok())
            .ok_or_else(|| {
                Error::ResourceExhausted(format!("board {}x{} is too large", width, height))
            })?;

        let mut cells = Vec::new();
        cells.try_reserve_exact(size).map_err(|_| {
            Error::ResourceExhausted(format!("failed to allocate {} board cells", size))
        })?;
        cells.resize(size, None);

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Agent occupying the cell, if any. `pos` must be in bounds.
    pub fn get(&self, pos: Position) -> Option<AgentId> {
        self.cells[pos.to_index(self.width)]
    }

    /// Put an agent on an empty cell.
    ///
    /// Placing onto an occupied cell means the tick resolution lost track
    /// of occupancy; that is reported as an invariant violation rather
    /// than silently overwriting the occupant.
    pub fn place(&mut self, pos: Position, id: AgentId) -> Result<()> {
        let index = pos.to_index(self.width);
        if let Some(occupant) = self.cells[index] {
            return Err(Error::InvariantViolation(format!(
                "cell ({}, {}) already holds agent {}, cannot place agent {}",
                pos.x, pos.y, occupant, id
            )));
        }
        self.cells[index] = Some(id);
        Ok(())
    }

    /// Clear a cell. Clearing an already-empty cell is a no-op.
    pub fn vacate(&mut self, pos: Position) {
        self.cells[pos.to_index(self.width)] = None;
    }

    /// Total number of cells
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    /// Iterator over all cells with their positions, row by row
    pub fn iter(&self) -> impl Iterator<Item = (Position, Option<AgentId>)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &cell)| (Position::from_index(i, self.width), cell))
    }
}
