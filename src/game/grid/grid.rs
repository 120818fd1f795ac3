use crate::game::error::{GameError, Result};
use crate::game::types::{EntityId, Position};

/// Fixed-size `rows x cols` occupancy map.
///
/// Each cell is empty or holds the handle of exactly one entity. The grid only
/// records occupancy; entity lifetime belongs to `GameState`. Coordinates are
/// never clamped here: callers validate bounds first, and a bad coordinate is
/// reported as `GameError::OutOfBounds`.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Option<EntityId>>,
    /// Incremented on every write, so renderers can tell when the grid changed.
    revision: u64,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
            revision: 0,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    fn index(&self, pos: Position) -> Result<usize> {
        if !self.contains(pos) {
            return Err(GameError::OutOfBounds {
                row: pos.row,
                col: pos.col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(pos.row * self.cols + pos.col)
    }

    pub fn at(&self, pos: Position) -> Result<Option<EntityId>> {
        let idx = self.index(pos)?;
        Ok(self.cells[idx])
    }

    pub fn set(&mut self, pos: Position, id: EntityId) -> Result<()> {
        let idx = self.index(pos)?;
        self.cells[idx] = Some(id);
        self.revision += 1;
        Ok(())
    }

    pub fn clear(&mut self, pos: Position) -> Result<()> {
        let idx = self.index(pos)?;
        self.cells[idx] = None;
        self.revision += 1;
        Ok(())
    }

    /// Clear `pos` only if it still refers to `id`.
    pub fn clear_if(&mut self, pos: Position, id: EntityId) -> Result<bool> {
        if self.at(pos)? == Some(id) {
            self.clear(pos)?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Every occupied cell with its occupant, row-major.
    pub fn occupied(&self) -> impl Iterator<Item = (Position, EntityId)> + '_ {
        let cols = self.cols;
        self.cells.iter().enumerate().filter_map(move |(idx, cell)| {
            cell.map(|id| (Position::new(idx / cols, idx % cols), id))
        })
    }
}
