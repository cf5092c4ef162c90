//! Full-snapshot undo history.

use gridscrub_engine::engine::Grid;

use crate::error::{GridscrubError, Result};

/// Maximum number of undo snapshots to keep
pub(crate) const MAX_UNDO_STACK: usize = 100;

/// Undo/redo stacks of full grid snapshots.
///
/// A snapshot is a deep, independent copy pushed before a mutating operation
/// begins; undo replaces the grid wholesale. No partial/delta undo.
#[derive(Clone, Debug, Default)]
pub struct UndoHistory {
    undo_stack: Vec<Grid>,
    redo_stack: Vec<Grid>,
}

impl UndoHistory {
    pub fn new() -> UndoHistory {
        UndoHistory::default()
    }

    /// Push a snapshot of the grid about to be mutated. Any redo state is
    /// invalidated.
    pub fn snapshot(&mut self, grid: &Grid) {
        self.undo_stack.push(grid.clone());
        self.redo_stack.clear();
        if self.undo_stack.len() > MAX_UNDO_STACK {
            self.undo_stack.remove(0);
        }
    }

    /// Pop the most recent snapshot; `current` moves onto the redo stack.
    pub fn undo(&mut self, current: &Grid) -> Result<Grid> {
        match self.undo_stack.pop() {
            Some(grid) => {
                self.redo_stack.push(current.clone());
                Ok(grid)
            }
            None => Err(GridscrubError::NothingToUndo),
        }
    }

    /// Pop the most recent redo state; `current` moves back onto the undo
    /// stack.
    pub fn redo(&mut self, current: &Grid) -> Result<Grid> {
        match self.redo_stack.pop() {
            Some(grid) => {
                self.undo_stack.push(current.clone());
                Ok(grid)
            }
            None => Err(GridscrubError::NothingToRedo),
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
