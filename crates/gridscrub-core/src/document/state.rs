//! Session state for a grid cleanup run.

use gridscrub_engine::engine::Grid;

use super::history::UndoHistory;

/// UI-agnostic session state: the grid being cleaned, its undo history, and
/// a modified flag.
///
/// The session is owned by the caller and passed by reference into every
/// operation; the engine holds no ambient state. Rule lists are not owned
/// here - they are handed to the apply operations as immutable snapshots.
pub struct Session {
    /// The grid being transformed, replaced wholesale by undo/redo.
    pub grid: Grid,
    /// Snapshot stack backing undo/redo.
    pub history: UndoHistory,
    /// Whether the grid has been modified since the session started.
    pub modified: bool,
}

impl Session {
    /// Create a session around a freshly loaded grid.
    ///
    /// Side-effect free: no persistence is touched.
    pub fn new(grid: Grid) -> Session {
        Session {
            grid,
            history: UndoHistory::new(),
            modified: false,
        }
    }
}
