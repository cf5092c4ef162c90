//! Grid storage for the cleanup engine.
//!
//! A [`Grid`] is a rectangular table of text cells. The column count is fixed
//! for the grid's lifetime; rows may be removed but a row is never shorter
//! than the column count. The empty string is the absent value - every
//! matching and compaction primitive treats the two identically.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors reported by engine passes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("column {column} is out of range (grid has {width} columns)")]
    ColumnOutOfRange { column: usize, width: usize },

    #[error("match text must not be empty")]
    EmptyFragment,

    #[error("option {option} is not defined ({available} options available)")]
    BadOptionIndex { option: usize, available: usize },

    #[error("rule carries {count} payload values but only {limit} are accepted")]
    TooManyValues { count: usize, limit: usize },
}

/// A rectangular, mutable table of text cells.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    rows: Vec<Vec<String>>,
    width: usize,
}

impl Grid {
    /// Create an empty grid with the given column count.
    pub fn new(width: usize) -> Grid {
        Grid {
            rows: Vec::new(),
            width,
        }
    }

    /// Build a grid from rows, padding or truncating each row to `width`.
    pub fn from_rows(rows: Vec<Vec<String>>, width: usize) -> Grid {
        let mut grid = Grid::new(width);
        for row in rows {
            grid.push_row(row);
        }
        grid
    }

    /// Append a row, padding or truncating it to the grid width.
    pub fn push_row(&mut self, mut row: Vec<String>) {
        row.resize(self.width, String::new());
        self.rows.push(row);
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Cell text at `(row, col)`; out-of-range positions read as absent.
    pub fn text(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map_or("", String::as_str)
    }

    /// Overwrite a cell. `row` and `col` must be in range.
    pub fn set(&mut self, row: usize, col: usize, value: impl Into<String>) {
        self.rows[row][col] = value.into();
    }

    /// Clear a cell, reporting whether it held a value. Clearing an
    /// already-blank cell is a no-op.
    pub fn clear(&mut self, row: usize, col: usize) -> bool {
        let had_value = !self.rows[row][col].is_empty();
        self.rows[row][col].clear();
        had_value
    }

    /// Move a cell's text out, leaving the cell blank.
    pub fn take(&mut self, row: usize, col: usize) -> String {
        std::mem::take(&mut self.rows[row][col])
    }

    pub fn is_blank(&self, row: usize, col: usize) -> bool {
        self.text(row, col).is_empty()
    }

    pub fn row_is_blank(&self, row: usize) -> bool {
        self.rows[row].iter().all(|cell| cell.is_empty())
    }

    pub fn remove_row(&mut self, row: usize) -> Vec<String> {
        self.rows.remove(row)
    }

    /// Validate a column reference before a matching pass begins.
    pub fn check_column(&self, column: usize) -> Result<(), GridError> {
        if column < self.width {
            Ok(())
        } else {
            Err(GridError::ColumnOutOfRange {
                column,
                width: self.width,
            })
        }
    }

    /// Validate a set of column references at once.
    pub fn check_columns<I>(&self, columns: I) -> Result<(), GridError>
    where
        I: IntoIterator<Item = usize>,
    {
        for column in columns {
            self.check_column(column)?;
        }
        Ok(())
    }

    pub(crate) fn take_rows(&mut self) -> Vec<Vec<String>> {
        std::mem::take(&mut self.rows)
    }

    pub(crate) fn set_rows(&mut self, rows: Vec<Vec<String>>) {
        debug_assert!(
            rows.iter().all(|row| row.len() == self.width),
            "rows must match the grid width"
        );
        self.rows = rows;
    }
}
