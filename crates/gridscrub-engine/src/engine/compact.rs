//! Grid re-densification: upward compaction and empty-row pruning.

use super::grid::Grid;

/// Per column independently, slide non-blank cells upward preserving their
/// relative order, leaving blanks at the bottom of the column. A row may end
/// up holding cells that originated in different rows.
pub fn compact_upward(grid: &mut Grid) {
    for col in 0..grid.width() {
        let mut write = 0;
        for row in 0..grid.row_count() {
            if !grid.is_blank(row, col) {
                if row != write {
                    let value = grid.take(row, col);
                    grid.set(write, col, value);
                }
                write += 1;
            }
        }
    }
}

/// Delete every all-blank row, scanning last-to-first so earlier indices
/// stay valid during deletion. Returns the number of rows removed.
pub fn prune_empty_rows(grid: &mut Grid) -> usize {
    let mut removed = 0;
    for row in (0..grid.row_count()).rev() {
        if grid.row_is_blank(row) {
            grid.remove_row(row);
            removed += 1;
        }
    }
    removed
}

/// The invariant pairing applied after every mutating operation:
/// [`compact_upward`] then [`prune_empty_rows`]. Returns the rows pruned.
pub fn settle(grid: &mut Grid) -> usize {
    compact_upward(grid);
    prune_empty_rows(grid)
}
