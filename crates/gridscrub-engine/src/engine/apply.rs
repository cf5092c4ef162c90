//! Rule-application passes over the grid.
//!
//! Every pass validates its column references against the grid width before
//! any matching begins; an out-of-range reference aborts the whole pass with
//! the grid untouched. Rules are expected in ascending priority order (the
//! order a rule list's snapshot yields them); where rules are mutually
//! exclusive the first match per row wins.

use super::grid::{Grid, GridError};
use super::matcher;
use super::rules::{AdjacencyRule, ContainsAction, ContainsRule, PairAction, PairRule};

/// The two designated columns a pair-rule pass matches against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PairColumns {
    pub first: usize,
    pub second: usize,
}

/// Designated columns for a contains-rule pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContainsColumns {
    /// Column whose value is probed for the rule fragment.
    pub probe: usize,
    /// Column receiving group labels.
    pub group: usize,
}

/// Counters reported by every engine pass, for caller status display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PassReport {
    pub rows_matched: usize,
    pub cells_cleared: usize,
    pub cells_written: usize,
    pub rows_removed: usize,
}

/// Apply pair rules with their payloads: delete the matched row, or write
/// the rule's values into `value_targets`. First matching rule wins per row.
pub fn apply_pair_rules(
    grid: &mut Grid,
    rules: &[PairRule],
    cols: PairColumns,
    value_targets: &[usize],
) -> Result<PassReport, GridError> {
    grid.check_columns([cols.first, cols.second])?;
    grid.check_columns(value_targets.iter().copied())?;
    for rule in rules {
        if let PairAction::SetValues(values) = &rule.action {
            if values.len() > value_targets.len() {
                return Err(GridError::TooManyValues {
                    count: values.len(),
                    limit: value_targets.len(),
                });
            }
        }
    }

    let mut report = PassReport::default();
    let mut doomed = Vec::new();
    for row in 0..grid.row_count() {
        let matched = rules.iter().find(|rule| {
            matcher::pair_equals(
                grid.text(row, cols.first),
                grid.text(row, cols.second),
                &rule.first,
                &rule.second,
            )
        });
        let Some(rule) = matched else { continue };
        report.rows_matched += 1;
        match &rule.action {
            PairAction::DeleteRow => doomed.push(row),
            PairAction::SetValues(values) => {
                for (value, &target) in values.iter().zip(value_targets) {
                    grid.set(row, target, value.clone());
                    report.cells_written += 1;
                }
            }
        }
    }
    // Delete last-to-first so earlier indices stay valid.
    for &row in doomed.iter().rev() {
        grid.remove_row(row);
        report.rows_removed += 1;
    }
    Ok(report)
}

/// Clear both designated cells of every row matched by a pair rule,
/// ignoring payloads. First matching rule wins per row; the matched pair is
/// not tested against further rules once cleared.
pub fn clear_pair_matches(
    grid: &mut Grid,
    rules: &[PairRule],
    cols: PairColumns,
) -> Result<PassReport, GridError> {
    grid.check_columns([cols.first, cols.second])?;

    let mut report = PassReport::default();
    for row in 0..grid.row_count() {
        let hit = rules.iter().any(|rule| {
            matcher::pair_equals(
                grid.text(row, cols.first),
                grid.text(row, cols.second),
                &rule.first,
                &rule.second,
            )
        });
        if hit {
            report.rows_matched += 1;
            report.cells_cleared += usize::from(grid.clear(row, cols.first));
            report.cells_cleared += usize::from(grid.clear(row, cols.second));
        }
    }
    Ok(report)
}

/// Apply contains rules: probe one designated column for each rule's
/// fragment; the first matching rule assigns the row to an option (filling
/// `value_targets` from `option_fills`) or writes a group label.
pub fn apply_contains_rules(
    grid: &mut Grid,
    rules: &[ContainsRule],
    cols: ContainsColumns,
    option_fills: &[Vec<String>],
    value_targets: &[usize],
) -> Result<PassReport, GridError> {
    grid.check_columns([cols.probe, cols.group])?;
    grid.check_columns(value_targets.iter().copied())?;
    for rule in rules {
        if let ContainsAction::AssignOption(option) = rule.action {
            if option == 0 || option > option_fills.len() {
                return Err(GridError::BadOptionIndex {
                    option,
                    available: option_fills.len(),
                });
            }
            let fill = &option_fills[option - 1];
            if fill.len() > value_targets.len() {
                return Err(GridError::TooManyValues {
                    count: fill.len(),
                    limit: value_targets.len(),
                });
            }
        }
    }

    let mut report = PassReport::default();
    for row in 0..grid.row_count() {
        let matched = rules
            .iter()
            .find(|rule| matcher::matches(grid.text(row, cols.probe), &rule.fragment));
        let Some(rule) = matched else { continue };
        report.rows_matched += 1;
        match &rule.action {
            ContainsAction::AssignOption(option) => {
                for (value, &target) in option_fills[option - 1].iter().zip(value_targets) {
                    grid.set(row, target, value.clone());
                    report.cells_written += 1;
                }
            }
            ContainsAction::Group(label) => {
                grid.set(row, cols.group, label.clone());
                report.cells_written += 1;
            }
        }
    }
    Ok(report)
}

/// Clear every adjacent cell pair `(j, j+1)` where some rule's first
/// fragment matches cell `j` and its second fragment matches cell `j+1`.
pub fn clear_adjacent_matches(
    grid: &mut Grid,
    rules: &[AdjacencyRule],
) -> Result<PassReport, GridError> {
    let mut report = PassReport::default();
    for row in 0..grid.row_count() {
        let mut row_hit = false;
        for col in 0..grid.width().saturating_sub(1) {
            let hit = rules.iter().any(|rule| {
                matcher::matches(grid.text(row, col), &rule.first)
                    && matcher::matches(grid.text(row, col + 1), &rule.second)
            });
            if hit {
                row_hit = true;
                report.cells_cleared += usize::from(grid.clear(row, col));
                report.cells_cleared += usize::from(grid.clear(row, col + 1));
            }
        }
        if row_hit {
            report.rows_matched += 1;
        }
    }
    Ok(report)
}

/// Clear every cell containing `token` as a case-insensitive substring,
/// together with its immediate left and right neighbors in the same row.
/// Matches are located against the pre-pass contents, so a cell cleared as a
/// neighbor cannot un-match or re-match within the pass. Column-boundary
/// neighbors are skipped, not wrapped.
pub fn clear_literal_token(grid: &mut Grid, token: &str) -> Result<PassReport, GridError> {
    if token.is_empty() {
        return Err(GridError::EmptyFragment);
    }

    let mut hits = Vec::new();
    for row in 0..grid.row_count() {
        for col in 0..grid.width() {
            if matcher::matches(grid.text(row, col), token) {
                hits.push((row, col));
            }
        }
    }

    let mut report = PassReport::default();
    let mut last_row = None;
    for &(row, col) in &hits {
        if last_row != Some(row) {
            report.rows_matched += 1;
            last_row = Some(row);
        }
        if col > 0 {
            report.cells_cleared += usize::from(grid.clear(row, col - 1));
        }
        report.cells_cleared += usize::from(grid.clear(row, col));
        if col + 1 < grid.width() {
            report.cells_cleared += usize::from(grid.clear(row, col + 1));
        }
    }
    Ok(report)
}
