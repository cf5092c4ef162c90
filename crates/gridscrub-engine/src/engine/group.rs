//! Prefix-family row ordering and group numbering.
//!
//! Rows are classified by two marker families found in a designated primary
//! column, ordered family A first then family B, and numbered so that
//! contiguous runs sharing a sort key share a group number. Group numbers
//! start at 1 and increase by exactly 1 at each key change; a downstream
//! consumer alternates banding on their parity.

use regex::Regex;

use super::apply::PassReport;
use super::grid::{Grid, GridError};
use super::matcher;

/// Marker identifying family A rows.
pub const FAMILY_A_MARKER: &str = "X1:";
/// Marker identifying family B rows.
pub const FAMILY_B_MARKER: &str = "F11-X";

/// Designated columns for a sort-and-number pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GroupPlan {
    /// Column holding the family value after normalization.
    pub primary: usize,
    /// Column whose value is swapped into `primary` when only it matches.
    pub secondary: usize,
    /// Trailing column receiving group numbers.
    pub group: usize,
}

struct Keyed {
    key: String,
    full: String,
    row: Vec<String>,
}

/// Reorder rows by prefix family and assign group numbers.
///
/// Family A rows come first, ascending by sort key (the primary value cut at
/// the first `-`); then family B rows, ascending by key (the primary value
/// cut after the `F11-X<digits>` digit run) with ties broken by the full
/// primary value; then unclassified rows in their original relative order.
/// Group numbers are written into the plan's group column for every
/// classified row; unclassified rows receive none.
pub fn sort_and_number(grid: &mut Grid, plan: &GroupPlan) -> Result<PassReport, GridError> {
    grid.check_columns([plan.primary, plan.secondary, plan.group])?;
    let family_b_key = Regex::new(&format!("(?i){}[0-9]+", regex::escape(FAMILY_B_MARKER)))
        .expect("family B key pattern is valid");

    let mut report = PassReport::default();

    // Ensure the family value sits in the primary column.
    for row in 0..grid.row_count() {
        let primary = grid.text(row, plan.primary);
        let secondary = grid.text(row, plan.secondary);
        if !in_family(primary) && in_family(secondary) {
            let p = grid.take(row, plan.primary);
            let s = grid.take(row, plan.secondary);
            grid.set(row, plan.primary, s);
            grid.set(row, plan.secondary, p);
            report.cells_written += 2;
        }
    }

    let mut family_a = Vec::new();
    let mut family_b = Vec::new();
    let mut rest = Vec::new();
    for row in grid.take_rows() {
        let primary = row[plan.primary].clone();
        if matcher::matches(&primary, FAMILY_A_MARKER) {
            let key = match primary.find('-') {
                Some(cut) => primary[..cut].to_string(),
                None => primary.clone(),
            };
            family_a.push(Keyed {
                key,
                full: primary,
                row,
            });
        } else if matcher::matches(&primary, FAMILY_B_MARKER) {
            let key = match family_b_key.find(&primary) {
                Some(found) => primary[..found.end()].to_string(),
                None => primary.clone(),
            };
            family_b.push(Keyed {
                key,
                full: primary,
                row,
            });
        } else {
            rest.push(row);
        }
    }

    // Vec::sort_by is stable, so equal keys keep their original order.
    family_a.sort_by(|x, y| x.key.cmp(&y.key));
    family_b.sort_by(|x, y| x.key.cmp(&y.key).then_with(|| x.full.cmp(&y.full)));

    let mut rows = Vec::with_capacity(family_a.len() + family_b.len() + rest.len());
    let mut group = 0u32;
    let mut prev_key: Option<String> = None;
    for keyed in family_a.into_iter().chain(family_b) {
        if prev_key.as_deref() != Some(keyed.key.as_str()) {
            group += 1;
            prev_key = Some(keyed.key);
        }
        let mut row = keyed.row;
        row[plan.group] = group.to_string();
        report.rows_matched += 1;
        report.cells_written += 1;
        rows.push(row);
    }
    rows.extend(rest);
    grid.set_rows(rows);
    Ok(report)
}

fn in_family(value: &str) -> bool {
    matcher::matches(value, FAMILY_A_MARKER) || matcher::matches(value, FAMILY_B_MARKER)
}
