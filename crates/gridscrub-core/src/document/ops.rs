//! Mutating session operations.
//!
//! Every operation follows the same shape: run the engine pass against a
//! working copy of the grid (so a validation or structural error mutates
//! nothing), settle the result (upward compaction then empty-row pruning),
//! snapshot the old grid for undo, and commit. The settle pairing is
//! invariant across all call sites.

use gridscrub_engine::engine::{
    self, AdjacencyRule, ContainsColumns, ContainsRule, Grid, GridError, GroupPlan, PairColumns,
    PairRule, PassReport,
};

use super::Session;
use crate::error::Result;
use crate::rules::RuleList;

impl Session {
    /// Apply pair rules with their payloads (delete row / write values) to
    /// the two designated columns.
    pub fn apply_pair_rules(
        &mut self,
        rules: &RuleList<PairRule>,
        cols: PairColumns,
        value_targets: &[usize],
    ) -> Result<PassReport> {
        let rules = rules.snapshot();
        self.mutate(|grid| engine::apply_pair_rules(grid, &rules, cols, value_targets))
    }

    /// Clear both designated cells of every pair-rule match.
    pub fn clear_pair_matches(
        &mut self,
        rules: &RuleList<PairRule>,
        cols: PairColumns,
    ) -> Result<PassReport> {
        let rules = rules.snapshot();
        self.mutate(|grid| engine::clear_pair_matches(grid, &rules, cols))
    }

    /// Apply contains rules: option fills and group labels.
    pub fn apply_contains_rules(
        &mut self,
        rules: &RuleList<ContainsRule>,
        cols: ContainsColumns,
        option_fills: &[Vec<String>],
        value_targets: &[usize],
    ) -> Result<PassReport> {
        let rules = rules.snapshot();
        self.mutate(|grid| {
            engine::apply_contains_rules(grid, &rules, cols, option_fills, value_targets)
        })
    }

    /// Clear adjacent cell pairs matched by adjacency rules.
    pub fn apply_adjacency_rules(&mut self, rules: &RuleList<AdjacencyRule>) -> Result<PassReport> {
        let rules = rules.snapshot();
        self.mutate(|grid| engine::clear_adjacent_matches(grid, &rules))
    }

    /// Clear every cell containing the structural marker `token`, together
    /// with its immediate row neighbors.
    pub fn clear_token(&mut self, token: &str) -> Result<PassReport> {
        self.mutate(|grid| engine::clear_literal_token(grid, token))
    }

    /// Reorder rows by prefix family and assign banding group numbers.
    pub fn group_sort(&mut self, plan: &GroupPlan) -> Result<PassReport> {
        self.mutate(|grid| engine::sort_and_number(grid, plan))
    }

    /// Replace the grid with the most recent undo snapshot.
    pub fn undo(&mut self) -> Result<()> {
        let restored = self.history.undo(&self.grid)?;
        self.grid = restored;
        self.modified = true;
        Ok(())
    }

    /// Replace the grid with the most recently undone state.
    pub fn redo(&mut self) -> Result<()> {
        let restored = self.history.redo(&self.grid)?;
        self.grid = restored;
        self.modified = true;
        Ok(())
    }

    fn mutate<F>(&mut self, pass: F) -> Result<PassReport>
    where
        F: FnOnce(&mut Grid) -> std::result::Result<PassReport, GridError>,
    {
        let mut next = self.grid.clone();
        let mut report = pass(&mut next)?;
        report.rows_removed += engine::settle(&mut next);
        self.history.snapshot(&self.grid);
        self.grid = next;
        self.modified = true;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use gridscrub_engine::engine::{ContainsAction, PairAction, sort_and_number};

    use super::*;
    use crate::error::GridscrubError;

    fn grid(rows: &[&[&str]]) -> Grid {
        Grid::from_rows(
            rows.iter()
                .map(|row| row.iter().map(|cell| cell.to_string()).collect())
                .collect(),
            rows.first().map_or(0, |row| row.len()),
        )
    }

    fn pair_list(rules: Vec<PairRule>) -> RuleList<PairRule> {
        let mut list = RuleList::new();
        for rule in rules {
            list.add(rule).unwrap();
        }
        list
    }

    #[test]
    fn test_pair_delete_then_settle() {
        // Columns 5-6 hold the matched pair; exactly that row goes.
        let mut session = Session::new(grid(&[
            &["r1", "", "", "", "", "x", "y"],
            &["r2", "", "", "", "", "A1", "B1"],
            &["r3", "", "", "", "", "a", "b"],
        ]));
        let rules = pair_list(vec![
            PairRule::new("A1", "B1", PairAction::DeleteRow).unwrap(),
        ]);
        let report = session
            .apply_pair_rules(&rules, PairColumns { first: 5, second: 6 }, &[])
            .unwrap();
        assert_eq!(report.rows_removed, 1);
        assert_eq!(session.grid.row_count(), 2);
        assert_eq!(session.grid.text(0, 0), "r1");
        assert_eq!(session.grid.text(1, 0), "r3");
        assert!(session.modified);
    }

    #[test]
    fn test_adjacency_clear_then_compaction_shifts_column() {
        let mut session = Session::new(grid(&[
            &["foo", "BARtag", "baz"],
            &["keep1", "keep2", "keep3"],
        ]));
        let mut rules = RuleList::new();
        rules
            .add(AdjacencyRule::new("foo", "BARtag").unwrap())
            .unwrap();
        let report = session.apply_adjacency_rules(&rules).unwrap();
        assert_eq!(report.cells_cleared, 2);
        // Per-column gravity pulls the second row's cells up into the gaps.
        assert_eq!(session.grid.rows()[0], vec!["keep1", "keep2", "baz"]);
        assert_eq!(session.grid.rows()[1], vec!["", "", "keep3"]);
    }

    #[test]
    fn test_failed_pass_mutates_nothing() {
        let mut session = Session::new(grid(&[&["a", "b"]]));
        let rules = pair_list(vec![
            PairRule::new("a", "b", PairAction::DeleteRow).unwrap(),
        ]);
        let err = session
            .apply_pair_rules(&rules, PairColumns { first: 0, second: 9 }, &[])
            .unwrap_err();
        assert!(matches!(
            err,
            GridscrubError::Grid(GridError::ColumnOutOfRange { .. })
        ));
        assert_eq!(session.grid.row_count(), 1);
        assert!(!session.modified);
        assert!(!session.history.can_undo());
    }

    #[test]
    fn test_undo_restores_pre_operation_grid() {
        let mut session = Session::new(grid(&[&["MARK", "x"], &["keep", "y"]]));
        session.clear_token("mark").unwrap();
        assert_eq!(session.grid.row_count(), 1);

        session.undo().unwrap();
        assert_eq!(session.grid.row_count(), 2);
        assert_eq!(session.grid.text(0, 0), "MARK");

        session.redo().unwrap();
        assert_eq!(session.grid.row_count(), 1);
        assert_eq!(session.grid.text(0, 0), "keep");
    }

    #[test]
    fn test_undo_with_no_history_is_reported() {
        let mut session = Session::new(grid(&[&["a"]]));
        assert!(matches!(
            session.undo(),
            Err(GridscrubError::NothingToUndo)
        ));
    }

    #[test]
    fn test_group_sort_settles_after_reorder() {
        let mut session = Session::new(grid(&[
            &["", "", ""],
            &["X1:B-1", "", ""],
            &["X1:A-1", "", ""],
        ]));
        let plan = GroupPlan {
            primary: 0,
            secondary: 1,
            group: 2,
        };
        session.group_sort(&plan).unwrap();
        // The all-blank row is pruned by the settle pass.
        assert_eq!(session.grid.row_count(), 2);
        assert_eq!(session.grid.text(0, 0), "X1:A-1");
        assert_eq!(session.grid.text(1, 0), "X1:B-1");
    }

    #[test]
    fn test_contains_fill_then_settle() {
        let mut session = Session::new(grid(&[&["tagged", "", ""]]));
        let mut rules = RuleList::new();
        rules
            .add(ContainsRule::new("tag", ContainsAction::AssignOption(1)).unwrap())
            .unwrap();
        let report = session
            .apply_contains_rules(
                &rules,
                ContainsColumns { probe: 0, group: 2 },
                &[vec!["filled".to_string()]],
                &[1],
            )
            .unwrap();
        assert_eq!(report.cells_written, 1);
        assert_eq!(session.grid.rows()[0], vec!["tagged", "filled", ""]);
    }

    #[test]
    fn test_settle_pairing_applies_to_every_mutation() {
        // A clear that empties a row must leave no empty row behind.
        let mut session = Session::new(grid(&[&["solo", "MARK"], &["a", "b"]]));
        session.clear_token("mark").unwrap();
        assert_eq!(session.grid.row_count(), 1);
        assert_eq!(session.grid.rows()[0], vec!["a", "b"]);
    }

    #[test]
    fn test_group_sort_free_function_matches_session_wrapper() {
        let mut direct = grid(&[&["X1:A-1", "", ""]]);
        let plan = GroupPlan {
            primary: 0,
            secondary: 1,
            group: 2,
        };
        sort_and_number(&mut direct, &plan).unwrap();

        let mut session = Session::new(grid(&[&["X1:A-1", "", ""]]));
        session.group_sort(&plan).unwrap();
        assert_eq!(session.grid, direct);
    }
}
