//! End-to-end cleanup flows: rule editing, application, undo, persistence.

use gridscrub_core::rules::RuleSets;
use gridscrub_core::storage::{RuleRepository, TomlRuleRepository, load_or_default};
use gridscrub_core::{Grid, RuleList, Session};
use gridscrub_engine::engine::{
    AdjacencyRule, ContainsAction, ContainsRule, GroupPlan, PairAction, PairColumns, PairRule,
};

fn grid(rows: &[&[&str]]) -> Grid {
    Grid::from_rows(
        rows.iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect(),
        rows.first().map_or(0, |row| row.len()),
    )
}

fn temp_rules_path(tag: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "gridscrub_{}_{}_{}_{:?}.toml",
        tag,
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos(),
        std::thread::current().id(),
    ))
}

struct Cleanup(std::path::PathBuf);

impl Drop for Cleanup {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

#[test]
fn test_full_cleanup_session() {
    let mut session = Session::new(grid(&[
        &["X1:B-1", "", "note-b", ""],
        &["drop", "me", "now", ""],
        &["foo", "BARtag", "keep", ""],
        &["X1:A-1", "", "note-a", ""],
    ]));

    // Delete the (drop, me) row via a pair rule on columns 0-1.
    let mut pair = RuleList::new();
    pair.add(PairRule::new("DROP", "ME", PairAction::DeleteRow).unwrap())
        .unwrap();
    let report = session
        .apply_pair_rules(&pair, PairColumns { first: 0, second: 1 }, &[])
        .unwrap();
    assert_eq!(report.rows_removed, 1);
    assert_eq!(session.grid.row_count(), 3);

    // Clear the adjacent (foo, BARtag) pair; compaction pulls the column up.
    let mut adjacency = RuleList::new();
    adjacency
        .add(AdjacencyRule::new("foo", "bartag").unwrap())
        .unwrap();
    session.apply_adjacency_rules(&adjacency).unwrap();
    assert_eq!(session.grid.row_count(), 3);
    assert_eq!(session.grid.text(2, 0), "");

    // Group-sort the remaining family rows into banding order.
    let plan = GroupPlan {
        primary: 0,
        secondary: 1,
        group: 3,
    };
    session.group_sort(&plan).unwrap();
    assert_eq!(session.grid.text(0, 0), "X1:A-1");
    assert_eq!(session.grid.text(0, 3), "1");
    assert_eq!(session.grid.text(1, 0), "X1:B-1");
    assert_eq!(session.grid.text(1, 3), "2");

    // Three mutations, three undo steps back to the loaded grid.
    session.undo().unwrap();
    session.undo().unwrap();
    session.undo().unwrap();
    assert_eq!(session.grid.row_count(), 4);
    assert_eq!(session.grid.text(1, 0), "drop");
    assert!(session.undo().is_err());
}

#[test]
fn test_contains_rules_first_match_wins_in_priority_order() {
    let mut session = Session::new(grid(&[&["alpha beta", "", ""]]));

    let mut contains = RuleList::new();
    contains
        .add(ContainsRule::new("beta", ContainsAction::Group("B".into())).unwrap())
        .unwrap();
    contains
        .add(ContainsRule::new("alpha", ContainsAction::Group("A".into())).unwrap())
        .unwrap();

    session
        .apply_contains_rules(
            &contains,
            gridscrub_engine::engine::ContainsColumns { probe: 0, group: 2 },
            &[],
            &[],
        )
        .unwrap();
    // "beta" was added first, so it holds priority 1 and wins.
    assert_eq!(session.grid.text(0, 2), "B");
}

#[test]
fn test_toml_repository_round_trip() {
    let path = temp_rules_path("round_trip");
    let _cleanup = Cleanup(path.clone());

    let mut sets = RuleSets::default();
    sets.pair
        .add(PairRule::new("A1", "B1", PairAction::DeleteRow).unwrap())
        .unwrap();
    sets.pair
        .add(
            PairRule::new("A2", "B2", PairAction::SetValues(vec!["v1".into(), "v2".into()]))
                .unwrap(),
        )
        .unwrap();
    sets.contains
        .add(ContainsRule::new("frag", ContainsAction::AssignOption(1)).unwrap())
        .unwrap();
    sets.adjacency
        .add(AdjacencyRule::new("left", "right").unwrap())
        .unwrap();

    let mut repo = TomlRuleRepository::new(&path);
    repo.store(&sets).unwrap();
    let loaded = repo.load().unwrap();

    assert_eq!(loaded.pair.len(), 2);
    assert_eq!(loaded.contains.len(), 1);
    assert_eq!(loaded.adjacency.len(), 1);

    let rules: Vec<PairRule> = loaded.pair.snapshot();
    assert_eq!(rules[0].first, "A1");
    assert_eq!(rules[0].priority, 1);
    assert_eq!(
        rules[1].action,
        PairAction::SetValues(vec!["v1".to_string(), "v2".to_string()])
    );
}

#[test]
fn test_load_failure_falls_back_to_defaults_and_persists_them() {
    let path = temp_rules_path("fallback");
    let _cleanup = Cleanup(path.clone());
    std::fs::write(&path, "not valid toml [").unwrap();

    let mut repo = TomlRuleRepository::new(&path);
    let sets = load_or_default(&mut repo);
    assert!(sets.pair.is_empty());

    // The defaults were written back, so the next load succeeds directly.
    let reloaded = repo.load().unwrap();
    assert!(reloaded.pair.is_empty());
}

#[test]
fn test_loading_normalizes_persisted_records() {
    let path = temp_rules_path("normalize");
    let _cleanup = Cleanup(path.clone());
    std::fs::write(
        &path,
        r#"
[[pair]]
priority = 3
first = "late"
second = "pair"

[[pair]]
priority = 0
first = "discarded"
second = "pair"

[[pair]]
priority = 1
first = "early"
second = "pair"

[[pair]]
priority = 1
first = "shadowed"
second = "pair"
"#,
    )
    .unwrap();

    let repo = TomlRuleRepository::new(&path);
    let sets = repo.load().unwrap();
    let rules = sets.pair.snapshot();
    assert_eq!(rules.len(), 2);
    assert_eq!(rules[0].first, "early");
    assert_eq!(rules[0].priority, 1);
    assert_eq!(rules[1].first, "late");
    assert_eq!(rules[1].priority, 3);
}
