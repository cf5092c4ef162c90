//! Grid cleanup engine API.
//!
//! This module provides the computation layer for rule-driven grid cleanup:
//!
//! - [`Grid`] - Fixed-width table of text cells (empty string = absent)
//! - [`matches`], [`pair_equals`] - Case-insensitive matching primitives
//! - [`PairRule`], [`ContainsRule`], [`AdjacencyRule`] - Rule variants
//! - [`apply_pair_rules`], [`clear_pair_matches`], [`apply_contains_rules`],
//!   [`clear_adjacent_matches`], [`clear_literal_token`] - Matching passes
//! - [`compact_upward`], [`prune_empty_rows`], [`settle`] - Grid re-densification
//! - [`sort_and_number`] - Prefix-family row ordering and group numbering

mod apply;
mod compact;
mod grid;
mod group;
mod matcher;
mod rules;

pub use apply::{
    ContainsColumns, PairColumns, PassReport, apply_contains_rules, apply_pair_rules,
    clear_adjacent_matches, clear_literal_token, clear_pair_matches,
};
pub use compact::{compact_upward, prune_empty_rows, settle};
pub use grid::{Grid, GridError};
pub use group::{FAMILY_A_MARKER, FAMILY_B_MARKER, GroupPlan, sort_and_number};
pub use matcher::{eq_ignore_case, matches, pair_equals};
pub use rules::{AdjacencyRule, ContainsAction, ContainsRule, MAX_PAIR_VALUES, PairAction, PairRule};
