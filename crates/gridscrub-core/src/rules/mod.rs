//! Rule-list maintenance: priority ordering, identity, edit transactions.

mod kinds;
mod list;

pub use list::{BatchOutcome, RuleId, RuleItem, RuleList, RuleListDraft};

use gridscrub_engine::engine::{AdjacencyRule, ContainsRule, PairRule};

/// The three rule lists an editing session works with, handed to the grid
/// engine as immutable snapshots at apply time.
#[derive(Clone, Debug, Default)]
pub struct RuleSets {
    pub pair: RuleList<PairRule>,
    pub contains: RuleList<ContainsRule>,
    pub adjacency: RuleList<AdjacencyRule>,
}

impl RuleSets {
    /// The built-in default set used when loading fails: empty lists.
    pub fn built_in() -> RuleSets {
        RuleSets::default()
    }
}
