//! Persisted rule-set representation and repositories.

mod records;
mod repository;

pub use records::{AdjacencyRecord, ContainsRecord, PairRecord, RuleFile};
pub use repository::{
    MemoryRuleRepository, RuleRepository, TomlRuleRepository, load_or_default,
};
