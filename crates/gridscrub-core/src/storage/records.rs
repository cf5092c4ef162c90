//! Flat persisted representation of rule sets.
//!
//! Each rule serializes to a flat record: a `priority` integer plus the
//! variant's text fields. Normalization - drop records with non-positive
//! priorities, collapse duplicate priorities to the first occurrence, sort
//! ascending - is applied on both load and save so a round-trip always
//! yields a normalized file.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use gridscrub_engine::engine::{
    AdjacencyRule, ContainsAction, ContainsRule, PairAction, PairRule,
};

use crate::rules::{RuleList, RuleSets};

/// On-disk shape of the three rule lists.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleFile {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pair: Vec<PairRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contains: Vec<ContainsRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub adjacency: Vec<AdjacencyRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PairRecord {
    pub priority: i64,
    pub first: String,
    pub second: String,
    /// Empty = delete-row payload; one to three entries = write payload.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContainsRecord {
    pub priority: i64,
    pub fragment: String,
    /// 1-based option index; exactly one of `option`/`group` must be set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AdjacencyRecord {
    pub priority: i64,
    pub first: String,
    pub second: String,
}

pub(crate) trait FlatRecord {
    fn priority(&self) -> i64;
}

impl FlatRecord for PairRecord {
    fn priority(&self) -> i64 {
        self.priority
    }
}

impl FlatRecord for ContainsRecord {
    fn priority(&self) -> i64 {
        self.priority
    }
}

impl FlatRecord for AdjacencyRecord {
    fn priority(&self) -> i64 {
        self.priority
    }
}

/// Drop records with non-positive priorities, collapse duplicate priorities
/// to the first occurrence, and sort ascending by priority.
pub(crate) fn normalize<R: FlatRecord>(mut records: Vec<R>) -> Vec<R> {
    records.retain(|record| record.priority() >= 1);
    let mut seen = HashSet::new();
    records.retain(|record| seen.insert(record.priority()));
    records.sort_by_key(FlatRecord::priority);
    records
}

impl PairRecord {
    /// Decode into a live rule; `None` for malformed records.
    pub fn into_rule(self) -> Option<PairRule> {
        let action = match self.values.len() {
            0 => PairAction::DeleteRow,
            _ => PairAction::SetValues(self.values),
        };
        let mut rule = PairRule::new(self.first, self.second, action).ok()?;
        rule.priority = u32::try_from(self.priority).ok()?;
        Some(rule)
    }

    pub fn from_rule(rule: &PairRule) -> PairRecord {
        let values = match &rule.action {
            PairAction::DeleteRow => Vec::new(),
            PairAction::SetValues(values) => values.clone(),
        };
        PairRecord {
            priority: i64::from(rule.priority),
            first: rule.first.clone(),
            second: rule.second.clone(),
            values,
        }
    }
}

impl ContainsRecord {
    pub fn into_rule(self) -> Option<ContainsRule> {
        let action = match (self.option, self.group) {
            (Some(option), None) => ContainsAction::AssignOption(option as usize),
            (None, Some(group)) => ContainsAction::Group(group),
            _ => return None,
        };
        let mut rule = ContainsRule::new(self.fragment, action).ok()?;
        rule.priority = u32::try_from(self.priority).ok()?;
        Some(rule)
    }

    pub fn from_rule(rule: &ContainsRule) -> ContainsRecord {
        let (option, group) = match &rule.action {
            ContainsAction::AssignOption(option) => (Some(*option as u32), None),
            ContainsAction::Group(label) => (None, Some(label.clone())),
        };
        ContainsRecord {
            priority: i64::from(rule.priority),
            fragment: rule.fragment.clone(),
            option,
            group,
        }
    }
}

impl AdjacencyRecord {
    pub fn into_rule(self) -> Option<AdjacencyRule> {
        let mut rule = AdjacencyRule::new(self.first, self.second).ok()?;
        rule.priority = u32::try_from(self.priority).ok()?;
        Some(rule)
    }

    pub fn from_rule(rule: &AdjacencyRule) -> AdjacencyRecord {
        AdjacencyRecord {
            priority: i64::from(rule.priority),
            first: rule.first.clone(),
            second: rule.second.clone(),
        }
    }
}

impl RuleFile {
    /// Decode into live rule lists. Malformed records and identity
    /// duplicates are dropped silently (batch-add semantics); surviving
    /// rules keep their stored priorities.
    pub fn into_rule_sets(self) -> RuleSets {
        let pair = normalize(self.pair)
            .into_iter()
            .filter_map(PairRecord::into_rule)
            .collect();
        let contains = normalize(self.contains)
            .into_iter()
            .filter_map(ContainsRecord::into_rule)
            .collect();
        let adjacency = normalize(self.adjacency)
            .into_iter()
            .filter_map(AdjacencyRecord::into_rule)
            .collect();
        RuleSets {
            pair: RuleList::load(pair).0,
            contains: RuleList::load(contains).0,
            adjacency: RuleList::load(adjacency).0,
        }
    }

    /// Encode live rule lists, applying the same normalization as loading.
    pub fn from_rule_sets(sets: &RuleSets) -> RuleFile {
        RuleFile {
            pair: normalize(
                sets.pair
                    .snapshot()
                    .iter()
                    .map(PairRecord::from_rule)
                    .collect(),
            ),
            contains: normalize(
                sets.contains
                    .snapshot()
                    .iter()
                    .map(ContainsRecord::from_rule)
                    .collect(),
            ),
            adjacency: normalize(
                sets.adjacency
                    .snapshot()
                    .iter()
                    .map(AdjacencyRecord::from_rule)
                    .collect(),
            ),
        }
    }
}
