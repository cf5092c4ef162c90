//! Priority-ordered rule collections.
//!
//! A [`RuleList`] keeps its rules sorted ascending by priority with ties
//! broken by insertion order. `add` assigns priority `max + 1`; `remove`
//! leaves gaps (matching the observed behavior of the original tool);
//! `move_to_position` is the only operation that renumbers to a dense
//! `1..N`.

use std::ops::{Deref, DerefMut};

use crate::error::{GridscrubError, Result};

/// Stable handle for a rule stored in a [`RuleList`].
///
/// Selection and moves always address rules by id; identity is never
/// recovered from a rendering of the rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RuleId(u32);

/// Behavior a rule type needs to live in a [`RuleList`].
pub trait RuleItem: Clone {
    /// Case-insensitive identity key; at most one rule per key may exist.
    fn identity(&self) -> String;
    /// Short human-readable label for condition reporting.
    fn label(&self) -> String;
    fn priority(&self) -> u32;
    fn set_priority(&mut self, priority: u32);
}

#[derive(Clone, Debug)]
struct Stored<T> {
    id: RuleId,
    rule: T,
}

/// Ordered rule collection with a strict priority ranking.
#[derive(Clone, Debug)]
pub struct RuleList<T> {
    entries: Vec<Stored<T>>,
    next_id: u32,
}

/// Result of a batch add: duplicates are dropped silently, valid entries
/// still land.
#[derive(Clone, Debug, Default)]
pub struct BatchOutcome<T> {
    pub added: Vec<RuleId>,
    pub rejected: Vec<T>,
}

impl<T> Default for RuleList<T> {
    fn default() -> Self {
        RuleList {
            entries: Vec::new(),
            next_id: 0,
        }
    }
}

impl<T: RuleItem> RuleList<T> {
    pub fn new() -> RuleList<T> {
        RuleList::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rules ascending by priority, with their stable ids.
    pub fn iter(&self) -> impl Iterator<Item = (RuleId, &T)> {
        self.entries.iter().map(|stored| (stored.id, &stored.rule))
    }

    pub fn get(&self, id: RuleId) -> Option<&T> {
        self.entries
            .iter()
            .find(|stored| stored.id == id)
            .map(|stored| &stored.rule)
    }

    /// Immutable copy of the rules in application (priority) order, as
    /// handed to the grid engine at apply time.
    pub fn snapshot(&self) -> Vec<T> {
        self.entries
            .iter()
            .map(|stored| stored.rule.clone())
            .collect()
    }

    /// Append a rule with priority `max + 1` (1 if the list is empty).
    /// Rejects identity collisions, leaving the list unchanged.
    pub fn add(&mut self, rule: T) -> Result<RuleId> {
        if self.contains_identity(&rule.identity()) {
            return Err(GridscrubError::DuplicateRule(rule.label()));
        }
        let priority = self.max_priority() + 1;
        Ok(self.push_with_priority(rule, priority))
    }

    /// Add a batch; duplicates within the batch or against existing rules
    /// are dropped silently, the rest still land.
    pub fn add_all(&mut self, rules: impl IntoIterator<Item = T>) -> BatchOutcome<T> {
        let mut outcome = BatchOutcome {
            added: Vec::new(),
            rejected: Vec::new(),
        };
        for rule in rules {
            if self.contains_identity(&rule.identity()) {
                outcome.rejected.push(rule);
            } else {
                let priority = self.max_priority() + 1;
                outcome.added.push(self.push_with_priority(rule, priority));
            }
        }
        outcome
    }

    /// Remove a rule. Remaining priorities are **not** renumbered; gaps are
    /// tolerated after deletion.
    pub fn remove(&mut self, id: RuleId) -> Result<T> {
        let index = self.index_of(id).ok_or(GridscrubError::NoSelection)?;
        Ok(self.entries.remove(index).rule)
    }

    /// Swap the rule's priority with its immediate predecessor in priority
    /// order. Returns `Ok(false)` (a no-op, not an error) at the top.
    pub fn move_up(&mut self, id: RuleId) -> Result<bool> {
        let index = self.index_of(id).ok_or(GridscrubError::NoSelection)?;
        if index == 0 {
            return Ok(false);
        }
        self.swap_adjacent(index - 1, index);
        Ok(true)
    }

    /// Swap the rule's priority with its immediate successor in priority
    /// order. Returns `Ok(false)` at the bottom.
    pub fn move_down(&mut self, id: RuleId) -> Result<bool> {
        let index = self.index_of(id).ok_or(GridscrubError::NoSelection)?;
        if index + 1 >= self.entries.len() {
            return Ok(false);
        }
        self.swap_adjacent(index, index + 1);
        Ok(true)
    }

    /// Move a subset to a target position (1-based, clamped), preserving the
    /// subset's relative order, then renumber **all** rules to a dense
    /// `1..N`. The only renormalizing operation.
    pub fn move_to_position(&mut self, ids: &[RuleId], target: usize) -> Result<()> {
        if ids.is_empty() {
            return Err(GridscrubError::NoSelection);
        }
        let mut selected = Vec::new();
        let mut rest = Vec::new();
        for stored in self.entries.drain(..) {
            if ids.contains(&stored.id) {
                selected.push(stored);
            } else {
                rest.push(stored);
            }
        }
        if selected.is_empty() {
            self.entries = rest;
            return Err(GridscrubError::NoSelection);
        }
        let position = target.clamp(1, rest.len() + 1) - 1;
        let tail = rest.split_off(position);
        self.entries = rest;
        self.entries.extend(selected);
        self.entries.extend(tail);
        for (index, stored) in self.entries.iter_mut().enumerate() {
            stored.rule.set_priority(index as u32 + 1);
        }
        Ok(())
    }

    /// Rebuild a list from already-prioritized rules (a persisted set).
    /// Rules keep their stored priorities; identity duplicates are dropped
    /// first-wins and returned alongside the list.
    pub fn load(rules: Vec<T>) -> (RuleList<T>, Vec<T>) {
        let mut sorted = rules;
        sorted.sort_by_key(RuleItem::priority);
        let mut list = RuleList::new();
        let mut rejected = Vec::new();
        for rule in sorted {
            if list.contains_identity(&rule.identity()) {
                rejected.push(rule);
            } else {
                let priority = rule.priority();
                list.push_with_priority(rule, priority);
            }
        }
        (list, rejected)
    }

    fn contains_identity(&self, identity: &str) -> bool {
        self.entries
            .iter()
            .any(|stored| stored.rule.identity() == identity)
    }

    fn index_of(&self, id: RuleId) -> Option<usize> {
        self.entries.iter().position(|stored| stored.id == id)
    }

    fn max_priority(&self) -> u32 {
        // Entries are sorted ascending, so the last one holds the max.
        self.entries
            .last()
            .map_or(0, |stored| stored.rule.priority())
    }

    fn push_with_priority(&mut self, mut rule: T, priority: u32) -> RuleId {
        let id = RuleId(self.next_id);
        self.next_id += 1;
        rule.set_priority(priority);
        self.entries.push(Stored { id, rule });
        id
    }

    fn swap_adjacent(&mut self, upper: usize, lower: usize) {
        let upper_priority = self.entries[upper].rule.priority();
        let lower_priority = self.entries[lower].rule.priority();
        self.entries[upper].rule.set_priority(lower_priority);
        self.entries[lower].rule.set_priority(upper_priority);
        self.entries.swap(upper, lower);
    }
}

/// An independent working copy of a rule list, for dialog-style edit
/// sessions: mutate the draft freely, then [`RuleList::commit`] it. Dropping
/// a draft without committing leaves the original untouched.
#[derive(Clone, Debug)]
pub struct RuleListDraft<T>(RuleList<T>);

impl<T: RuleItem> RuleList<T> {
    /// Begin an edit transaction on a deep copy of this list.
    pub fn edit(&self) -> RuleListDraft<T> {
        RuleListDraft(self.clone())
    }

    /// Commit a draft, replacing this list wholesale.
    pub fn commit(&mut self, draft: RuleListDraft<T>) {
        *self = draft.0;
    }
}

impl<T> Deref for RuleListDraft<T> {
    type Target = RuleList<T>;

    fn deref(&self) -> &RuleList<T> {
        &self.0
    }
}

impl<T> DerefMut for RuleListDraft<T> {
    fn deref_mut(&mut self) -> &mut RuleList<T> {
        &mut self.0
    }
}
