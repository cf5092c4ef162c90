//! [`RuleItem`] implementations for the engine's rule variants.

use gridscrub_engine::engine::{AdjacencyRule, ContainsRule, PairRule};

use super::list::RuleItem;

impl RuleItem for PairRule {
    fn identity(&self) -> String {
        PairRule::identity(self)
    }

    fn label(&self) -> String {
        format!("{} + {}", self.first, self.second)
    }

    fn priority(&self) -> u32 {
        self.priority
    }

    fn set_priority(&mut self, priority: u32) {
        self.priority = priority;
    }
}

impl RuleItem for ContainsRule {
    fn identity(&self) -> String {
        ContainsRule::identity(self)
    }

    fn label(&self) -> String {
        self.fragment.clone()
    }

    fn priority(&self) -> u32 {
        self.priority
    }

    fn set_priority(&mut self, priority: u32) {
        self.priority = priority;
    }
}

impl RuleItem for AdjacencyRule {
    fn identity(&self) -> String {
        AdjacencyRule::identity(self)
    }

    fn label(&self) -> String {
        format!("{} ~ {}", self.first, self.second)
    }

    fn priority(&self) -> u32 {
        self.priority
    }

    fn set_priority(&mut self, priority: u32) {
        self.priority = priority;
    }
}

#[cfg(test)]
mod tests {
    use gridscrub_engine::engine::{ContainsAction, ContainsRule};

    use crate::rules::RuleList;

    #[test]
    fn test_contains_fragment_may_appear_at_most_once() {
        let mut list = RuleList::new();
        list.add(ContainsRule::new("XYZ", ContainsAction::AssignOption(1)).unwrap())
            .unwrap();
        let again = ContainsRule::new("XYZ", ContainsAction::Group("g".into())).unwrap();
        assert!(list.add(again).is_err());
        assert_eq!(list.len(), 1);
    }
}
