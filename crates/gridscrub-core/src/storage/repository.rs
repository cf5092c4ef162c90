//! Rule-set persistence boundary.
//!
//! The engine side never sees raw I/O errors: [`load_or_default`] always
//! hands back either the persisted rule sets or the built-in defaults,
//! persisting the defaults immediately on fallback.

use std::fs;
use std::path::PathBuf;

use crate::error::Result;
use crate::rules::RuleSets;

use super::records::RuleFile;

/// Injected persistence seam for rule sets.
pub trait RuleRepository {
    fn load(&self) -> Result<RuleSets>;
    fn store(&mut self, sets: &RuleSets) -> Result<()>;
}

/// TOML-file-backed repository.
pub struct TomlRuleRepository {
    path: PathBuf,
}

impl TomlRuleRepository {
    pub fn new(path: impl Into<PathBuf>) -> TomlRuleRepository {
        TomlRuleRepository { path: path.into() }
    }
}

impl RuleRepository for TomlRuleRepository {
    fn load(&self) -> Result<RuleSets> {
        let content = fs::read_to_string(&self.path)?;
        let file: RuleFile = toml::from_str(&content)?;
        Ok(file.into_rule_sets())
    }

    fn store(&mut self, sets: &RuleSets) -> Result<()> {
        let file = RuleFile::from_rule_sets(sets);
        fs::write(&self.path, toml::to_string_pretty(&file)?)?;
        Ok(())
    }
}

/// In-memory repository for tests and embedding callers.
#[derive(Debug, Default)]
pub struct MemoryRuleRepository {
    file: Option<RuleFile>,
}

impl MemoryRuleRepository {
    pub fn new() -> MemoryRuleRepository {
        MemoryRuleRepository::default()
    }

    pub fn stored(&self) -> Option<&RuleFile> {
        self.file.as_ref()
    }
}

impl RuleRepository for MemoryRuleRepository {
    fn load(&self) -> Result<RuleSets> {
        match &self.file {
            Some(file) => Ok(file.clone().into_rule_sets()),
            None => Err(std::io::Error::from(std::io::ErrorKind::NotFound).into()),
        }
    }

    fn store(&mut self, sets: &RuleSets) -> Result<()> {
        self.file = Some(RuleFile::from_rule_sets(sets));
        Ok(())
    }
}

/// Load the persisted rule sets, or fall back to the built-in defaults and
/// immediately persist them. The caller never observes a load failure.
pub fn load_or_default(repo: &mut dyn RuleRepository) -> RuleSets {
    match repo.load() {
        Ok(sets) => sets,
        Err(_) => {
            let defaults = RuleSets::built_in();
            // Persisting the defaults is itself best-effort.
            let _ = repo.store(&defaults);
            defaults
        }
    }
}

#[cfg(test)]
mod tests {
    use gridscrub_engine::engine::{PairAction, PairRule};

    use super::*;

    #[test]
    fn test_memory_round_trip() {
        let mut sets = RuleSets::default();
        sets.pair
            .add(PairRule::new("A1", "B1", PairAction::DeleteRow).unwrap())
            .unwrap();

        let mut repo = MemoryRuleRepository::new();
        repo.store(&sets).unwrap();
        let loaded = repo.load().unwrap();
        assert_eq!(loaded.pair.len(), 1);
        let (_, rule) = loaded.pair.iter().next().unwrap();
        assert_eq!(rule.first, "A1");
        assert_eq!(rule.priority, 1);
    }

    #[test]
    fn test_load_or_default_falls_back_and_persists() {
        let mut repo = MemoryRuleRepository::new();
        assert!(repo.stored().is_none());

        let sets = load_or_default(&mut repo);
        assert!(sets.pair.is_empty());
        assert!(sets.contains.is_empty());
        assert!(sets.adjacency.is_empty());
        // The defaults were written back immediately.
        assert!(repo.stored().is_some());
    }

    #[test]
    fn test_load_or_default_prefers_persisted_sets() {
        let mut sets = RuleSets::default();
        sets.pair
            .add(PairRule::new("x", "y", PairAction::DeleteRow).unwrap())
            .unwrap();
        let mut repo = MemoryRuleRepository::new();
        repo.store(&sets).unwrap();

        let loaded = load_or_default(&mut repo);
        assert_eq!(loaded.pair.len(), 1);
    }
}
