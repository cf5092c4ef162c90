//! gridscrub-core - UI-agnostic session model, rule lists, and storage.

pub mod document;
pub mod error;
pub mod rules;
pub mod storage;

pub use document::{Session, UndoHistory};
pub use error::{GridscrubError, Result};
pub use rules::{RuleId, RuleList, RuleSets};

pub use gridscrub_engine::engine::Grid;
