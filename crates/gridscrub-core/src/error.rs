//! Error types for Gridscrub core.

use thiserror::Error;

use gridscrub_engine::engine::GridError;

/// Errors that can occur in the Gridscrub session and storage layers.
#[derive(Error, Debug)]
pub enum GridscrubError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Rule file parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Rule file write error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("Duplicate rule: {0}")]
    DuplicateRule(String),

    #[error("No rules selected")]
    NoSelection,

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Nothing to redo")]
    NothingToRedo,
}

pub type Result<T> = std::result::Result<T, GridscrubError>;
