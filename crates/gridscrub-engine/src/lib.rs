//! gridscrub-engine - rule matching, compaction, and group sorting over text grids.

pub mod engine;
