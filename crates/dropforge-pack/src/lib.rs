//! Loot table loader.
//!
//! Scans a directory tree of JSON table definitions, resolves condition
//! tags through the engine's [`ConditionRegistry`], and produces
//! [`LootTable`]s ready to register.
//!
//! [`ConditionRegistry`]: dropforge_loot::ConditionRegistry
//! [`LootTable`]: dropforge_loot::LootTable

pub mod format;
pub mod loader;

pub use loader::{load_table, load_tables, parse_table, InvalidConditionPolicy};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PackError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid table JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Number(#[from] dropforge_loot::ConfigError),

    #[error(transparent)]
    Condition(#[from] dropforge_loot::ConditionParseError),

    #[error("unknown table type: {0:?}")]
    UnknownTableType(String),
}
