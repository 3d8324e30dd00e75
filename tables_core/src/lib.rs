//! tables_core - Loot table configuration and reload
//!
//! Configuration text is parsed into an immutable [`LootTablesConfig`]
//! snapshot, and a [`LootTableRegistry`] applies snapshots to a
//! [`loot_core::LootService`], revoking whatever a reload removed.

mod config;
mod registry;

pub use config::{LootEntryDefinition, LootTableDefinition, LootTablesConfig};
pub use registry::LootTableRegistry;

use loot_core::{EntityKind, ValidationError};
use thiserror::Error;

/// Error loading or applying loot table configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Validation error in loot table '{table}': {source}")]
    Validation {
        table: String,
        source: ValidationError,
    },
    #[error("Unknown loot type '{value}' in loot table '{table}'")]
    UnknownLootType { table: String, value: String },
    #[error("Invalid mob kind '{0}' in mob assignments")]
    InvalidEntityKind(String),
    #[error("Mob {kind} is assigned unknown loot table '{table}'")]
    UnknownTableReference { kind: EntityKind, table: String },
}
