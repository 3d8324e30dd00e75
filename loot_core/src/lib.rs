//! loot_core - Loot table model and drop resolution
//!
//! This library provides:
//! - Stat / LootType / EntityKind: the shared vocabulary
//! - LootTable and LootTableEntry: validated, immutable table definitions
//! - LootService: the catalog contract the reload registry drives
//! - LootEngine: the in-memory catalog and chance-based resolver
//!
//! # Quick Start
//!
//! ```rust
//! use loot_core::{EntityKind, LootEngine, LootService, LootTable, LootTableEntry, LootType};
//!
//! let entry = LootTableEntry::new(LootType::Vanilla, "STONE", 1.0, 1, 2).unwrap();
//! let table = LootTable::new("demo", vec![entry]).unwrap();
//!
//! let mut engine = LootEngine::new();
//! engine.register_loot_table(EntityKind::new("zombie").unwrap(), table);
//!
//! let mut rng = rand::thread_rng();
//! let drops = engine.resolve_for_mob(&EntityKind::new("ZOMBIE").unwrap(), &mut rng);
//! assert_eq!(drops.len(), 1);
//! ```

mod drop;
mod engine;
mod service;
mod table;
pub mod types;

pub use drop::Drop;
pub use engine::LootEngine;
pub use service::LootService;
pub use table::{LootTable, LootTableEntry};
pub use types::{EntityKind, LootType, Stat};

use thiserror::Error;

/// A loot definition that breaks one of its construction invariants
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Loot table id cannot be blank")]
    BlankTableId,
    #[error("Loot entry identifier cannot be blank")]
    BlankIdentifier,
    #[error("Entity kind cannot be blank")]
    BlankEntityKind,
    #[error("Drop chance must be in (0, 1], got {0}")]
    DropChanceOutOfRange(f64),
    #[error("Minimum count must be at least 1")]
    MinCountBelowOne,
    #[error("Maximum count {max} is less than minimum count {min}")]
    InvalidCountRange { min: u32, max: u32 },
    #[error("Unknown loot type: {0}")]
    UnknownLootType(String),
    #[error("Unknown stat: {0}")]
    UnknownStat(String),
}

/// Error resolving a loot table
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("Unknown table: {0}")]
    UnknownTable(String),
}
