//! stat_core - Stat modifier aggregation for players and their companions
//!
//! This library provides:
//! - StatModifierSet: immutable additive bonuses with a pure merge
//! - StatSources: base stats plus bonus sets keyed by source
//! - Companion pets: catalog definitions and live owner bindings
//!
//! # Quick Start
//!
//! ```rust
//! use stat_core::prelude::*;
//!
//! let catalog = PetCatalog::with_defaults().unwrap();
//! let sprite = catalog.get(LUCKY_SPRITE_ID).unwrap();
//!
//! let mut stats = StatSources::with_base([(Stat::MagicFind, 10.0)].into_iter().collect());
//! let mut pets = CompanionPets::new();
//! pets.summon(PlayerId(7), EntityHandle(42), sprite, &mut stats);
//!
//! assert_eq!(stats.value(Stat::MagicFind), 40.0);
//! ```

pub mod modifier;
pub mod pet;
pub mod prelude;
pub mod sources;

pub use modifier::StatModifierSet;
pub use pet::{ActiveCompanionPet, CompanionPetDefinition, CompanionPets, PetCatalog};
pub use sources::StatSources;

pub use loot_core::{EntityKind, Stat};

use loot_core::ValidationError;
use thiserror::Error;

/// Invalid companion pet definition
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PetError {
    #[error("Pet id cannot be blank")]
    BlankId,
    #[error("Pet '{id}' display name cannot be blank")]
    BlankDisplayName { id: String },
    #[error("Invalid creature kind: {0}")]
    InvalidCreatureKind(#[from] ValidationError),
}
