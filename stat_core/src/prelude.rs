//! Prelude module for convenient imports
//!
//! ```rust
//! use stat_core::prelude::*;
//! ```

// Core types
pub use crate::modifier::StatModifierSet;
pub use crate::sources::StatSources;

// Pets
pub use crate::pet::{
    ActiveCompanionPet, CompanionPetDefinition, CompanionPets, EntityHandle, PetCatalog, PlayerId,
    LUCKY_SPRITE_ID,
};

// Errors
pub use crate::PetError;

// Shared vocabulary
pub use loot_core::{EntityKind, Stat};
