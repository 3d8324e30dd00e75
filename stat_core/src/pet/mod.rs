//! Companion pets - catalog definitions and live owner bindings

mod active;
mod definition;

pub use active::{ActiveCompanionPet, CompanionPets, EntityHandle, PlayerId};
pub use definition::{CompanionPetDefinition, STAT_SOURCE_PREFIX};

use crate::modifier::StatModifierSet;
use crate::PetError;
use loot_core::{EntityKind, Stat};
use std::collections::HashMap;

/// Id of the built-in lucky sprite pet
pub const LUCKY_SPRITE_ID: &str = "lucky_sprite";

/// Pet catalog
#[derive(Debug, Clone, Default)]
pub struct PetCatalog {
    /// Mapping from pet ID to definition
    definitions: HashMap<String, CompanionPetDefinition>,
}

impl PetCatalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        PetCatalog {
            definitions: HashMap::new(),
        }
    }

    /// Register a pet, returning the definition it replaced
    pub fn register(
        &mut self,
        definition: CompanionPetDefinition,
    ) -> Option<CompanionPetDefinition> {
        self.definitions
            .insert(definition.id().to_string(), definition)
    }

    /// Get a pet definition by ID
    pub fn get(&self, id: &str) -> Option<&CompanionPetDefinition> {
        self.definitions.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Load the built-in pets
    pub fn with_defaults() -> Result<Self, PetError> {
        let mut catalog = Self::new();
        catalog.register(lucky_sprite()?);
        Ok(catalog)
    }
}

/// Lucky sprite - loot-finding helper, cannot be hurt
pub fn lucky_sprite() -> Result<CompanionPetDefinition, PetError> {
    let bonuses: StatModifierSet = [
        (Stat::MagicFind, 30.0),
        (Stat::PetLuck, 60.0),
        (Stat::ManaRegen, 5.0),
    ]
    .into_iter()
    .collect();

    CompanionPetDefinition::new(
        LUCKY_SPRITE_ID,
        "Lucky Sprite",
        EntityKind::new("ALLAY")?,
        bonuses,
        true,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_contain_lucky_sprite() {
        let catalog = PetCatalog::with_defaults().unwrap();
        let sprite = catalog.get(LUCKY_SPRITE_ID).unwrap();

        assert_eq!(sprite.stat_bonuses().get(Stat::MagicFind), 30.0);
        assert_eq!(sprite.stat_bonuses().get(Stat::PetLuck), 60.0);
        assert_eq!(sprite.stat_bonuses().get(Stat::ManaRegen), 5.0);
        assert_eq!(sprite.creature_kind().as_str(), "ALLAY");
        assert!(sprite.invulnerable());
    }

    #[test]
    fn test_register_replaces_by_id() {
        let mut catalog = PetCatalog::with_defaults().unwrap();
        let plain = CompanionPetDefinition::new(
            LUCKY_SPRITE_ID,
            "Plain Sprite",
            EntityKind::new("allay").unwrap(),
            StatModifierSet::empty(),
            false,
        )
        .unwrap();

        let replaced = catalog.register(plain).unwrap();
        assert_eq!(replaced.display_name(), "Lucky Sprite");
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get(LUCKY_SPRITE_ID).unwrap().stat_bonuses().is_empty());
    }
}
