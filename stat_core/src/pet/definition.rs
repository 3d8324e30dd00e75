use crate::modifier::StatModifierSet;
use crate::PetError;
use loot_core::EntityKind;
use serde::Serialize;

/// Prefix of the stat source key a summoned pet's bonuses are stored under
pub const STAT_SOURCE_PREFIX: &str = "pet:";

/// Catalog entry for a summonable companion pet
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanionPetDefinition {
    id: String,
    display_name: String,
    creature_kind: EntityKind,
    stat_bonuses: StatModifierSet,
    invulnerable: bool,
}

impl CompanionPetDefinition {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        creature_kind: EntityKind,
        stat_bonuses: StatModifierSet,
        invulnerable: bool,
    ) -> Result<Self, PetError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(PetError::BlankId);
        }
        let display_name = display_name.into();
        if display_name.trim().is_empty() {
            return Err(PetError::BlankDisplayName { id });
        }

        Ok(CompanionPetDefinition {
            id,
            display_name,
            creature_kind,
            stat_bonuses,
            invulnerable,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn creature_kind(&self) -> &EntityKind {
        &self.creature_kind
    }

    pub fn stat_bonuses(&self) -> &StatModifierSet {
        &self.stat_bonuses
    }

    pub fn invulnerable(&self) -> bool {
        self.invulnerable
    }

    /// Key this pet's bonuses are registered under while it is summoned
    pub fn stat_source_key(&self) -> String {
        format!("{}{}", STAT_SOURCE_PREFIX, self.id)
    }
}
