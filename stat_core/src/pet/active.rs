use super::definition::CompanionPetDefinition;
use crate::sources::StatSources;
use std::collections::HashMap;

/// Identity of a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayerId(pub u64);

/// Opaque handle to a live creature owned by the game world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityHandle(pub u64);

/// A summoned pet bound to its owner
///
/// The binding does not own the creature; despawning `entity` is up to the
/// caller once the pet is dismissed.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveCompanionPet {
    pub owner: PlayerId,
    pub entity: EntityHandle,
    pub definition: CompanionPetDefinition,
    pub stat_source_key: String,
}

/// Active companion pets, at most one per owner
#[derive(Debug, Default)]
pub struct CompanionPets {
    active: HashMap<PlayerId, ActiveCompanionPet>,
}

impl CompanionPets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a freshly spawned pet to `owner` and apply its stat bonuses
    ///
    /// Any pet the owner already had is dismissed first and returned so its
    /// creature can be despawned.
    pub fn summon(
        &mut self,
        owner: PlayerId,
        entity: EntityHandle,
        definition: &CompanionPetDefinition,
        owner_stats: &mut StatSources,
    ) -> Option<ActiveCompanionPet> {
        let previous = self.dismiss(owner, owner_stats);

        let stat_source_key = definition.stat_source_key();
        owner_stats.set_source(stat_source_key.clone(), definition.stat_bonuses().clone());
        log::info!("Player {:?} summoned pet '{}'", owner, definition.id());

        self.active.insert(
            owner,
            ActiveCompanionPet {
                owner,
                entity,
                definition: definition.clone(),
                stat_source_key,
            },
        );
        previous
    }

    /// Unbind the owner's pet and remove its stat bonuses
    ///
    /// Used for explicit dismissal as well as owner quit and death.
    pub fn dismiss(
        &mut self,
        owner: PlayerId,
        owner_stats: &mut StatSources,
    ) -> Option<ActiveCompanionPet> {
        let active = self.active.remove(&owner)?;
        owner_stats.clear_source(&active.stat_source_key);
        log::info!("Player {:?} dismissed pet '{}'", owner, active.definition.id());
        Some(active)
    }

    pub fn active(&self, owner: PlayerId) -> Option<&ActiveCompanionPet> {
        self.active.get(&owner)
    }

    /// Find the binding for a live creature, e.g. when it dies
    pub fn owner_of(&self, entity: EntityHandle) -> Option<PlayerId> {
        self.active
            .values()
            .find(|pet| pet.entity == entity)
            .map(|pet| pet.owner)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Dismiss every pet, for shutdown
    ///
    /// `owners` supplies the stat sources of the online owners; each listed
    /// owner's pet bonuses are removed. Pets whose owner is not listed are
    /// unbound anyway and logged, since their bonuses cannot be cleared here.
    pub fn dismiss_all<'s, I>(&mut self, owners: I) -> Vec<ActiveCompanionPet>
    where
        I: IntoIterator<Item = (PlayerId, &'s mut StatSources)>,
    {
        let mut dismissed = Vec::with_capacity(self.active.len());
        for (owner, owner_stats) in owners {
            if let Some(pet) = self.dismiss(owner, owner_stats) {
                dismissed.push(pet);
            }
        }
        for pet in self.drain() {
            log::warn!(
                "Unbound pet '{}' of player {:?} without clearing its stat source",
                pet.definition.id(),
                pet.owner
            );
            dismissed.push(pet);
        }
        dismissed
    }

    /// Remove every binding without touching any stat sources
    ///
    /// Prefer [`dismiss_all`](Self::dismiss_all) at shutdown; after a drain
    /// callers must clear `stat_source_key` themselves.
    pub fn drain(&mut self) -> Vec<ActiveCompanionPet> {
        self.active.drain().map(|(_, pet)| pet).collect()
    }
}
