//! StatSources - Per-source stat bonuses for one player
//!
//! Equipment, companion pets, zone bonuses and buffs each register their
//! bonuses under a source key (e.g. `pet:lucky_sprite`). The effective stats
//! are the base set merged with every source.

use crate::modifier::StatModifierSet;
use loot_core::Stat;
use std::collections::BTreeMap;

/// Base stats plus bonus sets keyed by source
#[derive(Debug, Clone, Default)]
pub struct StatSources {
    base: StatModifierSet,
    sources: BTreeMap<String, StatModifierSet>,
}

impl StatSources {
    /// Create with no base stats and no sources
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with the given base stats
    pub fn with_base(base: StatModifierSet) -> Self {
        StatSources {
            base,
            sources: BTreeMap::new(),
        }
    }

    pub fn base(&self) -> &StatModifierSet {
        &self.base
    }

    pub fn set_base(&mut self, base: StatModifierSet) {
        self.base = base;
    }

    /// Apply or replace the bonuses of a source; an empty set clears it
    pub fn set_source(&mut self, key: impl Into<String>, bonuses: StatModifierSet) {
        let key = key.into();
        if bonuses.is_empty() {
            self.clear_source(&key);
            return;
        }
        log::debug!("Applied {} stat bonuses from source '{}'", bonuses.len(), key);
        self.sources.insert(key, bonuses);
    }

    /// Add a single bonus on top of whatever the source already grants
    pub fn add_to_source(&mut self, key: impl Into<String>, stat: Stat, value: f64) {
        let key = key.into();
        let current = self.sources.get(&key).cloned().unwrap_or_default();
        let addition: StatModifierSet = std::iter::once((stat, value)).collect();
        self.set_source(key, StatModifierSet::merge(&current, &addition));
    }

    /// Remove a source; `false` if it was not present
    pub fn clear_source(&mut self, key: &str) -> bool {
        let removed = self.sources.remove(key).is_some();
        if removed {
            log::debug!("Cleared stat bonuses from source '{}'", key);
        }
        removed
    }

    /// Remove every source, keeping the base stats
    pub fn clear_all(&mut self) {
        self.sources.clear();
    }

    pub fn source(&self, key: &str) -> Option<&StatModifierSet> {
        self.sources.get(key)
    }

    pub fn source_keys(&self) -> impl Iterator<Item = &str> {
        self.sources.keys().map(|k| k.as_str())
    }

    /// Merged bonuses of all sources, without the base stats
    pub fn total(&self) -> StatModifierSet {
        StatModifierSet::merge_all(self.sources.values())
    }

    /// Base stats merged with every source
    pub fn effective(&self) -> StatModifierSet {
        StatModifierSet::merge(&self.base, &self.total())
    }

    /// Effective value of a single stat
    pub fn value(&self, stat: Stat) -> f64 {
        self.base.get(stat) + self.sources.values().map(|s| s.get(stat)).sum::<f64>()
    }
}
