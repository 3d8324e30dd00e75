use crate::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Character attributes that items, pets and buffs can modify
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    // Core
    Health,
    Defense,
    TrueDefense,
    Strength,
    Intelligence,
    Wisdom,
    Agility,
    Vitality,
    Speed,
    // Offense
    AttackSpeed,
    CriticalChance,
    CriticalDamage,
    Ferocity,
    AbilityPower,
    // Recovery and avoidance
    ManaRegen,
    Evasion,
    // Luck
    MagicFind,
    PetLuck,
    Luck,
    Perception,
    // Gathering
    MiningSpeed,
    MiningFortune,
    FarmingFortune,
    ForagingFortune,
    FishingFortune,
}

impl Stat {
    /// Get all stat variants
    pub fn all() -> &'static [Stat] {
        &[
            Stat::Health,
            Stat::Defense,
            Stat::TrueDefense,
            Stat::Strength,
            Stat::Intelligence,
            Stat::Wisdom,
            Stat::Agility,
            Stat::Vitality,
            Stat::Speed,
            Stat::AttackSpeed,
            Stat::CriticalChance,
            Stat::CriticalDamage,
            Stat::Ferocity,
            Stat::AbilityPower,
            Stat::ManaRegen,
            Stat::Evasion,
            Stat::MagicFind,
            Stat::PetLuck,
            Stat::Luck,
            Stat::Perception,
            Stat::MiningSpeed,
            Stat::MiningFortune,
            Stat::FarmingFortune,
            Stat::ForagingFortune,
            Stat::FishingFortune,
        ]
    }

    /// Snake-case name, also used as the serialized form
    pub fn name(&self) -> &'static str {
        match self {
            Stat::Health => "health",
            Stat::Defense => "defense",
            Stat::TrueDefense => "true_defense",
            Stat::Strength => "strength",
            Stat::Intelligence => "intelligence",
            Stat::Wisdom => "wisdom",
            Stat::Agility => "agility",
            Stat::Vitality => "vitality",
            Stat::Speed => "speed",
            Stat::AttackSpeed => "attack_speed",
            Stat::CriticalChance => "critical_chance",
            Stat::CriticalDamage => "critical_damage",
            Stat::Ferocity => "ferocity",
            Stat::AbilityPower => "ability_power",
            Stat::ManaRegen => "mana_regen",
            Stat::Evasion => "evasion",
            Stat::MagicFind => "magic_find",
            Stat::PetLuck => "pet_luck",
            Stat::Luck => "luck",
            Stat::Perception => "perception",
            Stat::MiningSpeed => "mining_speed",
            Stat::MiningFortune => "mining_fortune",
            Stat::FarmingFortune => "farming_fortune",
            Stat::ForagingFortune => "foraging_fortune",
            Stat::FishingFortune => "fishing_fortune",
        }
    }

    /// Human readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            Stat::Health => "Health",
            Stat::Defense => "Defense",
            Stat::TrueDefense => "True Defense",
            Stat::Strength => "Strength",
            Stat::Intelligence => "Intelligence",
            Stat::Wisdom => "Wisdom",
            Stat::Agility => "Agility",
            Stat::Vitality => "Vitality",
            Stat::Speed => "Speed",
            Stat::AttackSpeed => "Attack Speed",
            Stat::CriticalChance => "Critical Chance",
            Stat::CriticalDamage => "Critical Damage",
            Stat::Ferocity => "Ferocity",
            Stat::AbilityPower => "Ability Power",
            Stat::ManaRegen => "Mana Regen",
            Stat::Evasion => "Evasion",
            Stat::MagicFind => "Magic Find",
            Stat::PetLuck => "Pet Luck",
            Stat::Luck => "Luck",
            Stat::Perception => "Perception",
            Stat::MiningSpeed => "Mining Speed",
            Stat::MiningFortune => "Mining Fortune",
            Stat::FarmingFortune => "Farming Fortune",
            Stat::ForagingFortune => "Foraging Fortune",
            Stat::FishingFortune => "Fishing Fortune",
        }
    }

    /// Storage key, e.g. `stat.magic_find`
    pub fn key(&self) -> String {
        format!("stat.{}", self.name())
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Stat {
    type Err = ValidationError;

    /// Case-insensitive, accepts `MAGIC_FIND`, `magic_find` and `stat.magic_find`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let name = normalized.strip_prefix("stat.").unwrap_or(&normalized);
        Stat::all()
            .iter()
            .copied()
            .find(|stat| stat.name() == name)
            .ok_or_else(|| ValidationError::UnknownStat(s.to_string()))
    }
}

/// What kind of thing a loot entry produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LootType {
    /// A stock game material, identified by its material name
    Vanilla,
    /// An item from the custom item registry, identified by its item id
    CustomItem,
}

impl fmt::Display for LootType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LootType::Vanilla => write!(f, "VANILLA"),
            LootType::CustomItem => write!(f, "CUSTOM_ITEM"),
        }
    }
}

impl FromStr for LootType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vanilla" => Ok(LootType::Vanilla),
            "custom" | "custom_item" => Ok(LootType::CustomItem),
            _ => Err(ValidationError::UnknownLootType(s.to_string())),
        }
    }
}

/// Kind of a game entity (mob type or pet creature), e.g. `ZOMBIE`
///
/// Names are upper-cased on construction so `zombie` and `ZOMBIE` are the
/// same key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityKind(String);

impl EntityKind {
    pub fn new(name: impl AsRef<str>) -> Result<Self, ValidationError> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(ValidationError::BlankEntityKind);
        }
        Ok(EntityKind(name.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EntityKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityKind::new(s)
    }
}

impl TryFrom<String> for EntityKind {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        EntityKind::new(value)
    }
}

impl From<EntityKind> for String {
    fn from(kind: EntityKind) -> Self {
        kind.0
    }
}
