use crate::registry::stage;
use crate::ConfigError;
use loot_core::{EntityKind, LootTable, LootTableEntry, LootType, ValidationError};
use serde::Deserialize;
use std::collections::BTreeMap;

/// An immutable loot configuration snapshot, applied wholesale on reload
///
/// Definitions are unvalidated here; building them into loot tables is
/// what validates them (see [`LootTablesConfig::validate`]).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LootTablesConfig {
    tables: BTreeMap<String, LootTableDefinition>,
    mob_assignments: BTreeMap<EntityKind, String>,
}

impl LootTablesConfig {
    /// Build a snapshot; tables are keyed by their own id
    ///
    /// A later definition with an id already seen replaces the earlier one.
    pub fn new(
        tables: impl IntoIterator<Item = LootTableDefinition>,
        mob_assignments: impl IntoIterator<Item = (EntityKind, String)>,
    ) -> Self {
        let mut by_id = BTreeMap::new();
        for definition in tables {
            let id = definition.table_id.clone();
            if by_id.insert(id.clone(), definition).is_some() {
                log::warn!("Loot table '{}' is defined more than once; keeping the last", id);
            }
        }

        LootTablesConfig {
            tables: by_id,
            mob_assignments: mob_assignments.into_iter().collect(),
        }
    }

    /// The snapshot with no tables and no assignments
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a snapshot from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: LootTablesFile = toml::from_str(content)?;
        file.into_config()
    }

    /// Parse a snapshot from JSON text
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let file: LootTablesFile = serde_json::from_str(content)?;
        file.into_config()
    }

    pub fn tables(&self) -> &BTreeMap<String, LootTableDefinition> {
        &self.tables
    }

    pub fn mob_assignments(&self) -> &BTreeMap<EntityKind, String> {
        &self.mob_assignments
    }

    pub fn table(&self, id: &str) -> Option<&LootTableDefinition> {
        self.tables.get(id)
    }

    /// Check the whole snapshot without applying it
    ///
    /// Stricter than applying: besides tables that do not build, a mob
    /// assignment naming a table the snapshot does not define is an error
    /// here, where applying would only skip it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        stage(self)?;
        for (kind, table_id) in &self.mob_assignments {
            if !self.tables.contains_key(table_id) {
                return Err(ConfigError::UnknownTableReference {
                    kind: kind.clone(),
                    table: table_id.clone(),
                });
            }
        }
        Ok(())
    }
}

/// A loot table as written in configuration
#[derive(Debug, Clone, PartialEq)]
pub struct LootTableDefinition {
    pub table_id: String,
    pub entries: Vec<LootEntryDefinition>,
}

impl LootTableDefinition {
    pub fn new(table_id: impl Into<String>, entries: Vec<LootEntryDefinition>) -> Self {
        LootTableDefinition {
            table_id: table_id.into(),
            entries,
        }
    }

    /// Validate every entry and build the table
    pub fn build(&self) -> Result<LootTable, ConfigError> {
        let build = || -> Result<LootTable, ValidationError> {
            let entries = self
                .entries
                .iter()
                .map(LootEntryDefinition::build)
                .collect::<Result<Vec<_>, _>>()?;
            LootTable::new(self.table_id.clone(), entries)
        };

        build().map_err(|source| ConfigError::Validation {
            table: self.table_id.clone(),
            source,
        })
    }
}

/// A single loot entry as written in configuration
#[derive(Debug, Clone, PartialEq)]
pub struct LootEntryDefinition {
    pub loot_type: LootType,
    pub identifier: String,
    pub chance: f64,
    pub min_count: u32,
    pub max_count: u32,
}

impl LootEntryDefinition {
    pub fn new(
        loot_type: LootType,
        identifier: impl Into<String>,
        chance: f64,
        min_count: u32,
        max_count: u32,
    ) -> Self {
        LootEntryDefinition {
            loot_type,
            identifier: identifier.into(),
            chance,
            min_count,
            max_count,
        }
    }

    pub fn build(&self) -> Result<LootTableEntry, ValidationError> {
        LootTableEntry::new(
            self.loot_type,
            self.identifier.clone(),
            self.chance,
            self.min_count,
            self.max_count,
        )
    }
}

// ============================================================================
// File format
// ============================================================================

/// Serialized shape of a loot tables file
#[derive(Debug, Deserialize)]
struct LootTablesFile {
    #[serde(default)]
    tables: BTreeMap<String, TableConfig>,
    #[serde(default, alias = "mob-assignments")]
    mob_assignments: BTreeMap<String, String>,
}

/// Configuration for one table; the table id is its key in `tables`
#[derive(Debug, Deserialize)]
struct TableConfig {
    #[serde(default)]
    entries: Vec<EntryConfig>,
}

/// Configuration for a single entry in a loot table
#[derive(Debug, Deserialize)]
struct EntryConfig {
    #[serde(rename = "type")]
    entry_type: String,
    id: String,
    #[serde(default = "default_chance")]
    chance: f64,
    #[serde(default)]
    min: Option<u32>,
    // Defaults to `min`, so `min = 3` alone means exactly three
    #[serde(default)]
    max: Option<u32>,
}

fn default_chance() -> f64 {
    1.0
}

impl LootTablesFile {
    fn into_config(self) -> Result<LootTablesConfig, ConfigError> {
        let mut tables = Vec::with_capacity(self.tables.len());
        for (table_id, table) in self.tables {
            let entries = table
                .entries
                .into_iter()
                .map(|entry| entry.into_definition(&table_id))
                .collect::<Result<Vec<_>, _>>()?;
            tables.push(LootTableDefinition::new(table_id, entries));
        }

        let mut mob_assignments = BTreeMap::new();
        for (key, table_id) in self.mob_assignments {
            let kind = EntityKind::new(&key)
                .map_err(|_| ConfigError::InvalidEntityKind(key.clone()))?;
            if let Some(previous) = mob_assignments.insert(kind.clone(), table_id) {
                log::warn!(
                    "Mob {} is assigned more than once; dropping assignment to '{}'",
                    kind,
                    previous
                );
            }
        }

        Ok(LootTablesConfig::new(tables, mob_assignments))
    }
}

impl EntryConfig {
    fn into_definition(self, table_id: &str) -> Result<LootEntryDefinition, ConfigError> {
        let loot_type = self
            .entry_type
            .parse::<LootType>()
            .map_err(|_| ConfigError::UnknownLootType {
                table: table_id.to_string(),
                value: self.entry_type.clone(),
            })?;
        let min_count = self.min.unwrap_or(1);
        let max_count = self.max.unwrap_or(min_count);

        Ok(LootEntryDefinition::new(
            loot_type,
            self.id,
            self.chance,
            min_count,
            max_count,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEMO_TOML: &str = r#"
[tables.demo]
entries = [
    { type = "VANILLA", id = "STONE", chance = 1.0, min = 1, max = 2 },
    { type = "custom", id = "lucky_charm", chance = 0.05 },
]

[tables.empty]

[mob_assignments]
zombie = "demo"
"#;

    #[test]
    fn test_parse_toml() {
        let config = LootTablesConfig::from_toml_str(DEMO_TOML).unwrap();

        assert_eq!(config.tables().len(), 2);
        let demo = config.table("demo").unwrap();
        assert_eq!(demo.table_id, "demo");
        assert_eq!(
            demo.entries[0],
            LootEntryDefinition::new(LootType::Vanilla, "STONE", 1.0, 1, 2)
        );
        assert_eq!(
            demo.entries[1],
            LootEntryDefinition::new(LootType::CustomItem, "lucky_charm", 0.05, 1, 1)
        );
        assert!(config.table("empty").unwrap().entries.is_empty());

        let zombie = EntityKind::new("ZOMBIE").unwrap();
        assert_eq!(config.mob_assignments().get(&zombie).unwrap(), "demo");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_json_with_dashed_assignments() {
        let json = r#"{
            "tables": { "alpha": { "entries": [ { "type": "vanilla", "id": "BONE", "min": 2 } ] } },
            "mob-assignments": { "SKELETON": "alpha" }
        }"#;
        let config = LootTablesConfig::from_json_str(json).unwrap();

        let entry = &config.table("alpha").unwrap().entries[0];
        assert_eq!(entry.chance, 1.0);
        assert_eq!((entry.min_count, entry.max_count), (2, 2));
        assert_eq!(config.mob_assignments().len(), 1);
    }

    #[test]
    fn test_empty_document_is_empty_config() {
        assert_eq!(LootTablesConfig::from_toml_str("").unwrap(), LootTablesConfig::empty());
    }

    #[test]
    fn test_unknown_loot_type() {
        let toml = r#"
[tables.bad]
entries = [{ type = "potion", id = "HEALING" }]
"#;
        let result = LootTablesConfig::from_toml_str(toml);
        assert!(matches!(
            result,
            Err(ConfigError::UnknownLootType { table, value })
                if table == "bad" && value == "potion"
        ));
    }

    #[test]
    fn test_malformed_toml() {
        let result = LootTablesConfig::from_toml_str("[tables.demo\nentries = 3");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_blank_mob_kind() {
        let toml = r#"
[mob_assignments]
" " = "demo"
"#;
        let result = LootTablesConfig::from_toml_str(toml);
        assert!(matches!(result, Err(ConfigError::InvalidEntityKind(_))));
    }

    #[test]
    fn test_validate_reports_bad_entry() {
        let toml = r#"
[tables.broken]
entries = [{ type = "vanilla", id = "STONE", min = 3, max = 1 }]
"#;
        let config = LootTablesConfig::from_toml_str(toml).unwrap();
        let result = config.validate();
        assert!(matches!(
            result,
            Err(ConfigError::Validation {
                table,
                source: ValidationError::InvalidCountRange { min: 3, max: 1 },
            }) if table == "broken"
        ));
    }

    #[test]
    fn test_validate_reports_unknown_reference() {
        let config = LootTablesConfig::new(
            vec![],
            vec![(EntityKind::new("spider").unwrap(), "missing".to_string())],
        );
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnknownTableReference { table, .. }) if table == "missing"
        ));
    }

    #[test]
    fn test_duplicate_table_id_keeps_last_definition() {
        let config = LootTablesConfig::new(
            vec![
                LootTableDefinition::new(
                    "demo",
                    vec![LootEntryDefinition::new(LootType::Vanilla, "DIRT", 1.0, 1, 1)],
                ),
                LootTableDefinition::new(
                    "demo",
                    vec![LootEntryDefinition::new(LootType::Vanilla, "STONE", 1.0, 1, 1)],
                ),
            ],
            vec![],
        );

        assert_eq!(config.tables().len(), 1);
        assert_eq!(config.table("demo").unwrap().entries[0].identifier, "STONE");
    }
}
