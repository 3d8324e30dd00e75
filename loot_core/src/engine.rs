use crate::service::LootService;
use crate::table::LootTable;
use crate::types::EntityKind;
use std::collections::HashMap;

/// In-memory loot resolution engine
#[derive(Debug, Default)]
pub struct LootEngine {
    tables_by_id: HashMap<String, LootTable>,
    mob_tables: HashMap<EntityKind, LootTable>,
}

impl LootEngine {
    /// Create an engine with empty catalogs
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tables registered by id
    pub fn table_count(&self) -> usize {
        self.tables_by_id.len()
    }

    /// Number of mob kinds with a bound table
    pub fn mob_binding_count(&self) -> usize {
        self.mob_tables.len()
    }

    /// List all table ids registered by id
    pub fn table_ids(&self) -> impl Iterator<Item = &str> {
        self.tables_by_id.keys().map(|s| s.as_str())
    }

    /// List all mob kinds with a bound table
    pub fn mob_kinds(&self) -> impl Iterator<Item = &EntityKind> {
        self.mob_tables.keys()
    }
}

impl LootService for LootEngine {
    fn register_loot_table_by_id(&mut self, table: LootTable) {
        let id = table.id().to_string();
        if self.tables_by_id.insert(id.clone(), table).is_some() {
            log::info!("Replaced existing generic loot table with ID: {}", id);
        } else {
            log::info!("Registered generic loot table with ID: {}", id);
        }
    }

    fn unregister_loot_table_by_id(&mut self, id: &str) -> bool {
        let removed = self.tables_by_id.remove(id).is_some();
        if removed {
            log::info!("Removed generic loot table with ID: {}", id);
        }
        removed
    }

    fn register_loot_table(&mut self, kind: EntityKind, table: LootTable) {
        let table_id = table.id().to_string();
        if self.mob_tables.insert(kind.clone(), table).is_some() {
            log::info!("Replaced existing loot table for mob type: {}", kind);
        } else {
            log::info!(
                "Registered loot table for mob type: {} (ID: {})",
                kind,
                table_id
            );
        }
    }

    fn unregister_loot_table(&mut self, kind: &EntityKind) -> bool {
        let removed = self.mob_tables.remove(kind).is_some();
        if removed {
            log::info!("Removed loot table for mob type: {}", kind);
        }
        removed
    }

    fn loot_table_by_id(&self, id: &str) -> Option<&LootTable> {
        self.tables_by_id.get(id)
    }

    fn loot_table(&self, kind: &EntityKind) -> Option<&LootTable> {
        self.mob_tables.get(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::LootTableEntry;
    use crate::types::LootType;
    use crate::ResolveError;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn make_test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    fn single_entry_table(id: &str, identifier: &str) -> LootTable {
        let entry = LootTableEntry::new(LootType::Vanilla, identifier, 1.0, 1, 1).unwrap();
        LootTable::new(id, vec![entry]).unwrap()
    }

    fn zombie() -> EntityKind {
        EntityKind::new("ZOMBIE").unwrap()
    }

    #[test]
    fn test_register_and_lookup_by_id() {
        let mut engine = LootEngine::new();
        engine.register_loot_table_by_id(single_entry_table("chest", "DIAMOND"));

        assert_eq!(engine.table_count(), 1);
        assert_eq!(engine.loot_table_by_id("chest").unwrap().id(), "chest");
        assert!(engine.loot_table_by_id("barrel").is_none());
    }

    #[test]
    fn test_register_by_id_replaces_existing() {
        let mut engine = LootEngine::new();
        engine.register_loot_table_by_id(single_entry_table("chest", "DIRT"));
        engine.register_loot_table_by_id(single_entry_table("chest", "DIAMOND"));

        assert_eq!(engine.table_count(), 1);
        let drops = engine.resolve_by_id("chest", &mut make_test_rng()).unwrap();
        assert_eq!(drops[0].identifier, "DIAMOND");
    }

    #[test]
    fn test_mob_binding_last_writer_wins() {
        let mut engine = LootEngine::new();
        engine.register_loot_table(zombie(), single_entry_table("old", "ROTTEN_FLESH"));
        engine.register_loot_table(zombie(), single_entry_table("new", "IRON_INGOT"));

        assert_eq!(engine.mob_binding_count(), 1);
        assert_eq!(engine.loot_table(&zombie()).unwrap().id(), "new");
    }

    #[test]
    fn test_unregister_reports_presence() {
        let mut engine = LootEngine::new();
        engine.register_loot_table_by_id(single_entry_table("chest", "DIAMOND"));
        engine.register_loot_table(zombie(), single_entry_table("zombie", "ROTTEN_FLESH"));

        assert!(engine.unregister_loot_table_by_id("chest"));
        assert!(!engine.unregister_loot_table_by_id("chest"));
        assert!(engine.unregister_loot_table(&zombie()));
        assert!(!engine.unregister_loot_table(&zombie()));
        assert_eq!(engine.table_count(), 0);
        assert_eq!(engine.mob_binding_count(), 0);
    }

    #[test]
    fn test_id_and_mob_catalogs_are_separate() {
        let mut engine = LootEngine::new();
        engine.register_loot_table(zombie(), single_entry_table("zombie", "ROTTEN_FLESH"));

        assert!(engine.loot_table_by_id("zombie").is_none());
        assert!(matches!(
            engine.resolve_by_id("zombie", &mut make_test_rng()),
            Err(ResolveError::UnknownTable(id)) if id == "zombie"
        ));
    }

    #[test]
    fn test_resolve_for_unbound_mob_is_empty() {
        let engine = LootEngine::new();
        let creeper = EntityKind::new("creeper").unwrap();
        assert!(engine.resolve_for_mob(&creeper, &mut make_test_rng()).is_empty());
    }

    #[test]
    fn test_usable_as_trait_object() {
        let mut service: Box<dyn LootService> = Box::new(LootEngine::new());
        service.register_loot_table_by_id(single_entry_table("chest", "DIAMOND"));
        service.register_loot_table(zombie(), single_entry_table("zombie", "ROTTEN_FLESH"));

        assert_eq!(service.loot_table_by_id("chest").unwrap().id(), "chest");
        let drops = service.loot_table(&zombie()).unwrap().resolve(&mut make_test_rng());
        assert_eq!(drops[0].identifier, "ROTTEN_FLESH");
        assert!(service.unregister_loot_table_by_id("chest"));
    }

    #[test]
    fn test_resolve_for_bound_mob() {
        let mut engine = LootEngine::new();
        engine.register_loot_table(zombie(), single_entry_table("zombie", "ROTTEN_FLESH"));

        let lowercase = EntityKind::new("zombie").unwrap();
        let drops = engine.resolve_for_mob(&lowercase, &mut make_test_rng());
        assert_eq!(drops.len(), 1);
        assert_eq!(drops[0].identifier, "ROTTEN_FLESH");
        assert_eq!(drops[0].count, 1);
    }
}
