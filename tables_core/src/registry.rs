use crate::config::LootTablesConfig;
use crate::ConfigError;
use loot_core::{EntityKind, LootEngine, LootService, LootTable};
use std::collections::BTreeMap;

/// A snapshot whose tables have all been built, with every resolvable mob
/// assignment bound to one of those tables
#[derive(Debug)]
pub(crate) struct StagedConfig {
    tables: Vec<LootTable>,
    mob_bindings: Vec<(EntityKind, LootTable)>,
}

/// Build every table of `config` and resolve its mob assignments, without
/// side effects
///
/// An assignment naming a table the snapshot does not define is skipped with
/// a warning; only a table that fails to build rejects the snapshot.
pub(crate) fn stage(config: &LootTablesConfig) -> Result<StagedConfig, ConfigError> {
    let tables = config
        .tables()
        .values()
        .map(|definition| definition.build())
        .collect::<Result<Vec<_>, _>>()?;

    let mut mob_bindings = Vec::with_capacity(config.mob_assignments().len());
    for (kind, table_id) in config.mob_assignments() {
        match tables.iter().find(|table| table.id() == table_id) {
            Some(table) => mob_bindings.push((kind.clone(), table.clone())),
            None => log::warn!(
                "Mob loot assignment references unknown table '{}' for {}; skipping",
                table_id,
                kind
            ),
        }
    }

    Ok(StagedConfig {
        tables,
        mob_bindings,
    })
}

/// Keeps a [`LootService`] in sync with the loot configuration
///
/// Each [`apply_config`](Self::apply_config) replaces the applied snapshot
/// wholesale. Tables and mob assignments that disappeared from the snapshot
/// are explicitly unregistered, so reloads never leave stale registrations
/// behind in the service.
#[derive(Debug)]
pub struct LootTableRegistry<S: LootService = LootEngine> {
    service: S,
    tables_by_id: BTreeMap<String, LootTable>,
    table_id_by_mob: BTreeMap<EntityKind, String>,
}

impl Default for LootTableRegistry<LootEngine> {
    fn default() -> Self {
        Self::new(LootEngine::new())
    }
}

impl<S: LootService> LootTableRegistry<S> {
    /// Create a registry in the empty state, driving `service`
    pub fn new(service: S) -> Self {
        LootTableRegistry {
            service,
            tables_by_id: BTreeMap::new(),
            table_id_by_mob: BTreeMap::new(),
        }
    }

    /// Apply a configuration snapshot
    ///
    /// Every table is built first; if one fails nothing is registered or
    /// unregistered and the previous snapshot stays applied. Mob assignments
    /// naming an unknown table are skipped, and a mob bound before the reload
    /// loses its binding. Every unregistration (stale table ids, then stale
    /// mob assignments) happens before any registration, so the service never
    /// sees two tables claiming one id or one mob kind.
    pub fn apply_config(&mut self, config: &LootTablesConfig) -> Result<(), ConfigError> {
        let staged = stage(config).map_err(|error| {
            log::warn!("Rejected loot table config, keeping previous tables: {}", error);
            error
        })?;
        let table_id_by_mob: BTreeMap<EntityKind, String> = staged
            .mob_bindings
            .iter()
            .map(|(kind, table)| (kind.clone(), table.id().to_string()))
            .collect();

        let stale_ids: Vec<String> = self
            .tables_by_id
            .keys()
            .filter(|id| !config.tables().contains_key(*id))
            .cloned()
            .collect();
        let stale_mobs: Vec<EntityKind> = self
            .table_id_by_mob
            .keys()
            .filter(|kind| !table_id_by_mob.contains_key(*kind))
            .cloned()
            .collect();

        // Phase 1: revoke
        for id in &stale_ids {
            self.service.unregister_loot_table_by_id(id);
            log::info!("Unregistered loot table: {}", id);
        }
        for kind in &stale_mobs {
            self.service.unregister_loot_table(kind);
            log::info!("Removed loot table assignment for {}", kind);
        }

        // Phase 2: register
        let mut tables_by_id = BTreeMap::new();
        for table in staged.tables {
            self.service.register_loot_table_by_id(table.clone());
            log::info!("Registered loot table: {}", table.id());
            tables_by_id.insert(table.id().to_string(), table);
        }
        for (kind, table) in staged.mob_bindings {
            log::info!("Assigned loot table '{}' to {}", table.id(), kind);
            self.service.register_loot_table(kind, table);
        }

        self.tables_by_id = tables_by_id;
        self.table_id_by_mob = table_id_by_mob;
        log::info!(
            "Applied loot config: {} tables, {} mob assignments \
             ({} tables and {} assignments removed)",
            self.tables_by_id.len(),
            self.table_id_by_mob.len(),
            stale_ids.len(),
            stale_mobs.len()
        );
        Ok(())
    }

    /// Unregister everything this registry applied and return to the empty state
    pub fn clear(&mut self) {
        for id in self.tables_by_id.keys() {
            self.service.unregister_loot_table_by_id(id);
        }
        for kind in self.table_id_by_mob.keys() {
            self.service.unregister_loot_table(kind);
        }
        self.tables_by_id.clear();
        self.table_id_by_mob.clear();
    }

    /// Get an applied table by ID
    pub fn table(&self, id: &str) -> Option<&LootTable> {
        self.tables_by_id.get(id)
    }

    /// Get the table assigned to a mob kind
    pub fn table_for(&self, kind: &EntityKind) -> Option<&LootTable> {
        self.table_id_by_mob
            .get(kind)
            .and_then(|id| self.tables_by_id.get(id))
    }

    /// List all applied table IDs
    pub fn table_ids(&self) -> impl Iterator<Item = &str> {
        self.tables_by_id.keys().map(|s| s.as_str())
    }

    /// List all applied mob assignments as (kind, table id)
    pub fn mob_assignments(&self) -> impl Iterator<Item = (&EntityKind, &str)> {
        self.table_id_by_mob
            .iter()
            .map(|(kind, id)| (kind, id.as_str()))
    }

    /// True before the first apply and after applying an empty snapshot
    pub fn is_empty(&self) -> bool {
        self.tables_by_id.is_empty() && self.table_id_by_mob.is_empty()
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Direct access to the service, e.g. for tables registered outside
    /// configuration; the registry only tracks what it applied itself
    pub fn service_mut(&mut self) -> &mut S {
        &mut self.service
    }

    pub fn into_service(self) -> S {
        self.service
    }
}
