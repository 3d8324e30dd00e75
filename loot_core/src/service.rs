use crate::drop::Drop;
use crate::table::LootTable;
use crate::types::EntityKind;
use crate::ResolveError;
use rand::Rng;

/// Catalog of registered loot tables, keyed by table id and by mob kind
///
/// The reload registry drives the register/unregister half; drop triggers
/// use the lookups and the provided `resolve_*` methods. A kind or id holds
/// at most one table: registering again replaces the previous binding.
pub trait LootService {
    /// Register a table under its own id, replacing any table with that id
    fn register_loot_table_by_id(&mut self, table: LootTable);

    /// Remove the table registered under `id`; `false` if there was none
    fn unregister_loot_table_by_id(&mut self, id: &str) -> bool;

    /// Bind a table to a mob kind, replacing any previous binding
    fn register_loot_table(&mut self, kind: EntityKind, table: LootTable);

    /// Remove the binding for `kind`; `false` if there was none
    fn unregister_loot_table(&mut self, kind: &EntityKind) -> bool;

    fn loot_table_by_id(&self, id: &str) -> Option<&LootTable>;

    fn loot_table(&self, kind: &EntityKind) -> Option<&LootTable>;

    /// Resolve the table registered under `id`
    ///
    /// An id that was never registered is a caller error, unlike an unlucky
    /// roll which is just an empty list.
    fn resolve_by_id<R: Rng>(&self, id: &str, rng: &mut R) -> Result<Vec<Drop>, ResolveError>
    where
        Self: Sized,
    {
        let table = self
            .loot_table_by_id(id)
            .ok_or_else(|| ResolveError::UnknownTable(id.to_string()))?;
        Ok(table.resolve(rng))
    }

    /// Resolve the table bound to `kind`; a kind without a table drops nothing
    fn resolve_for_mob<R: Rng>(&self, kind: &EntityKind, rng: &mut R) -> Vec<Drop>
    where
        Self: Sized,
    {
        match self.loot_table(kind) {
            Some(table) => table.resolve(rng),
            None => {
                log::trace!("No loot table bound to mob kind {}", kind);
                Vec::new()
            }
        }
    }
}
