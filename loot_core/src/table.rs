use crate::drop::Drop;
use crate::types::LootType;
use crate::ValidationError;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

/// One chance-gated drop candidate of a loot table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LootTableEntry {
    identifier: String,
    loot_type: LootType,
    drop_chance: f64,
    min_count: u32,
    max_count: u32,
}

impl LootTableEntry {
    /// Create an entry, validating its invariants
    ///
    /// * `identifier` must not be blank
    /// * `drop_chance` must lie in `(0, 1]`
    /// * `1 <= min_count <= max_count`
    pub fn new(
        loot_type: LootType,
        identifier: impl Into<String>,
        drop_chance: f64,
        min_count: u32,
        max_count: u32,
    ) -> Result<Self, ValidationError> {
        let identifier = identifier.into();
        if identifier.trim().is_empty() {
            return Err(ValidationError::BlankIdentifier);
        }
        // Written this way round so NaN is rejected too
        if !(drop_chance > 0.0 && drop_chance <= 1.0) {
            return Err(ValidationError::DropChanceOutOfRange(drop_chance));
        }
        if min_count < 1 {
            return Err(ValidationError::MinCountBelowOne);
        }
        if min_count > max_count {
            return Err(ValidationError::InvalidCountRange {
                min: min_count,
                max: max_count,
            });
        }

        Ok(LootTableEntry {
            identifier,
            loot_type,
            drop_chance,
            min_count,
            max_count,
        })
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn loot_type(&self) -> LootType {
        self.loot_type
    }

    pub fn drop_chance(&self) -> f64 {
        self.drop_chance
    }

    pub fn min_count(&self) -> u32 {
        self.min_count
    }

    pub fn max_count(&self) -> u32 {
        self.max_count
    }

    /// Roll this entry once: `None` on a miss, the drop on a hit
    pub fn roll<R: Rng>(&self, rng: &mut R) -> Option<Drop> {
        if rng.gen::<f64>() >= self.drop_chance {
            return None;
        }

        let count = if self.max_count > self.min_count {
            rng.gen_range(self.min_count..=self.max_count)
        } else {
            self.min_count
        };

        Some(Drop {
            identifier: self.identifier.clone(),
            loot_type: self.loot_type,
            count,
        })
    }
}

/// A named, ordered collection of loot entries
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LootTable {
    id: String,
    entries: Vec<LootTableEntry>,
}

impl LootTable {
    /// Create a table; the id must not be blank. An empty entry list is allowed.
    pub fn new(
        id: impl Into<String>,
        entries: Vec<LootTableEntry>,
    ) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::BlankTableId);
        }
        Ok(LootTable { id, entries })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn entries(&self) -> &[LootTableEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve this table into concrete drops
    ///
    /// Every entry is an independent trial: one uniform draw in `[0, 1)` per
    /// entry, a hit when the draw is below the entry's drop chance. Drops come
    /// back in entry order; zero, some or all entries may hit.
    pub fn resolve<R: Rng>(&self, rng: &mut R) -> Vec<Drop> {
        let mut drops = Vec::new();
        for entry in &self.entries {
            if let Some(drop) = entry.roll(rng) {
                drops.push(drop);
            }
        }
        log::trace!(
            "Loot table '{}' resolved {} of {} entries",
            self.id,
            drops.len(),
            self.entries.len()
        );
        drops
    }

    /// Resolve with a fresh RNG seeded from `seed`; same seed, same drops
    pub fn resolve_seeded(&self, seed: u64) -> Vec<Drop> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.resolve(&mut rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    fn stone(chance: f64, min: u32, max: u32) -> LootTableEntry {
        LootTableEntry::new(LootType::Vanilla, "STONE", chance, min, max).unwrap()
    }

    #[test]
    fn test_entry_rejects_inverted_range() {
        let result = LootTableEntry::new(LootType::Vanilla, "STONE", 0.5, 3, 1);
        assert!(matches!(
            result,
            Err(ValidationError::InvalidCountRange { min: 3, max: 1 })
        ));
    }

    #[test]
    fn test_entry_rejects_zero_chance() {
        let result = LootTableEntry::new(LootType::Vanilla, "STONE", 0.0, 1, 1);
        assert!(matches!(result, Err(ValidationError::DropChanceOutOfRange(_))));
    }

    #[test]
    fn test_entry_rejects_bad_chances() {
        for chance in [-0.1, 1.01, f64::NAN] {
            let result = LootTableEntry::new(LootType::Vanilla, "STONE", chance, 1, 1);
            assert!(
                matches!(result, Err(ValidationError::DropChanceOutOfRange(_))),
                "chance {} should be rejected",
                chance
            );
        }
    }

    #[test]
    fn test_entry_rejects_zero_min_count() {
        let result = LootTableEntry::new(LootType::Vanilla, "STONE", 1.0, 0, 2);
        assert!(matches!(result, Err(ValidationError::MinCountBelowOne)));
    }

    #[test]
    fn test_entry_rejects_blank_identifier() {
        let result = LootTableEntry::new(LootType::CustomItem, "  ", 1.0, 1, 1);
        assert!(matches!(result, Err(ValidationError::BlankIdentifier)));
    }

    #[test]
    fn test_table_rejects_blank_id() {
        assert!(matches!(
            LootTable::new("", vec![]),
            Err(ValidationError::BlankTableId)
        ));
    }

    #[test]
    fn test_certain_entry_always_drops() {
        let table = LootTable::new("demo", vec![stone(1.0, 1, 2)]).unwrap();
        let mut rng = make_test_rng();

        for _ in 0..1000 {
            let drops = table.resolve(&mut rng);
            assert_eq!(drops.len(), 1);
            assert_eq!(drops[0].identifier, "STONE");
            assert_eq!(drops[0].loot_type, LootType::Vanilla);
            assert!((1..=2).contains(&drops[0].count));
        }
    }

    #[test]
    fn test_count_covers_whole_range() {
        let table = LootTable::new("range", vec![stone(1.0, 2, 4)]).unwrap();
        let mut rng = make_test_rng();
        let mut seen = [false; 5];

        for _ in 0..1000 {
            for drop in table.resolve(&mut rng) {
                seen[drop.count as usize] = true;
            }
        }

        assert!(!seen[0] && !seen[1]);
        assert!(seen[2] && seen[3] && seen[4]);
    }

    #[test]
    fn test_hit_rate_converges_to_chance() {
        let chance = 0.3;
        let table = LootTable::new("rare", vec![stone(chance, 1, 1)]).unwrap();
        let mut rng = make_test_rng();
        let trials = 100_000;

        let hits: usize = (0..trials).map(|_| table.resolve(&mut rng).len()).sum();
        let rate = hits as f64 / trials as f64;

        // Five standard errors: sqrt(0.3 * 0.7 / 100000) ~= 0.00145
        assert!((rate - chance).abs() < 0.0073, "Hit rate was {}", rate);
    }

    #[test]
    fn test_entries_roll_independently() {
        let entries = vec![
            LootTableEntry::new(LootType::Vanilla, "BONE", 0.5, 1, 1).unwrap(),
            LootTableEntry::new(LootType::Vanilla, "ARROW", 0.5, 1, 1).unwrap(),
        ];
        let table = LootTable::new("skeleton", entries).unwrap();
        let mut rng = make_test_rng();
        let mut outcomes = [0usize; 3];

        for _ in 0..10_000 {
            outcomes[table.resolve(&mut rng).len()] += 1;
        }

        // Two fair coins: none 25%, one 50%, both 25%
        assert!(outcomes[0] > 2000 && outcomes[0] < 3000, "{:?}", outcomes);
        assert!(outcomes[1] > 4500 && outcomes[1] < 5500, "{:?}", outcomes);
        assert!(outcomes[2] > 2000 && outcomes[2] < 3000, "{:?}", outcomes);
    }

    #[test]
    fn test_drops_keep_entry_order() {
        let entries = vec![
            LootTableEntry::new(LootType::Vanilla, "BONE", 1.0, 1, 1).unwrap(),
            LootTableEntry::new(LootType::CustomItem, "cursed_skull", 1.0, 1, 1).unwrap(),
        ];
        let table = LootTable::new("ordered", entries).unwrap();

        let drops = table.resolve(&mut make_test_rng());
        let ids: Vec<&str> = drops.iter().map(|d| d.identifier.as_str()).collect();
        assert_eq!(ids, vec!["BONE", "cursed_skull"]);
    }

    #[test]
    fn test_seeded_resolution_is_reproducible() {
        let entries = vec![stone(0.5, 1, 8), stone(0.25, 2, 3), stone(0.75, 1, 64)];
        let table = LootTable::new("mixed", entries).unwrap();

        for seed in 0..50 {
            assert_eq!(table.resolve_seeded(seed), table.resolve_seeded(seed));
        }
    }

    #[test]
    fn test_empty_table_drops_nothing() {
        let table = LootTable::new("alpha", vec![]).unwrap();
        assert!(table.is_empty());
        assert!(table.resolve(&mut make_test_rng()).is_empty());
    }
}
