use crate::types::LootType;
use serde::{Deserialize, Serialize};

/// A concrete drop produced by resolving a loot table
///
/// Turning it into an in-world item is up to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drop {
    pub identifier: String,
    pub loot_type: LootType,
    pub count: u32,
}
