//! StatModifierSet - Immutable additive stat bonuses
//!
//! A set never stores a zero (or non-finite) bonus: a zero contribution is
//! the same as no contribution. Every "mutation" returns a new set.
//!
//! Bonuses are floats, so sums that cancel leave rounding residue. Anything
//! smaller than [`ZERO_EPSILON`] counts as zero, and equality allows the same
//! rounding slack, which keeps merge associative for fractional bonuses.

use loot_core::Stat;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Magnitude below which a summed bonus is treated as zero
pub const ZERO_EPSILON: f64 = 1e-9;

/// Relative tolerance used when comparing two bonuses
const EQ_TOLERANCE: f64 = 1e-9;

/// Additive bonuses keyed by stat
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "BTreeMap<Stat, f64>", into = "BTreeMap<Stat, f64>")]
pub struct StatModifierSet {
    bonuses: BTreeMap<Stat, f64>,
}

impl StatModifierSet {
    /// The empty set, identity element of [`merge`](Self::merge)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a set from loosely authored input
    ///
    /// Missing stats, missing values, zeros and non-finite values are dropped
    /// rather than rejected. A stat listed twice has its values summed.
    pub fn normalize<I>(raw: I) -> Self
    where
        I: IntoIterator<Item = (Option<Stat>, Option<f64>)>,
    {
        let mut bonuses: BTreeMap<Stat, f64> = BTreeMap::new();
        for (stat, value) in raw {
            if let (Some(stat), Some(value)) = (stat, value) {
                if value.is_finite() {
                    *bonuses.entry(stat).or_insert(0.0) += value;
                }
            }
        }
        Self::from_summed(bonuses)
    }

    /// Sum two sets stat by stat
    ///
    /// Commutative and associative; stats that cancel out are dropped.
    pub fn merge(a: &StatModifierSet, b: &StatModifierSet) -> StatModifierSet {
        let mut bonuses = a.bonuses.clone();
        for (stat, value) in &b.bonuses {
            *bonuses.entry(*stat).or_insert(0.0) += value;
        }
        Self::from_summed(bonuses)
    }

    /// Merge any number of sets, starting from the empty set
    pub fn merge_all<'a, I>(sets: I) -> StatModifierSet
    where
        I: IntoIterator<Item = &'a StatModifierSet>,
    {
        sets.into_iter()
            .fold(StatModifierSet::empty(), |acc, set| StatModifierSet::merge(&acc, set))
    }

    /// Bonus for `stat`, 0.0 when absent
    pub fn get(&self, stat: Stat) -> f64 {
        self.bonuses.get(&stat).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, stat: Stat) -> bool {
        self.bonuses.contains_key(&stat)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Stat, f64)> + '_ {
        self.bonuses.iter().map(|(stat, value)| (*stat, *value))
    }

    pub fn len(&self) -> usize {
        self.bonuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bonuses.is_empty()
    }

    /// Copy of this set with `stat` set to `value` (zero removes it)
    pub fn with(&self, stat: Stat, value: f64) -> StatModifierSet {
        let mut bonuses = self.bonuses.clone();
        bonuses.insert(stat, value);
        Self::from_summed(bonuses)
    }

    /// Copy of this set without `stat`
    pub fn without(&self, stat: Stat) -> StatModifierSet {
        let mut bonuses = self.bonuses.clone();
        bonuses.remove(&stat);
        StatModifierSet { bonuses }
    }

    /// Copy of this set with every bonus multiplied by `factor`
    pub fn scaled(&self, factor: f64) -> StatModifierSet {
        let bonuses = self
            .bonuses
            .iter()
            .map(|(stat, value)| (*stat, value * factor))
            .collect();
        Self::from_summed(bonuses)
    }

    fn from_summed(mut bonuses: BTreeMap<Stat, f64>) -> Self {
        bonuses.retain(|_, value| value.is_finite() && value.abs() >= ZERO_EPSILON);
        StatModifierSet { bonuses }
    }
}

fn approx_eq(a: f64, b: f64) -> bool {
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= ZERO_EPSILON + EQ_TOLERANCE * scale
}

/// Stat-by-stat comparison within rounding tolerance; an absent stat
/// compares as 0.0
impl PartialEq for StatModifierSet {
    fn eq(&self, other: &Self) -> bool {
        self.bonuses
            .keys()
            .chain(other.bonuses.keys())
            .all(|stat| approx_eq(self.get(*stat), other.get(*stat)))
    }
}

impl FromIterator<(Stat, f64)> for StatModifierSet {
    fn from_iter<I: IntoIterator<Item = (Stat, f64)>>(iter: I) -> Self {
        Self::normalize(iter.into_iter().map(|(stat, value)| (Some(stat), Some(value))))
    }
}

impl From<BTreeMap<Stat, f64>> for StatModifierSet {
    fn from(raw: BTreeMap<Stat, f64>) -> Self {
        raw.into_iter().collect()
    }
}

impl From<StatModifierSet> for BTreeMap<Stat, f64> {
    fn from(set: StatModifierSet) -> Self {
        set.bonuses
    }
}
