//! Loot pools and tables: weighted selection over eligible entries.

use std::fmt;

use rand::{Rng, RngCore};

use crate::context::LootContext;
use crate::entry::{LootDrop, LootEntry};
use crate::number::NumberProvider;

/// What kind of trigger a table answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LootTableType {
    /// An entity died.
    Entity,
    /// A block was broken.
    Block,
    /// A container was opened for the first time.
    Chest,
    /// Something was fished up.
    Fishing,
}

impl LootTableType {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "entity" => Some(Self::Entity),
            "block" => Some(Self::Block),
            "chest" => Some(Self::Chest),
            "fishing" => Some(Self::Fishing),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Entity => "entity",
            Self::Block => "block",
            Self::Chest => "chest",
            Self::Fishing => "fishing",
        }
    }
}

impl fmt::Display for LootTableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An ordered set of entries, a subset of which is selected per trigger.
#[derive(Debug, Clone)]
pub struct LootPool {
    /// How many weighted picks to make.
    pub rolls: NumberProvider,
    /// Extra rolls granted per point of context luck.
    pub bonus_rolls: Option<NumberProvider>,
    /// A unique pool removes a picked entry from later rolls.
    pub unique: bool,
    pub entries: Vec<LootEntry>,
}

impl LootPool {
    /// Select the entries this pool yields for one trigger, in selection
    /// order.
    ///
    /// Guaranteed entries (no weight spec) whose conditions pass are always
    /// returned first, in pool order. Each roll then draws one weighted
    /// entry proportionally to its luck-adjusted weight; a roll over an
    /// empty or zero-weight candidate set yields nothing.
    pub fn select<'a>(&'a self, ctx: &LootContext, rng: &mut dyn RngCore) -> Vec<&'a LootEntry> {
        let mut selected = Vec::new();
        let mut weighted: Vec<(&LootEntry, i64)> = Vec::new();
        for entry in &self.entries {
            if !entry.check(ctx, rng) {
                continue;
            }
            if entry.is_weighted() {
                // Negative effective weights degrade to ineligibility.
                let weight = entry.effective_weight(ctx, rng);
                if weight > 0 {
                    weighted.push((entry, weight));
                }
            } else {
                selected.push(entry);
            }
        }

        let mut rolls = self.rolls.integer(rng);
        if let Some(bonus) = &self.bonus_rolls {
            rolls += (bonus.value(rng) * ctx.luck).floor() as i64;
        }

        for _ in 0..rolls.max(0) {
            let total: i64 = weighted.iter().map(|(_, weight)| weight).sum();
            if total == 0 {
                break;
            }
            let mut drawn = rng.gen_range(0..total);
            let picked = weighted.iter().position(|(_, weight)| {
                if drawn < *weight {
                    true
                } else {
                    drawn -= *weight;
                    false
                }
            });
            if let Some(index) = picked {
                let (entry, _) = if self.unique {
                    weighted.remove(index)
                } else {
                    weighted[index]
                };
                selected.push(entry);
            }
        }

        selected
    }
}

/// A named, typed collection of pools.
///
/// The slash-delimited name is organizational only; see
/// [`LootTableRegistry::hierarchy`](crate::registry::LootTableRegistry::hierarchy).
#[derive(Debug, Clone)]
pub struct LootTable {
    /// Hierarchical name, e.g. `"mobs/zombie/normal"`.
    pub name: String,
    pub table_type: LootTableType,
    pub pools: Vec<LootPool>,
}

impl LootTable {
    /// Run every pool's selection and resolve the picked entries into
    /// drops.
    pub fn generate(&self, ctx: &LootContext, rng: &mut dyn RngCore) -> Vec<LootDrop> {
        let mut drops = Vec::new();
        for pool in &self.pools {
            for entry in pool.select(ctx, rng) {
                drops.extend(entry.generate(rng));
            }
        }
        drops
    }
}
