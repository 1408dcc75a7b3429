//! Per-trigger context: the facts conditions evaluate against.

use std::collections::HashMap;

/// Snapshot of what is happening at the moment loot is generated.
///
/// Built by the host once per trigger, read-only for the duration of one
/// resolution, discarded afterwards. Conditions that need an absent field
/// simply fail.
#[derive(Debug, Clone, Default)]
pub struct LootContext {
    /// Type id of the looted entity, e.g. `"zombie"`.
    pub entity_type: Option<String>,
    /// Type id of whatever ultimately caused the death.
    pub killer_type: Option<String>,
    pub world: Option<String>,
    pub biome: Option<String>,
    /// Block type for block-break triggers.
    pub block_type: Option<String>,
    pub death_cause: Option<String>,
    pub spawn_reason: Option<String>,
    /// Item type id of the tool used, if any.
    pub tool_type: Option<String>,
    /// Enchantment name -> level on the tool used.
    pub tool_enchantments: HashMap<String, u32>,
    /// Whether the looted animal or crop was fully grown.
    pub fully_grown: Option<bool>,
    /// Whether the death was caused by a charged explosion.
    pub charged_explosion: bool,
    /// Luck level biasing weighted selection (attribute plus tool bonus,
    /// derived by the host).
    pub luck: f64,
    /// Host-supplied extension fields for custom conditions.
    pub extra: HashMap<String, String>,
}

impl LootContext {
    pub fn new() -> Self {
        Self::default()
    }
}
