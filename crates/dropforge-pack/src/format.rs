//! On-disk table format (loot_tables/**/*.json).

use serde::Deserialize;

use dropforge_loot::{ConfigError, NumberProvider};

/// Raw file shape of a loot table definition.
#[derive(Debug, Clone, Deserialize)]
pub struct TableFile {
    #[serde(rename = "type")]
    pub table_type: String,
    #[serde(default)]
    pub pools: Vec<PoolFile>,
}

impl TableFile {
    pub fn parse_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PoolFile {
    #[serde(default = "default_rolls")]
    pub rolls: NumberField,
    #[serde(rename = "bonus-rolls", default)]
    pub bonus_rolls: Option<NumberField>,
    /// A unique pool never picks the same entry twice in one trigger.
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub entries: Vec<EntryFile>,
}

fn default_rolls() -> NumberField {
    NumberField::Number(1.0)
}

#[derive(Debug, Clone, Deserialize)]
pub struct EntryFile {
    /// Raw condition tags, e.g. `"entity-type:zombie"` or `"!world:creative"`.
    #[serde(default)]
    pub conditions: Vec<String>,
    /// Omitted weight marks the entry as guaranteed loot.
    #[serde(default)]
    pub weight: Option<NumberField>,
    #[serde(default)]
    pub quality: Option<NumberField>,
    #[serde(default)]
    pub items: Vec<ItemFile>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemFile {
    pub item: String,
    /// Defaults to 1.
    #[serde(default)]
    pub amount: Option<NumberField>,
}

/// A numeric field: a JSON number or a `"min-max"` range string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumberField {
    Number(f64),
    Text(String),
}

impl NumberField {
    /// Convert into an engine number spec.
    pub fn to_provider(&self) -> Result<NumberProvider, ConfigError> {
        match self {
            NumberField::Number(value) => Ok(NumberProvider::Constant(*value)),
            NumberField::Text(text) => NumberProvider::parse(text),
        }
    }
}
