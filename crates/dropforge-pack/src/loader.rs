//! Table loader — scans a directory tree and builds engine tables.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use dropforge_loot::{
    ConditionRegistry, ItemTemplate, LootEntry, LootPool, LootTable, LootTableType, NumberProvider,
};

use crate::format::{EntryFile, PoolFile, TableFile};
use crate::PackError;

/// What to do with an entry whose condition tag does not parse.
///
/// The skip path drops the whole entry, not just the condition, so a gated
/// drop can never lose its gate silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidConditionPolicy {
    /// Drop the offending entry and keep loading the table.
    SkipEntry,
    /// Reject the whole table file.
    FailTable,
}

/// Load every `.json` table under `dir`.
///
/// A table's name is its path relative to `dir` with `/` separators and no
/// extension (`mobs/zombie/normal.json` -> `"mobs/zombie/normal"`), which
/// is what feeds the registry's hierarchy view. Files that fail to load are
/// logged and skipped.
pub fn load_tables(
    dir: &Path,
    conditions: &ConditionRegistry,
    policy: InvalidConditionPolicy,
) -> Vec<LootTable> {
    let mut files = Vec::new();
    collect_json_files(dir, &mut files);
    files.sort();

    let mut tables = Vec::new();
    for path in files {
        let name = table_name(dir, &path);
        match load_table(&path, &name, conditions, policy) {
            Ok(table) => tables.push(table),
            Err(err) => warn!("Failed to load loot table {}: {err}", path.display()),
        }
    }

    if !tables.is_empty() {
        info!("Loaded {} loot table(s) from {}", tables.len(), dir.display());
    }

    tables
}

/// Load a single table file under the given name.
pub fn load_table(
    path: &Path,
    name: &str,
    conditions: &ConditionRegistry,
    policy: InvalidConditionPolicy,
) -> Result<LootTable, PackError> {
    let json = std::fs::read_to_string(path)?;
    parse_table(&json, name, conditions, policy)
}

/// Build one table from already-read JSON text.
pub fn parse_table(
    json: &str,
    name: &str,
    conditions: &ConditionRegistry,
    policy: InvalidConditionPolicy,
) -> Result<LootTable, PackError> {
    let file = TableFile::parse_json(json)?;
    let table_type = LootTableType::from_name(&file.table_type)
        .ok_or_else(|| PackError::UnknownTableType(file.table_type.clone()))?;

    let mut pools = Vec::new();
    for pool in &file.pools {
        pools.push(convert_pool(pool, name, conditions, policy)?);
    }

    Ok(LootTable {
        name: name.to_string(),
        table_type,
        pools,
    })
}

fn convert_pool(
    pool: &PoolFile,
    table: &str,
    conditions: &ConditionRegistry,
    policy: InvalidConditionPolicy,
) -> Result<LootPool, PackError> {
    let mut entries = Vec::new();
    for (index, entry) in pool.entries.iter().enumerate() {
        match convert_entry(entry, conditions) {
            Ok(entry) => entries.push(entry),
            Err(PackError::Condition(err)) if policy == InvalidConditionPolicy::SkipEntry => {
                warn!("Skipping entry {index} of table {table:?}: {err}");
            }
            Err(err) => return Err(err),
        }
    }

    let bonus_rolls = match &pool.bonus_rolls {
        Some(field) => Some(field.to_provider()?),
        None => None,
    };

    Ok(LootPool {
        rolls: pool.rolls.to_provider()?,
        bonus_rolls,
        unique: pool.unique,
        entries,
    })
}

fn convert_entry(entry: &EntryFile, conditions: &ConditionRegistry) -> Result<LootEntry, PackError> {
    let mut parsed = Vec::new();
    for raw in &entry.conditions {
        parsed.push(conditions.parse(raw)?);
    }

    let weight = match &entry.weight {
        Some(field) => Some(field.to_provider()?),
        None => None,
    };
    let quality = match &entry.quality {
        Some(field) => Some(field.to_provider()?),
        None => None,
    };

    let mut items = Vec::new();
    for item in &entry.items {
        let amount = match &item.amount {
            Some(field) => field.to_provider()?,
            None => NumberProvider::Constant(1.0),
        };
        items.push(ItemTemplate {
            item: item.item.clone(),
            amount,
        });
    }

    Ok(LootEntry {
        conditions: parsed,
        weight,
        quality,
        items,
    })
}

fn collect_json_files(dir: &Path, out: &mut Vec<PathBuf>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return,
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_json_files(&path, out);
        } else if path.extension().map(|e| e == "json").unwrap_or(false) {
            out.push(path);
        }
    }
}

fn table_name(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path).with_extension("");
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
