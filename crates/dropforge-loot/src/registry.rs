//! Process-wide table registry and the derived hierarchy view.

use std::collections::HashMap;

use crate::table::{LootTable, LootTableType};

/// Registry of loaded loot tables, keyed by their hierarchical name.
///
/// Writes happen during setup or an explicit reload; resolution only
/// reads. The registry does no locking of its own.
#[derive(Debug, Default)]
pub struct LootTableRegistry {
    tables: HashMap<String, LootTable>,
}

impl LootTableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table under its name, replacing any previous table with
    /// that name. Returns whether a replacement happened.
    pub fn register(&mut self, table: LootTable) -> bool {
        self.tables.insert(table.name.clone(), table).is_some()
    }

    /// Remove a table. Returns whether it existed.
    pub fn unregister(&mut self, name: &str) -> bool {
        self.tables.remove(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&LootTable> {
        self.tables.get(name)
    }

    /// All tables, ordered case-insensitively by name.
    pub fn tables(&self) -> Vec<&LootTable> {
        let mut tables: Vec<&LootTable> = self.tables.values().collect();
        tables.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        tables
    }

    /// Tables answering one kind of trigger, ordered as [`tables`].
    ///
    /// [`tables`]: LootTableRegistry::tables
    pub fn tables_of_type(&self, table_type: LootTableType) -> Vec<&LootTable> {
        self.tables()
            .into_iter()
            .filter(|table| table.table_type == table_type)
            .collect()
    }

    /// Replace the whole table set. A reload is a full swap, never an
    /// in-place edit.
    pub fn reload(&mut self, tables: impl IntoIterator<Item = LootTable>) {
        self.tables.clear();
        for table in tables {
            self.register(table);
        }
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Group tables into a display tree by their `/`-separated names. The
    /// grouping is recomputed here on demand; nothing hierarchical is
    /// stored.
    pub fn hierarchy(&self) -> TableTree {
        let mut root = TableTree::default();
        for table in self.tables.values() {
            root.add(&table.name, table.table_type);
        }
        root.sort();
        root
    }
}

/// A branch of the display hierarchy: child branches plus the leaf tables
/// directly underneath.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TableTree {
    /// `(segment, subtree)`, ordered case-insensitively by segment.
    pub branches: Vec<(String, TableTree)>,
    /// Ordered by table type name, then case-insensitively by leaf name.
    pub leaves: Vec<TableLeaf>,
}

/// A table as it appears in the hierarchy view.
#[derive(Debug, PartialEq, Eq)]
pub struct TableLeaf {
    pub name: String,
    pub table_type: LootTableType,
}

impl TableTree {
    fn add(&mut self, name: &str, table_type: LootTableType) {
        match name.split_once('/') {
            Some((segment, rest)) => {
                let index = match self.branches.iter().position(|(s, _)| s == segment) {
                    Some(index) => index,
                    None => {
                        self.branches.push((segment.to_string(), TableTree::default()));
                        self.branches.len() - 1
                    }
                };
                self.branches[index].1.add(rest, table_type);
            }
            None => self.leaves.push(TableLeaf {
                name: name.to_string(),
                table_type,
            }),
        }
    }

    fn sort(&mut self) {
        self.branches
            .sort_by(|(a, _), (b, _)| a.to_lowercase().cmp(&b.to_lowercase()));
        self.leaves.sort_by(|a, b| {
            a.table_type
                .name()
                .cmp(b.table_type.name())
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });
        for (_, branch) in &mut self.branches {
            branch.sort();
        }
    }
}
