//! Immutable catalog snapshot: every resolved `(schema, file)` entry.

use std::collections::btree_map::{self, BTreeMap};

use flatcat_core::hash::{Fingerprint, Hash256};
use flatcat_core::table::{ResolvedTable, SchemaTableName};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    tables: BTreeMap<SchemaTableName, ResolvedTable>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from resolved entries. A later entry with the same name replaces
    /// an earlier one; the resolver never produces duplicates.
    pub fn from_tables(tables: impl IntoIterator<Item = ResolvedTable>) -> Self {
        Self {
            tables: tables.into_iter().map(|t| (t.name(), t)).collect(),
        }
    }

    /// Distinct schema names, sorted.
    pub fn list_schemas(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for key in self.tables.keys() {
            if out.last() != Some(&key.schema) {
                out.push(key.schema.clone());
            }
        }
        out
    }

    /// Table names of `schema`, sorted. Unknown schemas have none.
    pub fn list_tables(&self, schema: &str) -> Vec<String> {
        self.tables
            .keys()
            .filter(|k| k.schema == schema)
            .map(|k| k.table.clone())
            .collect()
    }

    pub fn get_table(&self, schema: &str, table: &str) -> Option<&ResolvedTable> {
        self.tables.get(&SchemaTableName::new(schema, table))
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn iter(&self) -> btree_map::Values<'_, SchemaTableName, ResolvedTable> {
        self.tables.values()
    }

    /// Stable hash of every entry, its columns and the descriptor behind it.
    /// Equal catalogs hash equal regardless of how they were built.
    pub fn fingerprint(&self) -> Hash256 {
        let mut fp = Fingerprint::new();
        for (name, table) in &self.tables {
            fp.str(&name.schema)
                .str(&name.table)
                .flag(table.columns_inferred)
                .columns(&table.columns)
                .descriptor(&table.descriptor);
        }
        fp.finish()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a ResolvedTable;
    type IntoIter = btree_map::Values<'a, SchemaTableName, ResolvedTable>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
