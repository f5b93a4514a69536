//! Catalog: the frozen snapshot of crawled tables

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::column::{Column, ColumnRef};
use super::key::NamedObjectKey;
use super::reference::{Cardinality, ReferenceId, ReferenceKind, TableReference};
use super::table::Table;

/// Snapshot of all crawled tables, keyed by their natural keys
///
/// Analysis treats the catalog as frozen; the only mutations are the two
/// write-back operations that record analysis results: materializing
/// accepted weak associations and setting inferred cardinalities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    tables: BTreeMap<NamedObjectKey, Table>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a crawled table, replacing any table with the same key
    pub fn add_table(&mut self, table: Table) {
        self.tables.insert(table.key.clone(), table);
    }

    /// Look up a table by key
    pub fn table(&self, key: &NamedObjectKey) -> Option<&Table> {
        self.tables.get(key)
    }

    /// All tables in stable key order
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    /// All table keys in stable order
    pub fn table_keys(&self) -> impl Iterator<Item = &NamedObjectKey> {
        self.tables.keys()
    }

    /// Number of tables
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether the catalog holds no tables
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Resolve a column reference
    pub fn column(&self, reference: &ColumnRef) -> Option<&Column> {
        self.tables
            .get(&reference.table_key)?
            .column(&reference.column_name)
    }

    /// Number of declared foreign keys elsewhere whose parent is this table
    pub fn incoming_reference_count(&self, key: &NamedObjectKey) -> usize {
        self.tables
            .values()
            .filter(|table| &table.key != key)
            .flat_map(|table| table.imported_foreign_keys())
            .filter(|reference| &reference.parent_table == key)
            .count()
    }

    /// Materialize an accepted weak association onto its dependent table
    ///
    /// Returns false when the dependent table is not in the catalog.
    pub fn add_weak_association(&mut self, reference: TableReference) -> bool {
        debug_assert_eq!(reference.kind, ReferenceKind::WeakAssociation);
        match self.tables.get_mut(&reference.child_table) {
            Some(table) => {
                debug!(
                    reference = %reference.id(),
                    parent = %reference.parent_table,
                    "materializing weak association"
                );
                table.weak_associations.push(reference);
                true
            }
            None => {
                warn!(table = %reference.child_table, "weak association references unknown table");
                false
            }
        }
    }

    /// Write inferred cardinalities back onto the referenced foreign keys
    ///
    /// Returns the number of references updated; unknown reference ids are
    /// skipped with a warning.
    pub fn apply_cardinalities(&mut self, cardinalities: &BTreeMap<ReferenceId, Cardinality>) -> usize {
        let mut updated = 0;
        for (id, cardinality) in cardinalities {
            let reference = self.tables.get_mut(&id.child_table).and_then(|table| {
                table
                    .foreign_keys
                    .iter_mut()
                    .chain(table.weak_associations.iter_mut())
                    .find(|r| r.name == id.name)
            });
            match reference {
                Some(reference) => {
                    reference.cardinality = Some(*cardinality);
                    updated += 1;
                }
                None => warn!(reference = %id, "cardinality for unknown reference"),
            }
        }
        updated
    }
}
