//! Per-table entity-type, bridge and cardinality inference

use std::collections::{BTreeSet, HashSet};

use crate::schema::{Cardinality, Catalog, NamedObjectKey, Table, TableReference};

use super::error::ClassifierError;
use super::types::EntityType;

/// Imported reference with its column sets resolved once
#[derive(Debug)]
struct ImportedReference<'a> {
    reference: &'a TableReference,
    child_columns: BTreeSet<String>,
    parent_columns: BTreeSet<String>,
    /// The parent table's own primary-key columns; empty when the parent is
    /// missing from the catalog or has no primary key
    parent_primary_key: BTreeSet<String>,
}

/// Classifies one table from a frozen snapshot of its keys and indexes
///
/// All lookup sets are built eagerly at construction; the classifier must
/// be discarded if the underlying table changes. Imported references are
/// held in reference-name order so every inference is deterministic
/// regardless of crawl order.
#[derive(Debug)]
pub struct TableClassifier<'a> {
    table: &'a Table,
    unique_sets: Vec<BTreeSet<String>>,
    index_sets: Vec<BTreeSet<String>>,
    own_primary_key: BTreeSet<String>,
    imported: Vec<ImportedReference<'a>>,
}

impl<'a> TableClassifier<'a> {
    /// Build a classifier for `table`
    ///
    /// Fails fast when the table is metadata-partial: every inference on it
    /// would be built on missing keys or indexes.
    pub fn new(catalog: &'a Catalog, table: &'a Table) -> Result<Self, ClassifierError> {
        if table.partial {
            return Err(ClassifierError::PartialTable {
                table: table.key.full_name(),
            });
        }

        let own_primary_key = table
            .primary_key
            .as_ref()
            .map(|pk| pk.column_set())
            .unwrap_or_default();

        let mut unique_sets = Vec::new();
        if !own_primary_key.is_empty() {
            unique_sets.push(own_primary_key.clone());
        }
        for index in &table.indexes {
            if index.unique {
                unique_sets.push(index.column_set());
            }
        }

        let index_sets = table.indexes.iter().map(|i| i.column_set()).collect();

        let mut imported: Vec<&TableReference> = table
            .imported_foreign_keys()
            .filter(|r| !r.is_self_referencing())
            .collect();
        imported.sort_by(|a, b| a.name.cmp(&b.name));
        let imported = imported
            .into_iter()
            .map(|reference| ImportedReference {
                child_columns: reference.child_column_set(),
                parent_columns: reference.parent_column_set(),
                parent_primary_key: catalog
                    .table(&reference.parent_table)
                    .and_then(|parent| parent.primary_key.as_ref())
                    .map(|pk| pk.column_set())
                    .unwrap_or_default(),
                reference,
            })
            .collect();

        Ok(Self {
            table,
            unique_sets,
            index_sets,
            own_primary_key,
            imported,
        })
    }

    /// The classified table
    pub fn table(&self) -> &Table {
        self.table
    }

    /// Conceptual entity type of the table; first matching rule wins
    pub fn infer_entity_type(&self) -> EntityType {
        if self.own_primary_key.is_empty() {
            return EntityType::NonEntity;
        }
        if self.subtype_parent().is_some() {
            return EntityType::Subtype;
        }
        if self.imported.iter().any(|r| {
            !r.parent_primary_key.is_empty()
                && r.parent_primary_key == r.parent_columns
                && self.own_primary_key.is_superset(&r.child_columns)
                && self.own_primary_key != r.child_columns
        }) {
            return EntityType::WeakEntity;
        }
        if self.primary_key_is_independent() && self.referenced_table_count() < 2 {
            return EntityType::StrongEntity;
        }
        EntityType::Unknown
    }

    /// The reference identifying this table as a subtype of its parent
    ///
    /// Present iff some imported reference carries the parent's whole
    /// primary key and its referencing columns are exactly this table's
    /// whole primary key. With several qualifying references the first in
    /// reference-name order wins.
    pub fn subtype_parent(&self) -> Option<&TableReference> {
        if self.own_primary_key.is_empty() {
            return None;
        }
        self.imported
            .iter()
            .find(|r| {
                !r.parent_primary_key.is_empty()
                    && r.parent_primary_key == r.parent_columns
                    && r.child_columns == self.own_primary_key
            })
            .map(|r| r.reference)
    }

    /// Whether the table realizes a many-to-many relationship
    ///
    /// True iff at least two imported references point at two distinct
    /// parents, and some pair of references to different parents has
    /// combined referencing columns exactly equal to a unique column set.
    pub fn infer_bridge_table(&self) -> bool {
        if self.imported.len() < 2 {
            return false;
        }
        let parents: HashSet<&NamedObjectKey> = self
            .imported
            .iter()
            .map(|r| &r.reference.parent_table)
            .collect();
        if parents.len() < 2 {
            return false;
        }

        for (i, left) in self.imported.iter().enumerate() {
            for right in &self.imported[i + 1..] {
                if left.reference.parent_table == right.reference.parent_table {
                    continue;
                }
                let combined: BTreeSet<String> = left
                    .child_columns
                    .union(&right.child_columns)
                    .cloned()
                    .collect();
                if self.unique_sets.contains(&combined) {
                    return true;
                }
            }
        }
        false
    }

    /// Cardinality of the parent side of a reference
    ///
    /// `None` is not an error: it yields the `Unknown` sentinel. Uniqueness
    /// means the referencing columns exactly match a unique column set of
    /// this table.
    pub fn infer_foreign_key_cardinality(
        &self,
        reference: Option<&TableReference>,
    ) -> Cardinality {
        let Some(reference) = reference else {
            return Cardinality::Unknown;
        };
        let child_columns = reference.child_column_set();
        let unique = self.unique_sets.contains(&child_columns);
        match (unique, reference.is_optional()) {
            (true, true) => Cardinality::ZeroOne,
            (true, false) => Cardinality::OneOne,
            (false, true) => Cardinality::ZeroMany,
            (false, false) => Cardinality::OneMany,
        }
    }

    /// Whether some index covers the reference's referencing columns
    ///
    /// Tri-state: `None` for a `None` reference, otherwise whether any
    /// index column set is a superset of the referencing columns.
    pub fn is_foreign_key_covered_by_index(
        &self,
        reference: Option<&TableReference>,
    ) -> Option<bool> {
        self.covered_by(reference, &self.index_sets)
    }

    /// Whether some unique index or the primary key covers the reference's
    /// referencing columns
    pub fn is_foreign_key_covered_by_unique_index(
        &self,
        reference: Option<&TableReference>,
    ) -> Option<bool> {
        self.covered_by(reference, &self.unique_sets)
    }

    fn covered_by(
        &self,
        reference: Option<&TableReference>,
        sets: &[BTreeSet<String>],
    ) -> Option<bool> {
        let reference = reference?;
        let child_columns = reference.child_column_set();
        Some(sets.iter().any(|set| set.is_superset(&child_columns)))
    }

    /// No primary-key column participates in any declared foreign key,
    /// self-references included
    fn primary_key_is_independent(&self) -> bool {
        self.table.imported_foreign_keys().all(|reference| {
            reference
                .child_column_set()
                .is_disjoint(&self.own_primary_key)
        })
    }

    /// Distinct other tables this table references, self excluded
    fn referenced_table_count(&self) -> usize {
        let parents: HashSet<&NamedObjectKey> = self
            .imported
            .iter()
            .map(|r| &r.reference.parent_table)
            .collect();
        parents.len()
    }
}
