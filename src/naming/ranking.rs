//! Ranking of tables sharing a match key by incoming-reference count

use std::collections::{BTreeMap, BTreeSet};

use crate::schema::{Catalog, NamedObjectKey, Table};

use super::match_keys::derive_match_keys;

/// Per-catalog ranking of tables sharing a match key
///
/// A table outranks another for a match key when more declared foreign keys
/// elsewhere point at it. Generically-named tables with little connectivity
/// thereby lose to the heavily-referenced table of the same name, which
/// keeps them from being misidentified as canonical parents.
#[derive(Debug)]
pub struct TableRanking {
    keys_by_table: BTreeMap<NamedObjectKey, BTreeSet<String>>,
    top_count_by_key: BTreeMap<String, usize>,
    incoming_by_table: BTreeMap<NamedObjectKey, usize>,
}

impl TableRanking {
    /// Build the ranking from a catalog snapshot
    pub fn new(catalog: &Catalog, separator: char) -> Self {
        let names: Vec<String> = catalog.tables().map(|t| t.name.clone()).collect();
        let keys_by_name = derive_match_keys(&names, separator);

        let mut keys_by_table = BTreeMap::new();
        let mut incoming_by_table = BTreeMap::new();
        for table in catalog.tables() {
            let keys = keys_by_name
                .get(&table.name.to_lowercase())
                .cloned()
                .unwrap_or_default();
            keys_by_table.insert(table.key.clone(), keys);
            incoming_by_table.insert(
                table.key.clone(),
                catalog.incoming_reference_count(&table.key),
            );
        }

        let mut top_count_by_key: BTreeMap<String, usize> = BTreeMap::new();
        for (table_key, keys) in &keys_by_table {
            let count = incoming_by_table[table_key];
            for key in keys {
                let top = top_count_by_key.entry(key.clone()).or_insert(0);
                if count > *top {
                    *top = count;
                }
            }
        }

        Self {
            keys_by_table,
            top_count_by_key,
            incoming_by_table,
        }
    }

    /// Match keys of a ranked table
    pub fn match_keys(&self, table: &NamedObjectKey) -> Option<&BTreeSet<String>> {
        self.keys_by_table.get(table)
    }

    /// Incoming-reference count of a ranked table
    pub fn incoming_references(&self, table: &NamedObjectKey) -> usize {
        self.incoming_by_table.get(table).copied().unwrap_or(0)
    }

    /// Whether the table is a top-ranked candidate for at least one of its
    /// match keys
    ///
    /// Default-true: a table with no match keys, or whose keys are claimed
    /// by no ranked table, passes. Only a table clearly outranked on every
    /// shared key fails.
    pub fn is_top_ranked_candidate(&self, table: &Table) -> bool {
        let Some(keys) = self.keys_by_table.get(&table.key) else {
            return true;
        };
        if keys.is_empty() {
            return true;
        }

        let count = self.incoming_references(&table.key);
        let mut any_claimed = false;
        for key in keys {
            if let Some(top) = self.top_count_by_key.get(key) {
                any_claimed = true;
                if count == *top {
                    return true;
                }
            }
        }
        !any_claimed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Column, DataType, PrimaryKey, TableReference};

    fn table(name: &str) -> Table {
        Table::new("app", name)
            .with_column(Column::new("id", DataType::integer()))
            .with_primary_key(PrimaryKey::new(format!("pk_{}", name), &["id"]))
    }

    fn referencing(name: &str, parent: &str) -> Table {
        let child_key = NamedObjectKey::from_parts(&["app", name]);
        let parent_key = NamedObjectKey::from_parts(&["app", parent]);
        Table::new("app", name)
            .with_column(Column::new("id", DataType::integer()))
            .with_column(Column::new("target_id", DataType::integer()))
            .with_primary_key(PrimaryKey::new(format!("pk_{}", name), &["id"]))
            .with_foreign_key(TableReference::foreign_key(
                format!("fk_{}", name),
                child_key,
                parent_key,
                &[("target_id", "id")],
            ))
    }

    #[test]
    fn test_outranked_table_loses() {
        // both tables share the match key "user"; only app.users is referenced
        let mut catalog = Catalog::new();
        catalog.add_table(table("users"));
        catalog.add_table(table("user"));
        catalog.add_table(referencing("sessions", "users"));

        let ranking = TableRanking::new(&catalog, '_');
        let users = catalog
            .table(&NamedObjectKey::from_parts(&["app", "users"]))
            .unwrap();
        let user = catalog
            .table(&NamedObjectKey::from_parts(&["app", "user"]))
            .unwrap();
        assert!(ranking.is_top_ranked_candidate(users));
        assert!(!ranking.is_top_ranked_candidate(user));
    }

    #[test]
    fn test_ties_are_retained() {
        let mut catalog = Catalog::new();
        catalog.add_table(table("users"));
        catalog.add_table(table("user"));

        let ranking = TableRanking::new(&catalog, '_');
        for t in catalog.tables() {
            assert!(ranking.is_top_ranked_candidate(t));
        }
    }

    #[test]
    fn test_unranked_table_passes() {
        let catalog = Catalog::new();
        let ranking = TableRanking::new(&catalog, '_');
        let stray = table("strays");
        assert!(ranking.is_top_ranked_candidate(&stray));
    }
}
