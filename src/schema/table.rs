//! Table model of the crawled schema graph

use serde::{Deserialize, Serialize};

use super::column::Column;
use super::index::{Index, PrimaryKey};
use super::key::NamedObjectKey;
use super::reference::{ReferenceKind, TableReference};

/// Table of a crawled catalog
///
/// Declared foreign keys are stored on the dependent (child) side: the
/// references in `foreign_keys` are the table's imported references, each
/// pointing at a parent table elsewhere in the catalog. Weak associations
/// materialized after analysis are kept separately so declared constraints
/// are never mixed with inferred ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    /// Stable key of the table within its catalog
    pub key: NamedObjectKey,
    /// Schema the table belongs to
    pub schema: String,
    /// Table name
    pub name: String,
    /// Columns in crawled order
    pub columns: Vec<Column>,
    /// Primary key, if declared
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<PrimaryKey>,
    /// Declared indexes
    #[serde(default)]
    pub indexes: Vec<Index>,
    /// Declared foreign keys, this table on the dependent side
    #[serde(default)]
    pub foreign_keys: Vec<TableReference>,
    /// Weak associations materialized onto this table after analysis
    #[serde(default)]
    pub weak_associations: Vec<TableReference>,
    /// Whether the crawler left this table's metadata incomplete
    #[serde(default)]
    pub partial: bool,
}

impl Table {
    /// Create an empty table; the key is derived from schema and name
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
        let schema = schema.into();
        let name = name.into();
        let key = NamedObjectKey::new(vec![schema.clone(), name.clone()]);
        Self {
            key,
            schema,
            name,
            columns: Vec::new(),
            primary_key: None,
            indexes: Vec::new(),
            foreign_keys: Vec::new(),
            weak_associations: Vec::new(),
            partial: false,
        }
    }

    /// Append a column
    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// Set the primary key and flag its member columns
    pub fn with_primary_key(mut self, primary_key: PrimaryKey) -> Self {
        for column in &mut self.columns {
            if primary_key.columns.contains(&column.name) {
                column.part_of_primary_key = true;
                column.nullable = false;
            }
        }
        self.primary_key = Some(primary_key);
        self
    }

    /// Append an index, flagging member columns of unique indexes
    pub fn with_index(mut self, index: Index) -> Self {
        if index.unique {
            for column in &mut self.columns {
                if index.columns.contains(&column.name) {
                    column.part_of_unique_index = true;
                }
            }
        }
        self.indexes.push(index);
        self
    }

    /// Append a declared foreign key and flag its referencing columns
    pub fn with_foreign_key(mut self, reference: TableReference) -> Self {
        for pair in &reference.column_pairs {
            if let Some(column) = self
                .columns
                .iter_mut()
                .find(|c| c.name == pair.foreign.column_name)
            {
                column.part_of_foreign_key = true;
            }
        }
        self.foreign_keys.push(reference);
        self
    }

    /// Mark the table's metadata as incomplete
    pub fn as_partial(mut self) -> Self {
        self.partial = true;
        self
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Declared foreign keys importing a parent key into this table
    pub fn imported_foreign_keys(&self) -> impl Iterator<Item = &TableReference> {
        self.foreign_keys
            .iter()
            .filter(|r| r.kind == ReferenceKind::ForeignKey)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::DataType;

    #[test]
    fn test_key_from_schema_and_name() {
        let table = Table::new("sales", "orders");
        assert_eq!(table.key, NamedObjectKey::from_parts(&["sales", "orders"]));
    }

    #[test]
    fn test_primary_key_flags_columns() {
        let table = Table::new("sales", "orders")
            .with_column(Column::new("id", DataType::integer()))
            .with_column(Column::new("total", DataType::integer()))
            .with_primary_key(PrimaryKey::new("pk_orders", &["id"]));

        let id = table.column("id").unwrap();
        assert!(id.part_of_primary_key);
        assert!(!id.nullable);
        assert!(!table.column("total").unwrap().part_of_primary_key);
    }

    #[test]
    fn test_foreign_key_flags_columns() {
        let table = Table::new("sales", "orders")
            .with_column(Column::new("id", DataType::integer()))
            .with_column(Column::new("customer_id", DataType::integer()))
            .with_foreign_key(TableReference::foreign_key(
                "fk_orders_customer",
                NamedObjectKey::from_parts(&["sales", "orders"]),
                NamedObjectKey::from_parts(&["sales", "customers"]),
                &[("customer_id", "id")],
            ));

        assert!(table.column("customer_id").unwrap().part_of_foreign_key);
        assert!(!table.column("id").unwrap().part_of_foreign_key);
    }
}
