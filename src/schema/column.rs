//! Column model of the crawled schema graph

use std::fmt;

use serde::{Deserialize, Serialize};

use super::key::NamedObjectKey;

/// Data type of a column as reported by the crawler
///
/// The `standard_name` is the driver-independent name used when comparing
/// columns across tables; `known` is false when the crawler could not map
/// the reported type to a standard one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataType {
    /// Database-reported type name (e.g. "INT4", "VARCHAR(100)")
    pub name: String,
    /// Standard type name used for cross-table comparison (e.g. "INTEGER")
    pub standard_name: String,
    /// Whether the crawler recognized the reported type
    pub known: bool,
}

impl DataType {
    /// Create a known data type
    pub fn new(name: impl Into<String>, standard_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            standard_name: standard_name.into(),
            known: true,
        }
    }

    /// Create a data type the crawler could not identify
    pub fn unrecognized(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            standard_name: name.clone(),
            name,
            known: false,
        }
    }

    /// Standard integer type
    pub fn integer() -> Self {
        Self::new("INT", "INTEGER")
    }

    /// Standard character type
    pub fn varchar() -> Self {
        Self::new("VARCHAR", "VARCHAR")
    }

    /// Whether two columns can plausibly hold the same values
    pub fn is_comparable_to(&self, other: &DataType) -> bool {
        self.known && other.known && self.standard_name.eq_ignore_ascii_case(&other.standard_name)
    }
}

/// Column of a crawled table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Column name
    pub name: String,
    /// Data type as reported by the crawler
    pub data_type: DataType,
    /// Whether the column allows NULL values
    pub nullable: bool,
    /// Whether the column is part of the table's primary key
    #[serde(default)]
    pub part_of_primary_key: bool,
    /// Whether the column is part of a declared foreign key
    #[serde(default)]
    pub part_of_foreign_key: bool,
    /// Whether the column is part of a unique index
    #[serde(default)]
    pub part_of_unique_index: bool,
    /// Whether the crawler left this column's metadata incomplete
    #[serde(default)]
    pub partial: bool,
}

impl Column {
    /// Create a nullable column with no key membership
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable: true,
            part_of_primary_key: false,
            part_of_foreign_key: false,
            part_of_unique_index: false,
            partial: false,
        }
    }

    /// Mark the column NOT NULL
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Mark the column's metadata as incomplete
    pub fn as_partial(mut self) -> Self {
        self.partial = true;
        self
    }
}

/// Reference to a column by its owning table's key and the column name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnRef {
    /// Key of the table that owns the column
    pub table_key: NamedObjectKey,
    /// Column name within that table
    pub column_name: String,
}

impl ColumnRef {
    pub fn new(table_key: NamedObjectKey, column_name: impl Into<String>) -> Self {
        Self {
            table_key,
            column_name: column_name.into(),
        }
    }

    /// Dotted full name, e.g. `sales.orders.id`
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.table_key.full_name(), self.column_name)
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comparable_types() {
        let a = DataType::new("INT4", "INTEGER");
        let b = DataType::new("INT", "integer");
        assert!(a.is_comparable_to(&b));
    }

    #[test]
    fn test_unrecognized_types_never_comparable() {
        let a = DataType::unrecognized("GEOMETRY");
        let b = DataType::unrecognized("GEOMETRY");
        assert!(!a.is_comparable_to(&b));
    }

    #[test]
    fn test_column_ref_full_name() {
        let r = ColumnRef::new(NamedObjectKey::from_parts(&["sales", "orders"]), "id");
        assert_eq!(r.full_name(), "sales.orders.id");
    }
}
