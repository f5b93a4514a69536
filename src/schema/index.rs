//! Index and primary-key models of the crawled schema graph

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Index over one or more columns of a table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Index {
    /// Index name
    pub name: String,
    /// Ordered column names
    pub columns: Vec<String>,
    /// Whether the index enforces uniqueness
    pub unique: bool,
}

impl Index {
    pub fn new(name: impl Into<String>, columns: &[&str], unique: bool) -> Self {
        Self {
            name: name.into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            unique,
        }
    }

    /// Column names as an order-insensitive set
    pub fn column_set(&self) -> BTreeSet<String> {
        self.columns.iter().cloned().collect()
    }
}

/// Primary key of a table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryKey {
    /// Constraint name
    pub name: String,
    /// Ordered column names
    pub columns: Vec<String>,
}

impl PrimaryKey {
    pub fn new(name: impl Into<String>, columns: &[&str]) -> Self {
        Self {
            name: name.into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Column names as an order-insensitive set
    pub fn column_set(&self) -> BTreeSet<String> {
        self.columns.iter().cloned().collect()
    }
}
