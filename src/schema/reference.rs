//! Table references: declared foreign keys and inferred weak associations

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::column::ColumnRef;
use super::key::NamedObjectKey;

/// Cardinality of one side of a table reference or relationship
///
/// Each variant carries a `(min..max)` reading; `ManyMany` only occurs on
/// relationships realized through a bridge table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    Unknown,
    ZeroOne,
    ZeroMany,
    OneOne,
    OneMany,
    ManyMany,
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Cardinality::Unknown => "unknown",
            Cardinality::ZeroOne => "(0..1)",
            Cardinality::ZeroMany => "(0..many)",
            Cardinality::OneOne => "(1..1)",
            Cardinality::OneMany => "(1..many)",
            Cardinality::ManyMany => "(many..many)",
        };
        write!(f, "{}", repr)
    }
}

/// Whether a table reference was declared in the database or inferred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReferenceKind {
    /// Declared foreign-key constraint
    ForeignKey,
    /// Naming-pattern inferred association, not backed by a constraint
    WeakAssociation,
}

/// One (foreign column, primary column) pair of a table reference
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnReferencePair {
    /// Position of the pair within a multi-column reference, starting at 1
    pub key_sequence: u32,
    /// Referencing column, owned by the dependent table
    pub foreign: ColumnRef,
    /// Referenced column, owned by the parent table
    pub primary: ColumnRef,
}

/// Identity of a table reference within a catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceId {
    /// Key of the dependent (child) table the reference is declared on
    pub child_table: NamedObjectKey,
    /// Constraint or generated reference name
    pub name: String,
}

impl fmt::Display for ReferenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.child_table, self.name)
    }
}

/// Foreign key or weak association between two tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableReference {
    /// Constraint name, or a generated name for weak associations
    pub name: String,
    /// Declared versus inferred
    pub kind: ReferenceKind,
    /// Ordered column pairs making up the reference
    pub column_pairs: Vec<ColumnReferencePair>,
    /// Key of the dependent (child) table
    pub child_table: NamedObjectKey,
    /// Key of the referenced (parent) table
    pub parent_table: NamedObjectKey,
    /// Whether the dependent side may be absent (nullable referencing columns)
    pub optional: bool,
    /// Inferred cardinality, written back after classification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cardinality: Option<Cardinality>,
}

impl TableReference {
    /// Create a declared foreign key between two tables
    ///
    /// `pairs` lists (foreign column, primary column) names in key order;
    /// foreign columns belong to `child_table`, primary columns to
    /// `parent_table`.
    pub fn foreign_key(
        name: impl Into<String>,
        child_table: NamedObjectKey,
        parent_table: NamedObjectKey,
        pairs: &[(&str, &str)],
    ) -> Self {
        let column_pairs = pairs
            .iter()
            .enumerate()
            .map(|(i, (foreign, primary))| ColumnReferencePair {
                key_sequence: i as u32 + 1,
                foreign: ColumnRef::new(child_table.clone(), *foreign),
                primary: ColumnRef::new(parent_table.clone(), *primary),
            })
            .collect();
        Self {
            name: name.into(),
            kind: ReferenceKind::ForeignKey,
            column_pairs,
            child_table,
            parent_table,
            optional: false,
            cardinality: None,
        }
    }

    /// Mark the dependent side optional
    pub fn as_optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Identity of this reference within its catalog
    pub fn id(&self) -> ReferenceId {
        ReferenceId {
            child_table: self.child_table.clone(),
            name: self.name.clone(),
        }
    }

    /// Whether both endpoints are the same table
    pub fn is_self_referencing(&self) -> bool {
        self.child_table == self.parent_table
    }

    /// Whether the dependent side may be absent
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Names of the referencing columns on the dependent table
    pub fn child_column_set(&self) -> BTreeSet<String> {
        self.column_pairs
            .iter()
            .map(|p| p.foreign.column_name.clone())
            .collect()
    }

    /// Names of the referenced columns on the parent table
    pub fn parent_column_set(&self) -> BTreeSet<String> {
        self.column_pairs
            .iter()
            .map(|p| p.primary.column_name.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_reference() -> TableReference {
        TableReference::foreign_key(
            "fk_order_customer",
            NamedObjectKey::from_parts(&["sales", "orders"]),
            NamedObjectKey::from_parts(&["sales", "customers"]),
            &[("customer_id", "id")],
        )
    }

    #[test]
    fn test_key_sequence_starts_at_one() {
        let fk = sample_reference();
        assert_eq!(fk.column_pairs[0].key_sequence, 1);
    }

    #[test]
    fn test_self_reference() {
        let key = NamedObjectKey::from_parts(&["hr", "employees"]);
        let fk = TableReference::foreign_key(
            "fk_manager",
            key.clone(),
            key,
            &[("manager_id", "id")],
        );
        assert!(fk.is_self_referencing());
        assert!(!sample_reference().is_self_referencing());
    }

    #[test]
    fn test_column_sets() {
        let fk = sample_reference();
        assert!(fk.child_column_set().contains("customer_id"));
        assert!(fk.parent_column_set().contains("id"));
    }

    #[test]
    fn test_cardinality_display() {
        assert_eq!(Cardinality::ZeroOne.to_string(), "(0..1)");
        assert_eq!(Cardinality::OneMany.to_string(), "(1..many)");
        assert_eq!(Cardinality::Unknown.to_string(), "unknown");
    }
}
