//! Constraint-shaped view over an accepted association
//!
//! An accepted proposal has no declared constraint behind it, but downstream
//! consumers expect the same shape as a foreign key: a named reference with
//! key-sequenced column pairs and an optionality flag. This module builds
//! that view by composition over the proposal's column references.

use uuid::Uuid;

use crate::schema::{
    Catalog, ColumnReferencePair, ReferenceKind, TableReference,
};

use super::proposal::ProposedAssociation;

/// Generate the deterministic name of a weak association
///
/// UUID v5 over the endpoint column names, so re-running analysis on the
/// same catalog yields the same reference names.
pub fn generate_name(proposal: &ProposedAssociation) -> String {
    let key = format!(
        "{}:{}",
        proposal.foreign.full_name(),
        proposal.primary.full_name()
    );
    let id = Uuid::new_v5(&Uuid::NAMESPACE_OID, key.as_bytes());
    format!("weak_{}", id.simple())
}

/// Materialize an accepted proposal as a weak-association table reference
///
/// Optionality follows the referencing column's nullability; a proposal
/// whose foreign column is missing from the catalog is treated as required.
pub fn materialize(catalog: &Catalog, proposal: &ProposedAssociation) -> TableReference {
    let optional = catalog
        .column(&proposal.foreign)
        .map(|column| column.nullable)
        .unwrap_or(false);

    TableReference {
        name: generate_name(proposal),
        kind: ReferenceKind::WeakAssociation,
        column_pairs: vec![ColumnReferencePair {
            key_sequence: 1,
            foreign: proposal.foreign.clone(),
            primary: proposal.primary.clone(),
        }],
        child_table: proposal.foreign.table_key.clone(),
        parent_table: proposal.primary.table_key.clone(),
        optional,
        cardinality: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Column, ColumnRef, DataType, NamedObjectKey, Table};

    fn proposal() -> ProposedAssociation {
        ProposedAssociation::new(
            ColumnRef::new(NamedObjectKey::from_parts(&["app", "order_items"]), "order_id"),
            ColumnRef::new(NamedObjectKey::from_parts(&["app", "orders"]), "id"),
        )
    }

    #[test]
    fn test_names_are_deterministic() {
        assert_eq!(generate_name(&proposal()), generate_name(&proposal()));
    }

    #[test]
    fn test_materialized_shape() {
        let mut catalog = Catalog::new();
        catalog.add_table(
            Table::new("app", "order_items")
                .with_column(Column::new("order_id", DataType::integer())),
        );

        let reference = materialize(&catalog, &proposal());
        assert_eq!(reference.kind, ReferenceKind::WeakAssociation);
        assert_eq!(reference.column_pairs.len(), 1);
        assert_eq!(reference.column_pairs[0].key_sequence, 1);
        assert_eq!(
            reference.child_table,
            NamedObjectKey::from_parts(&["app", "order_items"])
        );
        // order_id is nullable in this fixture, so the reference is optional
        assert!(reference.optional);
    }
}
