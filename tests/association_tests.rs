//! Weak-association discovery tests

use er_modelling_core::association::{RuleSet, WeakAssociationAnalyzer};
use er_modelling_core::schema::{
    Catalog, Column, ColumnRef, DataType, NamedObjectKey, PrimaryKey, ReferenceKind, Table,
    TableReference,
};

fn key(name: &str) -> NamedObjectKey {
    NamedObjectKey::from_parts(&["app", name])
}

fn column(table: &str, name: &str) -> ColumnRef {
    ColumnRef::new(key(table), name)
}

fn int_column(name: &str) -> Column {
    Column::new(name, DataType::integer())
}

fn orders_table() -> Table {
    Table::new("app", "orders")
        .with_column(int_column("id"))
        .with_primary_key(PrimaryKey::new("pk_orders", &["id"]))
}

fn order_items_table() -> Table {
    Table::new("app", "order_items")
        .with_column(int_column("id"))
        .with_column(int_column("order_id"))
        .with_primary_key(PrimaryKey::new("pk_order_items", &["id"]))
}

fn id_rules() -> RuleSet {
    RuleSet::builder().with_id_matcher().build()
}

fn all_rules() -> RuleSet {
    RuleSet::builder()
        .with_id_matcher()
        .with_extension_tables()
        .build()
}

mod pipeline_tests {
    use super::*;

    #[test]
    fn test_empty_catalog_yields_nothing() {
        let analyzer = WeakAssociationAnalyzer::new(all_rules());
        assert!(analyzer.find_associations(&Catalog::new()).is_empty());
    }

    #[test]
    fn test_single_table_yields_nothing() {
        let mut catalog = Catalog::new();
        catalog.add_table(order_items_table());

        let analyzer = WeakAssociationAnalyzer::new(all_rules());
        assert!(analyzer.find_associations(&catalog).is_empty());
    }

    #[test]
    fn test_default_rule_set_accepts_nothing() {
        let mut catalog = Catalog::new();
        catalog.add_table(orders_table());
        catalog.add_table(order_items_table());

        let analyzer = WeakAssociationAnalyzer::new(RuleSet::default());
        assert!(analyzer.find_associations(&catalog).is_empty());
    }

    #[test]
    fn test_id_suffix_association_found() {
        let mut catalog = Catalog::new();
        catalog.add_table(orders_table());
        catalog.add_table(order_items_table());

        let analyzer = WeakAssociationAnalyzer::new(id_rules());
        let associations = analyzer.find_associations(&catalog);

        assert_eq!(associations.len(), 1);
        assert_eq!(associations[0].foreign, column("order_items", "order_id"));
        assert_eq!(associations[0].primary, column("orders", "id"));
    }

    #[test]
    fn test_declared_foreign_key_suppresses_discovery() {
        let mut catalog = Catalog::new();
        catalog.add_table(orders_table());
        catalog.add_table(order_items_table().with_foreign_key(
            TableReference::foreign_key(
                "fk_items_order",
                key("order_items"),
                key("orders"),
                &[("order_id", "id")],
            ),
        ));

        let analyzer = WeakAssociationAnalyzer::new(id_rules());
        assert!(analyzer.find_associations(&catalog).is_empty());
    }

    #[test]
    fn test_type_mismatch_is_filtered() {
        let mut catalog = Catalog::new();
        catalog.add_table(orders_table());
        catalog.add_table(
            Table::new("app", "order_items")
                .with_column(int_column("id"))
                .with_column(Column::new("order_id", DataType::varchar()))
                .with_primary_key(PrimaryKey::new("pk_order_items", &["id"])),
        );

        let analyzer = WeakAssociationAnalyzer::new(id_rules());
        assert!(analyzer.find_associations(&catalog).is_empty());
    }

    #[test]
    fn test_results_are_stable_and_ordered() {
        let mut catalog = Catalog::new();
        catalog.add_table(orders_table());
        catalog.add_table(order_items_table());
        catalog.add_table(
            Table::new("app", "invoices")
                .with_column(int_column("id"))
                .with_column(int_column("order_id"))
                .with_primary_key(PrimaryKey::new("pk_invoices", &["id"])),
        );

        let analyzer = WeakAssociationAnalyzer::new(id_rules());
        let first = analyzer.find_associations(&catalog);
        let second = analyzer.find_associations(&catalog);

        assert_eq!(first, second);
        let foreign_names: Vec<String> =
            first.iter().map(|a| a.foreign.full_name()).collect();
        let mut sorted = foreign_names.clone();
        sorted.sort();
        assert_eq!(foreign_names, sorted);
    }
}

mod extension_table_tests {
    use super::*;

    fn person_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.add_table(
            Table::new("app", "persons")
                .with_column(int_column("id"))
                .with_primary_key(PrimaryKey::new("pk_persons", &["id"])),
        );
        catalog.add_table(
            Table::new("app", "person_details")
                .with_column(int_column("id"))
                .with_column(Column::new("biography", DataType::varchar()))
                .with_primary_key(PrimaryKey::new("pk_person_details", &["id"])),
        );
        catalog
    }

    #[test]
    fn test_extension_table_association_found() {
        let analyzer = WeakAssociationAnalyzer::new(all_rules());
        let associations = analyzer.find_associations(&person_catalog());

        assert!(associations.iter().any(|a| {
            a.foreign == column("person_details", "id") && a.primary == column("persons", "id")
        }));
    }

    #[test]
    fn test_id_matcher_alone_ignores_extension_tables() {
        let analyzer = WeakAssociationAnalyzer::new(id_rules());
        assert!(analyzer.find_associations(&person_catalog()).is_empty());
    }

    #[test]
    fn test_non_unique_shared_column_is_rejected() {
        // the shared column is not unique on the extension side
        let mut catalog = Catalog::new();
        catalog.add_table(
            Table::new("app", "persons")
                .with_column(int_column("id"))
                .with_primary_key(PrimaryKey::new("pk_persons", &["id"])),
        );
        catalog.add_table(
            Table::new("app", "person_notes")
                .with_column(int_column("note_no"))
                .with_column(int_column("id"))
                .with_primary_key(PrimaryKey::new("pk_person_notes", &["note_no"])),
        );

        let analyzer = WeakAssociationAnalyzer::new(all_rules());
        let associations = analyzer.find_associations(&catalog);
        assert!(!associations.iter().any(|a| a.foreign == column("person_notes", "id")));
    }
}

mod materialization_tests {
    use super::*;

    #[test]
    fn test_references_are_constraint_shaped() {
        let mut catalog = Catalog::new();
        catalog.add_table(orders_table());
        catalog.add_table(order_items_table());

        let analyzer = WeakAssociationAnalyzer::new(id_rules());
        let references = analyzer.find_references(&catalog);

        assert_eq!(references.len(), 1);
        let reference = &references[0];
        assert_eq!(reference.kind, ReferenceKind::WeakAssociation);
        assert_eq!(reference.child_table, key("order_items"));
        assert_eq!(reference.parent_table, key("orders"));
        assert_eq!(reference.column_pairs.len(), 1);
        assert_eq!(reference.column_pairs[0].key_sequence, 1);
        // order_id is a plain nullable column, so the reference is optional
        assert!(reference.is_optional());
    }

    #[test]
    fn test_reference_names_are_deterministic() {
        let mut catalog = Catalog::new();
        catalog.add_table(orders_table());
        catalog.add_table(order_items_table());

        let analyzer = WeakAssociationAnalyzer::new(id_rules());
        let first = analyzer.find_references(&catalog);
        let second = analyzer.find_references(&catalog);
        assert_eq!(first[0].name, second[0].name);
    }
}
