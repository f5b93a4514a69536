//! Relationships of the conceptual model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::{Cardinality, NamedObjectKey, ReferenceId};

use super::entity::Entity;

/// A connection between two entities
///
/// Either derived from one table reference (carrying that reference's
/// identity) or realized through a bridge table (carrying the bridge
/// table's key and a `ManyMany` cardinality).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    /// Deterministic identity derived from the endpoints and source
    pub id: Uuid,
    /// Dependent-side entity for reference relationships; first referenced
    /// entity for bridge relationships
    pub left: Entity,
    /// Parent-side entity for reference relationships; second referenced
    /// entity for bridge relationships
    pub right: Entity,
    /// Cardinality of the relationship
    pub cardinality: Cardinality,
    /// Bridge table realizing a many-to-many relationship
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bridge_table: Option<NamedObjectKey>,
    /// Underlying table reference, absent for bridge relationships
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<ReferenceId>,
}

impl Relationship {
    /// Create a relationship backed by one table reference
    pub fn table_reference(
        left: Entity,
        right: Entity,
        cardinality: Cardinality,
        reference: ReferenceId,
    ) -> Self {
        Self {
            id: Self::generate_id(&left, &right, &reference.to_string()),
            left,
            right,
            cardinality,
            bridge_table: None,
            reference: Some(reference),
        }
    }

    /// Create a many-to-many relationship realized by a bridge table
    pub fn many_to_many(left: Entity, right: Entity, bridge_table: NamedObjectKey) -> Self {
        Self {
            id: Self::generate_id(&left, &right, &bridge_table.full_name()),
            left,
            right,
            cardinality: Cardinality::ManyMany,
            bridge_table: Some(bridge_table),
            reference: None,
        }
    }

    /// Generate a deterministic UUID v5 from the endpoints and the
    /// relationship's source (reference id or bridge table)
    pub fn generate_id(left: &Entity, right: &Entity, source: &str) -> Uuid {
        let key = format!("{}:{}:{}", left.table_key, right.table_key, source);
        Uuid::new_v5(&Uuid::NAMESPACE_URL, key.as_bytes())
    }

    /// Whether this relationship is realized through a bridge table
    pub fn is_many_to_many(&self) -> bool {
        self.bridge_table.is_some()
    }
}

