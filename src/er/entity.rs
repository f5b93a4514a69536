//! Entities of the conceptual model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::classify::EntityType;
use crate::schema::{NamedObjectKey, Table};

/// A table lifted into the conceptual model with its classified type
///
/// A subtype entity always carries its supertype; the constructors keep the
/// two in lockstep so a `Subtype`-typed entity without a supertype cannot
/// be built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    /// Deterministic identity derived from the table key
    pub id: Uuid,
    /// Key of the underlying table
    pub table_key: NamedObjectKey,
    /// Table name
    pub name: String,
    /// Classified entity type
    pub entity_type: EntityType,
    /// Supertype entity, present exactly for subtypes
    #[serde(skip_serializing_if = "Option::is_none")]
    supertype: Option<Box<Entity>>,
}

impl Entity {
    /// Create a non-subtype entity
    pub fn new(table: &Table, entity_type: EntityType) -> Self {
        debug_assert_ne!(entity_type, EntityType::Subtype);
        Self {
            id: Self::generate_id(&table.key),
            table_key: table.key.clone(),
            name: table.name.clone(),
            entity_type,
            supertype: None,
        }
    }

    /// Create a subtype entity carrying its supertype
    pub fn subtype(table: &Table, supertype: Entity) -> Self {
        Self {
            id: Self::generate_id(&table.key),
            table_key: table.key.clone(),
            name: table.name.clone(),
            entity_type: EntityType::Subtype,
            supertype: Some(Box::new(supertype)),
        }
    }

    /// Generate a deterministic UUID v5 for an entity from its table key
    /// so repeated runs over the same catalog agree on identities
    pub fn generate_id(table_key: &NamedObjectKey) -> Uuid {
        Uuid::new_v5(&Uuid::NAMESPACE_DNS, table_key.full_name().as_bytes())
    }

    /// Supertype entity, present exactly when this entity is a subtype
    pub fn supertype(&self) -> Option<&Entity> {
        self.supertype.as_deref()
    }
}
