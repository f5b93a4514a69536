//! The assembled, queryable conceptual model

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classify::EntityType;
use crate::schema::{Cardinality, NamedObjectKey, ReferenceId};

use super::entity::Entity;
use super::relationship::Relationship;

/// Immutable aggregate of entities, relationships and weak relationships
///
/// Built once per catalog and queried read-only afterwards. Every
/// collection handed out is deduplicated and stably ordered, so repeated
/// queries agree with each other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErModel {
    entities: BTreeMap<NamedObjectKey, Entity>,
    relationships: Vec<Relationship>,
    weak_relationships: Vec<Relationship>,
    tables: BTreeSet<NamedObjectKey>,
    built_at: DateTime<Utc>,
}

impl ErModel {
    pub(crate) fn from_parts(
        entities: BTreeMap<NamedObjectKey, Entity>,
        mut relationships: Vec<Relationship>,
        mut weak_relationships: Vec<Relationship>,
        tables: BTreeSet<NamedObjectKey>,
    ) -> Self {
        order_relationships(&mut relationships);
        order_relationships(&mut weak_relationships);
        Self {
            entities,
            relationships,
            weak_relationships,
            tables,
            built_at: Utc::now(),
        }
    }

    /// Model with all tables registered but nothing classified
    pub(crate) fn registry_only(tables: BTreeSet<NamedObjectKey>) -> Self {
        Self::from_parts(BTreeMap::new(), Vec::new(), Vec::new(), tables)
    }

    /// When the model was assembled
    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }

    /// All entities in stable table-key order
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Entities of one classified type
    pub fn entities_of_type(&self, entity_type: EntityType) -> Vec<&Entity> {
        self.entities
            .values()
            .filter(|e| e.entity_type == entity_type)
            .collect()
    }

    /// Entity wrapping the given table
    pub fn entity_for_table(&self, table: &NamedObjectKey) -> Option<&Entity> {
        self.entities.get(table)
    }

    /// All relationships derived from declared foreign keys and bridges
    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    /// Relationships carrying the given cardinality
    pub fn relationships_with_cardinality(&self, cardinality: Cardinality) -> Vec<&Relationship> {
        self.relationships
            .iter()
            .filter(|r| r.cardinality == cardinality)
            .collect()
    }

    /// Relationships derived from weak associations
    pub fn weak_relationships(&self) -> &[Relationship] {
        &self.weak_relationships
    }

    /// Subtype entities of the given supertype
    pub fn subtypes_of(&self, supertype: &Entity) -> Vec<&Entity> {
        self.entities
            .values()
            .filter(|e| {
                e.supertype()
                    .is_some_and(|s| s.table_key == supertype.table_key)
            })
            .collect()
    }

    /// The many-to-many relationship realized by the given bridge table
    pub fn relationship_for_bridge_table(
        &self,
        bridge_table: &NamedObjectKey,
    ) -> Option<&Relationship> {
        self.relationships
            .iter()
            .find(|r| r.bridge_table.as_ref() == Some(bridge_table))
    }

    /// The relationship derived from the given table reference
    pub fn relationship_for_reference(&self, reference: &ReferenceId) -> Option<&Relationship> {
        self.relationships
            .iter()
            .chain(self.weak_relationships.iter())
            .find(|r| r.reference.as_ref() == Some(reference))
    }

    /// All registered table keys in stable order
    pub fn tables(&self) -> impl Iterator<Item = &NamedObjectKey> {
        self.tables.iter()
    }

    /// Tables covered by neither an entity nor a relationship
    pub fn unmodeled_tables(&self) -> Vec<&NamedObjectKey> {
        let bridges: BTreeSet<&NamedObjectKey> = self
            .relationships
            .iter()
            .filter_map(|r| r.bridge_table.as_ref())
            .collect();
        self.tables
            .iter()
            .filter(|key| !self.entities.contains_key(*key) && !bridges.contains(*key))
            .collect()
    }
}

/// Stable order by endpoints and source, duplicates (same identity) removed
fn order_relationships(relationships: &mut Vec<Relationship>) {
    relationships.sort_by(|a, b| {
        a.left
            .table_key
            .cmp(&b.left.table_key)
            .then_with(|| a.right.table_key.cmp(&b.right.table_key))
            .then_with(|| a.reference.cmp(&b.reference))
            .then_with(|| a.bridge_table.cmp(&b.bridge_table))
    });
    relationships.dedup_by(|a, b| a.id == b.id);
}

