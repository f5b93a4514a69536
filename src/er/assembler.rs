//! Two-pass assembly of the conceptual model

use std::collections::{BTreeMap, BTreeSet};

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::{debug, info, warn};

use crate::classify::{EntityType, TableClassifier};
use crate::schema::{Catalog, NamedObjectKey, Table, TableReference};

use super::entity::Entity;
use super::error::AssemblerError;
use super::model::ErModel;
use super::relationship::Relationship;

/// Assembles an [`ErModel`] from a catalog's declared foreign keys
///
/// Weak associations previously materialized on the catalog feed the
/// model's separate weak-relationship collection; everything else uses
/// declared constraints only.
///
/// Assembly runs in two passes. Every classifiable table is classified
/// first and non-subtype entities are built; subtype entities are then
/// linked to their already-built supertypes in dependency order, so the
/// iteration order of the input can never send resolution through a
/// half-built entity.
pub struct ErModelBuilder<'a> {
    catalog: &'a Catalog,
}

impl<'a> ErModelBuilder<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Build the model
    pub fn build(self) -> Result<ErModel, AssemblerError> {
        let tables: BTreeSet<NamedObjectKey> = self.catalog.table_keys().cloned().collect();

        // pass one: classify everything classifiable
        let mut classifiers: BTreeMap<&NamedObjectKey, TableClassifier<'a>> = BTreeMap::new();
        for table in self.catalog.tables() {
            if table.partial {
                debug!(table = %table.key, "registering partial table without classification");
                continue;
            }
            classifiers.insert(&table.key, TableClassifier::new(self.catalog, table)?);
        }

        let mut subtype_links: BTreeMap<&NamedObjectKey, &TableReference> = BTreeMap::new();
        let mut bridges: BTreeSet<&NamedObjectKey> = BTreeSet::new();
        let mut entities: BTreeMap<NamedObjectKey, Entity> = BTreeMap::new();

        for (&key, classifier) in &classifiers {
            let table = classifier.table();
            if let Some(identifying) = classifier.subtype_parent() {
                subtype_links.insert(key, identifying);
            } else if classifier.infer_bridge_table() {
                // bridge tables become relationships, not entities
                bridges.insert(key);
            } else {
                entities.insert(key.clone(), Entity::new(table, classifier.infer_entity_type()));
            }
        }

        // pass two: link subtypes to supertypes in dependency order
        self.link_subtypes(&subtype_links, &mut entities);

        let mut relationships = Vec::new();
        let mut weak_relationships = Vec::new();
        for (&key, classifier) in &classifiers {
            let table = classifier.table();
            if bridges.contains(key) {
                if let Some(relationship) = self.bridge_relationship(table, &entities)? {
                    relationships.push(relationship);
                }
                continue;
            }
            // a subtype table is modeled by its supertype link alone
            if !subtype_links.contains_key(key) {
                for reference in table.imported_foreign_keys() {
                    if let Some(relationship) =
                        self.reference_relationship(classifier, reference, &entities)?
                    {
                        relationships.push(relationship);
                    }
                }
            }
            for reference in &table.weak_associations {
                if let Some(relationship) =
                    self.reference_relationship(classifier, reference, &entities)?
                {
                    weak_relationships.push(relationship);
                }
            }
        }

        info!(
            tables = tables.len(),
            entities = entities.len(),
            relationships = relationships.len(),
            weak_relationships = weak_relationships.len(),
            "model assembly finished"
        );
        Ok(ErModel::from_parts(
            entities,
            relationships,
            weak_relationships,
            tables,
        ))
    }

    /// Link every subtype table to its supertype entity
    ///
    /// Supertypes are resolved before their subtypes by walking the
    /// strongly-connected components of the subtype dependency graph in
    /// topological order. Tables on a dependency cycle cannot have a
    /// well-defined supertype and are demoted to unknown entities.
    fn link_subtypes(
        &self,
        subtype_links: &BTreeMap<&NamedObjectKey, &TableReference>,
        entities: &mut BTreeMap<NamedObjectKey, Entity>,
    ) {
        let mut graph: DiGraph<&NamedObjectKey, ()> = DiGraph::new();
        let mut nodes: BTreeMap<&NamedObjectKey, NodeIndex> = BTreeMap::new();
        for (&child, identifying) in subtype_links {
            let parent = &identifying.parent_table;
            let child_node = *nodes
                .entry(child)
                .or_insert_with(|| graph.add_node(child));
            let parent_node = *nodes
                .entry(parent)
                .or_insert_with(|| graph.add_node(parent));
            graph.add_edge(parent_node, child_node, ());
        }

        // tarjan_scc reports components in reverse topological order
        let components = tarjan_scc(&graph);
        for component in components.into_iter().rev() {
            let cyclic = component.len() > 1;
            for node in component {
                let key = graph[node];
                let Some(identifying) = subtype_links.get(key) else {
                    continue;
                };
                let table = match self.catalog.table(key) {
                    Some(table) => table,
                    None => continue,
                };
                if cyclic {
                    warn!(table = %key, "subtype dependency cycle, demoting to unknown");
                    entities.insert(key.clone(), Entity::new(table, EntityType::Unknown));
                    continue;
                }
                match entities.get(&identifying.parent_table) {
                    Some(supertype) => {
                        let supertype = supertype.clone();
                        entities.insert(key.clone(), Entity::subtype(table, supertype));
                    }
                    None => {
                        warn!(
                            table = %key,
                            supertype = %identifying.parent_table,
                            "supertype has no entity, demoting subtype to unknown"
                        );
                        entities.insert(key.clone(), Entity::new(table, EntityType::Unknown));
                    }
                }
            }
        }
    }

    /// Relationship for one table reference, or `None` when an endpoint
    /// table has no entity
    fn reference_relationship(
        &self,
        classifier: &TableClassifier<'_>,
        reference: &TableReference,
        entities: &BTreeMap<NamedObjectKey, Entity>,
    ) -> Result<Option<Relationship>, AssemblerError> {
        if self.catalog.table(&reference.parent_table).is_none() {
            return Err(AssemblerError::UnknownTable {
                table: reference.parent_table.full_name(),
            });
        }
        let (Some(left), Some(right)) = (
            entities.get(&reference.child_table),
            entities.get(&reference.parent_table),
        ) else {
            debug!(reference = %reference.id(), "skipping reference without entity endpoints");
            return Ok(None);
        };
        if left.table_key != reference.child_table {
            return Err(AssemblerError::EndpointMismatch {
                expected: reference.child_table.full_name(),
                found: left.table_key.full_name(),
            });
        }
        if right.table_key != reference.parent_table {
            return Err(AssemblerError::EndpointMismatch {
                expected: reference.parent_table.full_name(),
                found: right.table_key.full_name(),
            });
        }

        let cardinality = classifier.infer_foreign_key_cardinality(Some(reference));
        Ok(Some(Relationship::table_reference(
            left.clone(),
            right.clone(),
            cardinality,
            reference.id(),
        )))
    }

    /// Many-to-many relationship for a bridge table with exactly two
    /// declared foreign keys; other bridge tables stay registered only
    fn bridge_relationship(
        &self,
        table: &Table,
        entities: &BTreeMap<NamedObjectKey, Entity>,
    ) -> Result<Option<Relationship>, AssemblerError> {
        if table.foreign_keys.len() != 2 {
            debug!(
                table = %table.key,
                foreign_keys = table.foreign_keys.len(),
                "bridge table without exactly two foreign keys"
            );
            return Ok(None);
        }

        let mut references: Vec<&TableReference> = table.foreign_keys.iter().collect();
        references.sort_by(|a, b| a.name.cmp(&b.name));
        for reference in &references {
            if self.catalog.table(&reference.parent_table).is_none() {
                return Err(AssemblerError::UnknownTable {
                    table: reference.parent_table.full_name(),
                });
            }
        }
        let (Some(left), Some(right)) = (
            entities.get(&references[0].parent_table),
            entities.get(&references[1].parent_table),
        ) else {
            debug!(table = %table.key, "skipping bridge without entity endpoints");
            return Ok(None);
        };

        Ok(Some(Relationship::many_to_many(
            left.clone(),
            right.clone(),
            table.key.clone(),
        )))
    }
}
