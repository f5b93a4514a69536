//! Top-level analysis facade

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::association::{RuleSet, WeakAssociationAnalyzer};
use crate::classify::{ClassifierError, EntityType, TableClassifier};
use crate::config::AnalysisConfig;
use crate::er::{ErModel, ErModelBuilder};
use crate::error::AnalysisError;
use crate::schema::{Cardinality, Catalog, ReferenceId, TableReference};

/// Summary of one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Weak associations materialized onto the catalog
    pub weak_associations_found: usize,
    /// Foreign keys whose cardinality slot was written
    pub cardinalities_set: usize,
    /// Entities in the model, by classified type
    pub entity_counts: BTreeMap<EntityType, usize>,
    /// Relationships derived from declared foreign keys and bridges
    pub relationship_count: usize,
    /// Relationships derived from weak associations
    pub weak_relationship_count: usize,
    /// Tables covered by neither an entity nor a relationship
    pub unmodeled_count: usize,
    /// The assembled model
    pub model: ErModel,
}

/// Runs the analysis pipelines over one catalog snapshot
///
/// Each step is also exposed on its own for callers that want only the
/// weak associations, only the cardinality map, or only the model.
#[derive(Debug, Clone, Default)]
pub struct SchemaAnalyzer {
    config: AnalysisConfig,
}

impl SchemaAnalyzer {
    /// Create an analyzer with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an analyzer with a custom configuration
    pub fn with_config(config: AnalysisConfig) -> Self {
        Self { config }
    }

    fn rule_set(&self) -> RuleSet {
        let mut builder = RuleSet::builder();
        if self.config.infer_weak_associations {
            builder = builder.with_id_matcher();
            if self.config.infer_extension_tables {
                builder = builder.with_extension_tables();
            }
        }
        builder.build()
    }

    /// Discover weak associations, materialized as table references
    ///
    /// Empty when discovery is disabled in the configuration.
    pub fn find_weak_associations(&self, catalog: &Catalog) -> Vec<TableReference> {
        if !self.config.infer_weak_associations {
            debug!("weak-association discovery disabled");
            return Vec::new();
        }
        let analyzer =
            WeakAssociationAnalyzer::with_separator(self.rule_set(), self.config.table_name_separator);
        analyzer.find_references(catalog)
    }

    /// Infer the cardinality of every reference of every classifiable table
    ///
    /// The result maps reference identities to cardinalities, ready for
    /// [`Catalog::apply_cardinalities`]. Metadata-partial tables are
    /// skipped; their references stay unclassified.
    pub fn infer_cardinalities(
        &self,
        catalog: &Catalog,
    ) -> Result<BTreeMap<ReferenceId, Cardinality>, ClassifierError> {
        let mut cardinalities = BTreeMap::new();
        for table in catalog.tables() {
            if table.partial {
                debug!(table = %table.key, "skipping partial table for cardinality inference");
                continue;
            }
            let classifier = TableClassifier::new(catalog, table)?;
            for reference in table.foreign_keys.iter().chain(&table.weak_associations) {
                cardinalities.insert(
                    reference.id(),
                    classifier.infer_foreign_key_cardinality(Some(reference)),
                );
            }
        }
        Ok(cardinalities)
    }

    /// Assemble the entity-relationship model
    ///
    /// With classification disabled, the model only registers the tables.
    pub fn build_er_model(&self, catalog: &Catalog) -> Result<ErModel, AnalysisError> {
        if !self.config.classify_entities {
            debug!("entity classification disabled, registering tables only");
            return Ok(ErModel::registry_only(
                catalog.table_keys().cloned().collect(),
            ));
        }
        Ok(ErModelBuilder::new(catalog).build()?)
    }

    /// Run the full pipeline: discover weak associations and write them to
    /// the catalog, infer and write back cardinalities, assemble the model
    pub fn analyze(&self, catalog: &mut Catalog) -> Result<AnalysisReport, AnalysisError> {
        let mut weak_associations_found = 0;
        for reference in self.find_weak_associations(catalog) {
            if catalog.add_weak_association(reference) {
                weak_associations_found += 1;
            }
        }

        let cardinalities = self.infer_cardinalities(catalog)?;
        let cardinalities_set = catalog.apply_cardinalities(&cardinalities);

        let model = self.build_er_model(catalog)?;
        let mut entity_counts: BTreeMap<EntityType, usize> = BTreeMap::new();
        for entity in model.entities() {
            *entity_counts.entry(entity.entity_type).or_insert(0) += 1;
        }

        let report = AnalysisReport {
            weak_associations_found,
            cardinalities_set,
            entity_counts,
            relationship_count: model.relationships().len(),
            weak_relationship_count: model.weak_relationships().len(),
            unmodeled_count: model.unmodeled_tables().len(),
            model,
        };
        info!(
            weak_associations = report.weak_associations_found,
            cardinalities = report.cardinalities_set,
            relationships = report.relationship_count,
            "schema analysis finished"
        );
        Ok(report)
    }
}
