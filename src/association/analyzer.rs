//! Weak-association discovery pipeline

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info};

use crate::naming::{candidate_key_columns, column_grouping_key, TableRanking};
use crate::schema::{Catalog, ColumnRef, TableReference};

use super::proposal::ProposedAssociation;
use super::rules::{RuleContext, RuleSet};
use super::synthetic;

/// Discovers implicit associations between tables from naming patterns
///
/// The pipeline pairs candidate parent key columns with same-keyed columns
/// elsewhere, filters structurally invalid pairs, and lets the configured
/// rule set decide the rest. With fewer than two tables there is nothing to
/// pair and the result is always empty.
pub struct WeakAssociationAnalyzer {
    rules: RuleSet,
    separator: char,
}

impl WeakAssociationAnalyzer {
    /// Create an analyzer with the given rule set and the `_` separator
    pub fn new(rules: RuleSet) -> Self {
        Self::with_separator(rules, '_')
    }

    /// Create an analyzer with a custom table-name token separator
    pub fn with_separator(rules: RuleSet, separator: char) -> Self {
        Self { rules, separator }
    }

    /// Accepted associations, deduplicated and in stable order
    pub fn find_associations(&self, catalog: &Catalog) -> Vec<ProposedAssociation> {
        if catalog.len() < 2 {
            debug!(tables = catalog.len(), "too few tables for association discovery");
            return Vec::new();
        }
        if self.rules.is_empty() {
            return Vec::new();
        }

        let ranking = TableRanking::new(catalog, self.separator);
        let context = RuleContext {
            catalog,
            ranking: &ranking,
        };
        let columns_by_key = index_candidate_columns(catalog);

        let mut accepted: BTreeSet<ProposedAssociation> = BTreeSet::new();
        let mut proposed = 0usize;
        for table in catalog.tables() {
            let keys: BTreeSet<String> = ranking
                .match_keys(&table.key)
                .cloned()
                .unwrap_or_default();

            for primary_column in candidate_key_columns(table) {
                let mut column_keys = keys.clone();
                column_keys.insert(column_grouping_key(&primary_column.name));

                for key in &column_keys {
                    let Some(foreign_columns) = columns_by_key.get(key) else {
                        continue;
                    };
                    for foreign in foreign_columns {
                        if foreign.table_key == table.key {
                            continue;
                        }
                        let proposal = ProposedAssociation::new(
                            foreign.clone(),
                            ColumnRef::new(table.key.clone(), &primary_column.name),
                        );
                        proposed += 1;
                        if !proposal.is_valid(catalog) {
                            continue;
                        }
                        if self.rules.accepts(&proposal, &context) {
                            debug!(
                                foreign = %proposal.foreign,
                                primary = %proposal.primary,
                                "accepted weak association"
                            );
                            accepted.insert(proposal);
                        }
                    }
                }
            }
        }

        info!(
            proposed,
            accepted = accepted.len(),
            "weak-association discovery finished"
        );
        accepted.into_iter().collect()
    }

    /// Accepted associations materialized as weak table references
    pub fn find_references(&self, catalog: &Catalog) -> Vec<TableReference> {
        self.find_associations(catalog)
            .iter()
            .map(|proposal| synthetic::materialize(catalog, proposal))
            .collect()
    }
}

/// Group potential referencing columns by their match keys
///
/// Columns already bound by a declared foreign key never become the foreign
/// side of a weak association and are left out here.
fn index_candidate_columns(catalog: &Catalog) -> BTreeMap<String, Vec<ColumnRef>> {
    let mut columns_by_key: BTreeMap<String, Vec<ColumnRef>> = BTreeMap::new();
    for table in catalog.tables() {
        for column in &table.columns {
            if column.part_of_foreign_key {
                continue;
            }
            columns_by_key
                .entry(column_grouping_key(&column.name))
                .or_default()
                .push(ColumnRef::new(table.key.clone(), &column.name));
        }
    }
    columns_by_key
}
