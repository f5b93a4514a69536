//! Naming-heuristic rules deciding which proposals become associations

use tracing::trace;

use crate::naming::{is_generic_key_name, strip_key_suffix, TableRanking};
use crate::schema::Catalog;

use super::proposal::ProposedAssociation;

/// Shared lookups the rules evaluate proposals against
pub struct RuleContext<'a> {
    pub catalog: &'a Catalog,
    pub ranking: &'a TableRanking,
}

/// One naming-heuristic rule
///
/// Rules are plain variants dispatched in [`MatchRule::accepts`]; a rule set
/// combines them with logical OR.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    /// Foreign column named `<base>_id` pointing at the parent's `id` or
    /// `<base>_id` column
    IdSuffix,
    /// Identically-named unique columns joining a table to its extension
    /// table in a 1-to-1 or 1-to-(0..1) pattern
    ExtensionTable,
}

impl MatchRule {
    /// Whether this rule accepts the proposal
    pub fn accepts(&self, proposal: &ProposedAssociation, context: &RuleContext<'_>) -> bool {
        match self {
            MatchRule::IdSuffix => id_suffix_matches(proposal, context),
            MatchRule::ExtensionTable => extension_table_matches(proposal, context),
        }
    }
}

fn id_suffix_matches(proposal: &ProposedAssociation, context: &RuleContext<'_>) -> bool {
    let Some(foreign) = context.catalog.column(&proposal.foreign) else {
        return false;
    };
    let Some(primary) = context.catalog.column(&proposal.primary) else {
        return false;
    };

    let Some((foreign_base, _)) = strip_key_suffix(&foreign.name) else {
        return false;
    };
    if foreign_base.is_empty() {
        // a bare "id" column names nothing it could reference
        return false;
    }

    let primary_matches = match strip_key_suffix(&primary.name) {
        Some((primary_base, _)) if !primary_base.is_empty() => primary_base == foreign_base,
        _ => is_generic_key_name(&primary.name),
    };
    if !primary_matches {
        return false;
    }

    // a same-named key column that is part of its own table's primary key
    // is likely the sub-entity's own key, not a reference to the parent
    if foreign.name.eq_ignore_ascii_case(&primary.name) && foreign.part_of_primary_key {
        trace!(proposal = %proposal.foreign, "rejecting possible sub-entity key");
        return false;
    }
    true
}

fn extension_table_matches(proposal: &ProposedAssociation, context: &RuleContext<'_>) -> bool {
    let Some(foreign) = context.catalog.column(&proposal.foreign) else {
        return false;
    };
    let Some(primary) = context.catalog.column(&proposal.primary) else {
        return false;
    };

    if normalize(&foreign.name) != normalize(&primary.name) {
        return false;
    }
    if !foreign.part_of_primary_key && !foreign.part_of_unique_index {
        return false;
    }
    let Some(parent) = context.catalog.table(&proposal.primary.table_key) else {
        return false;
    };
    context.ranking.is_top_ranked_candidate(parent)
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase()
}

/// OR-combination of opted-in rules
///
/// The default set holds no rules and accepts nothing; callers opt in to
/// each heuristic through the builder.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<MatchRule>,
}

impl RuleSet {
    /// Create a builder for a custom rule set
    pub fn builder() -> RuleSetBuilder {
        RuleSetBuilder::default()
    }

    /// Whether any rule accepts the proposal
    pub fn accepts(&self, proposal: &ProposedAssociation, context: &RuleContext<'_>) -> bool {
        self.rules
            .iter()
            .any(|rule| rule.accepts(proposal, context))
    }

    /// Whether the set holds no rules at all
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Builder for [`RuleSet`]
#[derive(Debug, Default)]
pub struct RuleSetBuilder {
    rules: Vec<MatchRule>,
}

impl RuleSetBuilder {
    /// Enable the id-suffix rule
    pub fn with_id_matcher(mut self) -> Self {
        if !self.rules.contains(&MatchRule::IdSuffix) {
            self.rules.push(MatchRule::IdSuffix);
        }
        self
    }

    /// Enable the extension-table rule
    pub fn with_extension_tables(mut self) -> Self {
        if !self.rules.contains(&MatchRule::ExtensionTable) {
            self.rules.push(MatchRule::ExtensionTable);
        }
        self
    }

    /// Build the rule set
    pub fn build(self) -> RuleSet {
        RuleSet { rules: self.rules }
    }
}
