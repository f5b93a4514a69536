//! Weak-association discovery
//!
//! Proposes implicit foreign-key-like associations from naming patterns
//! when no declared constraint exists, independent of the real foreign
//! keys. The flow is: candidate key columns paired by match key →
//! structural validation → opt-in naming rules → deduplicated, stably
//! ordered results, materialized as constraint-shaped weak references.
//!
//! ## Example
//!
//! ```rust,ignore
//! use er_modelling_core::association::{RuleSet, WeakAssociationAnalyzer};
//!
//! let rules = RuleSet::builder().with_id_matcher().build();
//! let analyzer = WeakAssociationAnalyzer::new(rules);
//! for reference in analyzer.find_references(&catalog) {
//!     println!("{} -> {}", reference.child_table, reference.parent_table);
//! }
//! ```

mod analyzer;
mod proposal;
mod rules;
mod synthetic;

pub use analyzer::WeakAssociationAnalyzer;
pub use proposal::ProposedAssociation;
pub use rules::{MatchRule, RuleContext, RuleSet, RuleSetBuilder};
pub use synthetic::{generate_name, materialize};
