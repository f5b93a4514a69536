//! ER Modelling Core - Entity-relationship inference over crawled schemas
//!
//! Provides the inference engine behind the schema modelling tools:
//! - Weak-association discovery from naming patterns (match keys, ranking,
//!   candidate keys, rule engine)
//! - Per-table classification (entity type, bridge tables, foreign-key
//!   cardinality, index coverage)
//! - Assembly of a queryable entity-relationship model with subtype
//!   hierarchies and bridge relationships
//!
//! The crate consumes a frozen [`schema::Catalog`] snapshot materialized by
//! an external crawler; it performs no I/O and never mutates the snapshot
//! beyond recording its own inferences.

pub mod analyzer;
pub mod association;
pub mod classify;
pub mod config;
pub mod er;
pub mod error;
pub mod naming;
pub mod schema;

// Re-export commonly used types
pub use analyzer::{AnalysisReport, SchemaAnalyzer};
pub use association::{ProposedAssociation, RuleSet, WeakAssociationAnalyzer};
pub use classify::{ClassifierError, EntityType, TableClassifier};
pub use config::{AnalysisConfig, AnalysisConfigBuilder};
pub use er::{AssemblerError, Entity, ErModel, ErModelBuilder, Relationship};
pub use error::AnalysisError;
pub use schema::{
    Cardinality, Catalog, Column, ColumnRef, DataType, Index, NamedObjectKey, PrimaryKey,
    ReferenceId, ReferenceKind, Table, TableReference,
};
