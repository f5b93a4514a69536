//! Naming heuristics shared by the weak-association pipeline
//!
//! Three leaf concerns build on each other:
//!
//! - **Match keys** - normalized, prefix-stripped, singularized name
//!   variants grouping likely-related tables
//! - **Ranking** - resolves naming ambiguity by incoming-reference count
//! - **Candidate keys** - single-column primary/unique keys and id-suffix
//!   column match keys
//!
//! None of this is persisted on the schema graph; match keys exist only
//! while an analysis runs.

mod candidate_keys;
mod match_keys;
mod ranking;

pub use candidate_keys::{
    candidate_key_columns, column_grouping_key, column_match_key, is_generic_key_name,
    strip_key_suffix,
};
pub use match_keys::{derive_match_keys, singularize};
pub use ranking::TableRanking;
