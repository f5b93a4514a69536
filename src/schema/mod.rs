//! Crawled schema graph consumed by the analysis pipelines
//!
//! The crawler materializes one [`Catalog`] per database and hands it to the
//! analysis as a frozen snapshot. Tables carry their declared foreign keys on
//! the dependent side; analysis results are written back through the two
//! catalog mutation points ([`Catalog::add_weak_association`] and
//! [`Catalog::apply_cardinalities`]) and nowhere else.

mod catalog;
mod column;
mod index;
mod key;
mod reference;
mod table;

pub use catalog::Catalog;
pub use column::{Column, ColumnRef, DataType};
pub use index::{Index, PrimaryKey};
pub use key::NamedObjectKey;
pub use reference::{
    Cardinality, ColumnReferencePair, ReferenceId, ReferenceKind, TableReference,
};
pub use table::Table;
