//! Conceptual entity-relationship model
//!
//! The assembler consumes a catalog's declared foreign keys and the
//! per-table classifiers, and produces one immutable [`ErModel`]: entities
//! (with subtype links to their supertypes), relationships with inferred
//! cardinalities, many-to-many relationships realized by bridge tables,
//! and weak relationships from materialized weak associations.
//!
//! ## Example
//!
//! ```rust,ignore
//! use er_modelling_core::er::ErModelBuilder;
//!
//! let model = ErModelBuilder::new(&catalog).build()?;
//! for entity in model.entities() {
//!     println!("{} is a {}", entity.name, entity.entity_type);
//! }
//! ```

mod assembler;
mod entity;
mod error;
mod model;
mod relationship;

pub use assembler::ErModelBuilder;
pub use entity::Entity;
pub use error::AssemblerError;
pub use model::ErModel;
pub use relationship::Relationship;
