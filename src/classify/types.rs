//! Entity-type vocabulary

use std::fmt;

use serde::{Deserialize, Serialize};

/// Conceptual entity type of a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    /// No rule matched
    Unknown,
    /// Not an entity at all, e.g. a table without a primary key
    NonEntity,
    /// Entire primary key inherited from a single supertype table
    Subtype,
    /// Primary key combines a parent's key with its own discriminator
    WeakEntity,
    /// Independently keyed entity
    StrongEntity,
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            EntityType::Unknown => "unknown",
            EntityType::NonEntity => "non_entity",
            EntityType::Subtype => "subtype",
            EntityType::WeakEntity => "weak_entity",
            EntityType::StrongEntity => "strong_entity",
        };
        write!(f, "{}", repr)
    }
}
