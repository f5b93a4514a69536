//! Proposed weak associations and their validity predicate

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::schema::{Catalog, ColumnRef};

/// A proposed (foreign column, primary column) pair
///
/// Proposals are cheap to create and mostly wrong; [`is_valid`] filters the
/// structurally impossible ones before the rule engine sees them. Ordering
/// follows the full column names so accepted proposals come out in a stable
/// report order.
///
/// [`is_valid`]: ProposedAssociation::is_valid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposedAssociation {
    /// Referencing column on the dependent side
    pub foreign: ColumnRef,
    /// Referenced column on the parent side
    pub primary: ColumnRef,
}

impl ProposedAssociation {
    pub fn new(foreign: ColumnRef, primary: ColumnRef) -> Self {
        Self { foreign, primary }
    }

    /// Whether the pair could be an association at all
    ///
    /// Rejects self-pairs, columns already bound by a declared foreign key,
    /// pairs where both sides have incomplete metadata, and pairs whose
    /// data types are unknown or differ. Columns missing from the catalog
    /// are invalid as well.
    pub fn is_valid(&self, catalog: &Catalog) -> bool {
        if self.foreign == self.primary {
            return false;
        }
        let (Some(foreign), Some(primary)) =
            (catalog.column(&self.foreign), catalog.column(&self.primary))
        else {
            trace!(proposal = %self.foreign, "proposal references missing column");
            return false;
        };
        if foreign.part_of_foreign_key {
            return false;
        }
        if foreign.partial && primary.partial {
            return false;
        }
        foreign.data_type.is_comparable_to(&primary.data_type)
    }
}

impl Ord for ProposedAssociation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.foreign
            .full_name()
            .cmp(&other.foreign.full_name())
            .then_with(|| self.primary.full_name().cmp(&other.primary.full_name()))
    }
}

impl PartialOrd for ProposedAssociation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
