//! Candidate key columns and id-suffix column match keys

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::schema::{Column, Table};

static KEY_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(.*?)_?(keyid|key|id)$").expect("valid key-suffix pattern"));

/// Split a column name into its base and key suffix, lowercased
///
/// Returns `None` when the name carries no `id`/`key`/`keyid` suffix. The
/// base may be empty for bare generic names like `id`.
pub fn strip_key_suffix(name: &str) -> Option<(String, String)> {
    let captures = KEY_SUFFIX.captures(name)?;
    Some((
        captures[1].to_lowercase(),
        captures[2].to_lowercase(),
    ))
}

/// Whether the name is nothing but a generic key suffix
pub fn is_generic_key_name(name: &str) -> bool {
    matches!(
        strip_key_suffix(name),
        Some((base, _)) if base.is_empty()
    )
}

/// Match key of a column: the trailing key suffix stripped, lowercased
///
/// `None` when the name has no suffix or stripping leaves nothing.
pub fn column_match_key(name: &str) -> Option<String> {
    match strip_key_suffix(name) {
        Some((base, _)) if !base.is_empty() => Some(base),
        _ => None,
    }
}

/// Key used to group a column with same-named candidates elsewhere
///
/// Falls back to the whole lowercased name when there is no suffix to
/// strip, so bare `id` columns still group with each other.
pub fn column_grouping_key(name: &str) -> String {
    column_match_key(name).unwrap_or_else(|| name.to_lowercase())
}

/// Candidate primary-key columns of a table
///
/// The sole column of a single-column primary key plus the sole column of
/// every single-column unique index, deduplicated in that order.
pub fn candidate_key_columns(table: &Table) -> Vec<&Column> {
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let mut candidates = Vec::new();

    if let Some(primary_key) = &table.primary_key {
        if let [sole] = primary_key.columns.as_slice() {
            if let Some(column) = table.column(sole) {
                if seen.insert(&column.name) {
                    candidates.push(column);
                }
            }
        }
    }
    for index in &table.indexes {
        if !index.unique {
            continue;
        }
        if let [sole] = index.columns.as_slice() {
            if let Some(column) = table.column(sole) {
                if seen.insert(&column.name) {
                    candidates.push(column);
                }
            }
        }
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{DataType, Index, PrimaryKey};

    #[test]
    fn test_suffix_stripping() {
        assert_eq!(column_match_key("order_id"), Some("order".to_string()));
        assert_eq!(column_match_key("OrderKey"), Some("order".to_string()));
        assert_eq!(column_match_key("order_keyid"), Some("order".to_string()));
        assert_eq!(column_match_key("orderid"), Some("order".to_string()));
        assert_eq!(column_match_key("id"), None);
        assert_eq!(column_match_key("total"), None);
    }

    #[test]
    fn test_generic_key_names() {
        assert!(is_generic_key_name("id"));
        assert!(is_generic_key_name("KEY"));
        assert!(is_generic_key_name("keyid"));
        assert!(!is_generic_key_name("order_id"));
        assert!(!is_generic_key_name("total"));
    }

    #[test]
    fn test_grouping_key_falls_back_to_name() {
        assert_eq!(column_grouping_key("order_id"), "order");
        assert_eq!(column_grouping_key("ID"), "id");
        assert_eq!(column_grouping_key("total"), "total");
    }

    #[test]
    fn test_candidate_key_columns() {
        let table = Table::new("app", "users")
            .with_column(Column::new("id", DataType::integer()))
            .with_column(Column::new("email", DataType::varchar()))
            .with_column(Column::new("created", DataType::varchar()))
            .with_primary_key(PrimaryKey::new("pk_users", &["id"]))
            .with_index(Index::new("uq_users_email", &["email"], true))
            .with_index(Index::new("ix_users_created", &["created"], false));

        let names: Vec<&str> = candidate_key_columns(&table)
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["id", "email"]);
    }

    #[test]
    fn test_composite_keys_yield_no_candidates() {
        let table = Table::new("app", "grants")
            .with_column(Column::new("user_id", DataType::integer()))
            .with_column(Column::new("role_id", DataType::integer()))
            .with_primary_key(PrimaryKey::new("pk_grants", &["user_id", "role_id"]));

        assert!(candidate_key_columns(&table).is_empty());
    }
}
