//! Normalized name variants used to group likely-related tables and columns

use std::collections::{BTreeMap, BTreeSet};

/// Only this many of the most frequent shared prefixes are considered
/// significant, besides any prefix carried by more than half of all
/// distinct prefixes.
const MAX_SIGNIFICANT_PREFIXES: usize = 12;

/// Derive the match keys of each name in `names`
///
/// Names are tokenized on `separator` and every cumulative token prefix is
/// counted across all names. Only significant prefixes are stripped: the
/// most frequent ones, so rare one-off prefixes do not produce false
/// variants. Each name then yields one key per significant prefix it starts
/// with (prefix stripped, remainder singularized) plus its own singularized
/// whole name. Names are lowercased; blank variants are discarded.
pub fn derive_match_keys(
    names: &[String],
    separator: char,
) -> BTreeMap<String, BTreeSet<String>> {
    let names: BTreeSet<String> = names.iter().map(|n| n.to_lowercase()).collect();
    if names.is_empty() {
        return BTreeMap::new();
    }

    let prefixes = significant_prefixes(&names, separator);
    let mut keys_by_name = BTreeMap::new();
    for name in &names {
        let mut keys = BTreeSet::new();
        let whole = singularize(name);
        if !whole.is_empty() {
            keys.insert(whole);
        }
        for prefix in &prefixes {
            let lead = format!("{}{}", prefix, separator);
            if let Some(rest) = name.strip_prefix(&lead) {
                let key = singularize(rest);
                if !key.is_empty() {
                    keys.insert(key);
                }
            }
        }
        keys_by_name.insert(name.clone(), keys);
    }
    keys_by_name
}

/// Cumulative token prefixes worth stripping, ranked by how many names
/// share them
fn significant_prefixes(names: &BTreeSet<String>, separator: char) -> Vec<String> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for name in names {
        let tokens: Vec<&str> = name.split(separator).collect();
        // proper prefixes only; the whole name is covered by the empty prefix
        for end in 1..tokens.len() {
            let prefix = tokens[..end].join(&separator.to_string());
            *counts.entry(prefix).or_insert(0) += 1;
        }
    }

    let distinct = counts.len();
    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    ranked
        .into_iter()
        .enumerate()
        .filter(|(rank, (_, count))| *rank < MAX_SIGNIFICANT_PREFIXES || count * 2 > distinct)
        .map(|(_, (prefix, _))| prefix)
        .collect()
}

/// Strip a trailing pluralizing suffix from a lowercased name
pub fn singularize(name: &str) -> String {
    if let Some(stem) = name.strip_suffix("ies") {
        if !stem.is_empty() {
            return format!("{}y", stem);
        }
    }
    for sibilant in ["ses", "xes", "zes", "ches", "shes"] {
        if name.ends_with(sibilant) {
            return name[..name.len() - 2].to_string();
        }
    }
    if name.ends_with('s') && !name.ends_with("ss") {
        return name[..name.len() - 1].to_string();
    }
    name.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys_for(names: &[&str], name: &str) -> BTreeSet<String> {
        let names: Vec<String> = names.iter().map(|n| n.to_string()).collect();
        derive_match_keys(&names, '_')
            .remove(name)
            .unwrap_or_default()
    }

    #[test]
    fn test_prefix_match_keys() {
        let keys = keys_for(
            &["xyz_old_table1", "xyz_old_table2", "xyz_table3"],
            "xyz_old_table1",
        );
        let expected: BTreeSet<String> = ["table1", "old_table1", "xyz_old_table1"]
            .iter()
            .map(|k| k.to_string())
            .collect();
        assert_eq!(keys, expected);
    }

    #[test]
    fn test_empty_input() {
        assert!(derive_match_keys(&[], '_').is_empty());
    }

    #[test]
    fn test_names_are_lowercased() {
        let keys = keys_for(&["ORDERS"], "orders");
        assert!(keys.contains("order"));
    }

    #[test]
    fn test_singularize() {
        assert_eq!(singularize("orders"), "order");
        assert_eq!(singularize("categories"), "category");
        assert_eq!(singularize("statuses"), "status");
        assert_eq!(singularize("boxes"), "box");
        assert_eq!(singularize("address"), "address");
        assert_eq!(singularize("order"), "order");
    }

    #[test]
    fn test_rare_prefix_not_stripped() {
        // "one_off" appears once among many unprefixed names and many
        // distinct prefixes, so with more than 12 competing prefixes a
        // low-count one drops out
        let mut names: Vec<String> = (0..14)
            .flat_map(|i| {
                vec![
                    format!("p{}_alpha", i),
                    format!("p{}_beta", i),
                    format!("p{}_gamma", i),
                ]
            })
            .collect();
        names.push("zz_solo".to_string());
        let keys = derive_match_keys(&names, '_');
        // "zz" ranks below the 12 three-name prefixes and is carried by
        // only one of the 15 distinct prefixes
        let solo = keys.get("zz_solo").unwrap();
        assert!(solo.contains("zz_solo"));
        assert!(!solo.contains("solo"));
    }
}
