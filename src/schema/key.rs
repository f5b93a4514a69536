//! Hierarchical natural keys for schema objects

use std::cmp::Ordering;
use std::fmt;

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

/// Hierarchical natural key of a schema object, e.g. `("sales", "orders")`.
///
/// Segments are compared lexicographically one by one; when one key is a
/// prefix of the other, the shorter key sorts first. Keys serialize as their
/// dotted full name so they can be used as JSON map keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedObjectKey {
    segments: Vec<String>,
}

impl NamedObjectKey {
    /// Create a key from its ordered segments
    pub fn new(segments: Vec<String>) -> Self {
        Self { segments }
    }

    /// Create a key from string slices
    pub fn from_parts(parts: &[&str]) -> Self {
        Self {
            segments: parts.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// The ordered segments of this key
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The final segment, typically the object's own name
    pub fn local_name(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or("")
    }

    /// Dotted rendering of all segments
    pub fn full_name(&self) -> String {
        self.segments.join(".")
    }
}

impl Ord for NamedObjectKey {
    fn cmp(&self, other: &Self) -> Ordering {
        for (a, b) in self.segments.iter().zip(other.segments.iter()) {
            match a.cmp(b) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        self.segments.len().cmp(&other.segments.len())
    }
}

impl PartialOrd for NamedObjectKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for NamedObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_name())
    }
}

impl Serialize for NamedObjectKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.full_name())
    }
}

impl<'de> Deserialize<'de> for NamedObjectKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s.is_empty() {
            return Err(de::Error::custom("empty object key"));
        }
        Ok(NamedObjectKey::new(
            s.split('.').map(str::to_string).collect(),
        ))
    }
}
