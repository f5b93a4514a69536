//! Configuration for schema analysis

use serde::{Deserialize, Serialize};

/// Configuration for schema analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisConfig {
    /// Discover weak associations from naming patterns
    pub infer_weak_associations: bool,

    /// Additionally run the extension-table rule during discovery
    pub infer_extension_tables: bool,

    /// Classify tables and assemble the entity-relationship model
    pub classify_entities: bool,

    /// Token separator used when deriving table-name match keys
    pub table_name_separator: char,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            infer_weak_associations: true,
            infer_extension_tables: false,
            classify_entities: true,
            table_name_separator: '_',
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for custom configuration
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }
}

/// Builder for [`AnalysisConfig`]
#[derive(Debug, Default)]
pub struct AnalysisConfigBuilder {
    config: AnalysisConfig,
}

impl AnalysisConfigBuilder {
    /// Enable or disable weak-association discovery
    pub fn infer_weak_associations(mut self, enabled: bool) -> Self {
        self.config.infer_weak_associations = enabled;
        self
    }

    /// Enable or disable the extension-table rule
    pub fn infer_extension_tables(mut self, enabled: bool) -> Self {
        self.config.infer_extension_tables = enabled;
        self
    }

    /// Enable or disable entity/relationship classification
    pub fn classify_entities(mut self, enabled: bool) -> Self {
        self.config.classify_entities = enabled;
        self
    }

    /// Set the table-name token separator
    pub fn table_name_separator(mut self, separator: char) -> Self {
        self.config.table_name_separator = separator;
        self
    }

    /// Build the configuration
    pub fn build(self) -> AnalysisConfig {
        self.config
    }
}
