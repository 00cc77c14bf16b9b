//! Analysis configuration, serializable to YAML.

use crate::error::{BiasError, Result};
use crate::imbalance::{validate_threshold, DEFAULT_IMBALANCE_THRESHOLD};
use crate::profile::{DEFAULT_MAX_LABEL_CARDINALITY, DEFAULT_PREVIEW_ROWS};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunable policy for label analysis.
///
/// Every field has a default, so a YAML file only needs the keys it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Name of the configuration.
    pub name: String,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Minority/majority ratio below which a label is imbalanced.
    pub imbalance_threshold: f64,
    /// Exclusive upper bound on distinct values for label columns.
    pub max_label_cardinality: usize,
    /// Rows shown in the dataset preview.
    pub preview_rows: usize,
    /// Reject label columns that are not eligible.
    pub strict_label_selection: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            description: None,
            imbalance_threshold: DEFAULT_IMBALANCE_THRESHOLD,
            max_label_cardinality: DEFAULT_MAX_LABEL_CARDINALITY,
            preview_rows: DEFAULT_PREVIEW_ROWS,
            strict_label_selection: true,
        }
    }
}

impl AnalysisConfig {
    /// Load from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml(&yaml)
    }

    /// Save to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(BiasError::from)
    }

    /// Check that all values are usable.
    pub fn validate(&self) -> Result<()> {
        validate_threshold(self.imbalance_threshold)?;
        if self.max_label_cardinality == 0 {
            return Err(BiasError::InvalidParameter(
                "max_label_cardinality must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.imbalance_threshold = threshold;
        self
    }

    pub fn with_max_label_cardinality(mut self, max_cardinality: usize) -> Self {
        self.max_label_cardinality = max_cardinality;
        self
    }

    pub fn with_preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = rows;
        self
    }

    pub fn with_strict_label_selection(mut self, strict: bool) -> Self {
        self.strict_label_selection = strict;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.imbalance_threshold, 0.5);
        assert_eq!(config.max_label_cardinality, 50);
        assert_eq!(config.preview_rows, 5);
        assert!(config.strict_label_selection);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = AnalysisConfig::default()
            .with_name("strict-labels")
            .with_description("Flag anything below a third")
            .with_threshold(0.33)
            .with_max_label_cardinality(10);

        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("imbalance_threshold: 0.33"));

        let loaded = AnalysisConfig::from_yaml(&yaml).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = AnalysisConfig::from_yaml("imbalance_threshold: 0.2\n").unwrap();
        assert_eq!(config.imbalance_threshold, 0.2);
        assert_eq!(config.max_label_cardinality, DEFAULT_MAX_LABEL_CARDINALITY);
        assert_eq!(config.name, "default");
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "name: from-disk").unwrap();
        writeln!(file, "max_label_cardinality: 12").unwrap();
        file.flush().unwrap();

        let config = AnalysisConfig::from_file(file.path()).unwrap();
        assert_eq!(config.name, "from-disk");
        assert_eq!(config.max_label_cardinality, 12);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            AnalysisConfig::from_yaml("imbalance_threshold: 2.0\n"),
            Err(BiasError::InvalidParameter(_))
        ));
        assert!(matches!(
            AnalysisConfig::from_yaml("max_label_cardinality: 0\n"),
            Err(BiasError::InvalidParameter(_))
        ));
        assert!(matches!(
            AnalysisConfig::from_yaml("imbalance_threshold: [1, 2]\n"),
            Err(BiasError::Yaml(_))
        ));
    }
}
