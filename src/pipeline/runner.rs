//! Pipeline runner: dataset → distribution → verdict → advice.

use crate::data::TabularDataset;
use crate::error::{BiasError, Result};
use crate::imbalance::{advise, classify, DEFAULT_IMBALANCE_THRESHOLD};
use crate::pipeline::config::AnalysisConfig;
use crate::pipeline::report::{LabelBiasReport, ReportMeta};
use crate::profile::{
    count_missing, distinct_count, eligible_label_columns, summarize,
    DEFAULT_MAX_LABEL_CARDINALITY,
};
use tracing::debug;

/// Builder for label bias analysis.
///
/// Each run is an independent, read-only pass over the dataset.
#[derive(Debug, Clone)]
pub struct Pipeline {
    name: String,
    threshold: f64,
    max_label_cardinality: usize,
    strict: bool,
    source: Option<String>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipeline {
    /// Create a pipeline with default policy.
    pub fn new() -> Self {
        Self {
            name: "default".to_string(),
            threshold: DEFAULT_IMBALANCE_THRESHOLD,
            max_label_cardinality: DEFAULT_MAX_LABEL_CARDINALITY,
            strict: true,
            source: None,
        }
    }

    /// Create from a config.
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            name: config.name.clone(),
            threshold: config.imbalance_threshold,
            max_label_cardinality: config.max_label_cardinality,
            strict: config.strict_label_selection,
            source: None,
        }
    }

    /// Set the pipeline name.
    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Set the imbalance threshold.
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the exclusive cardinality bound for label columns.
    pub fn max_label_cardinality(mut self, max_cardinality: usize) -> Self {
        self.max_label_cardinality = max_cardinality;
        self
    }

    /// Reject columns that are not eligible labels (default on).
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Record the dataset source in report metadata.
    pub fn source(mut self, source: &str) -> Self {
        self.source = Some(source.to_string());
        self
    }

    /// Convert to config for serialization.
    pub fn to_config(&self, description: Option<&str>) -> AnalysisConfig {
        AnalysisConfig {
            name: self.name.clone(),
            description: description.map(String::from),
            imbalance_threshold: self.threshold,
            max_label_cardinality: self.max_label_cardinality,
            strict_label_selection: self.strict,
            ..AnalysisConfig::default()
        }
    }

    /// Columns this pipeline accepts as labels.
    pub fn label_candidates(&self, dataset: &TabularDataset) -> Vec<String> {
        eligible_label_columns(dataset, self.max_label_cardinality)
    }

    /// Analyze one label column.
    pub fn run(&self, dataset: &TabularDataset, column: &str) -> Result<LabelBiasReport> {
        if self.strict {
            let distinct = distinct_count(dataset, column)?;
            if distinct >= self.max_label_cardinality {
                return Err(BiasError::NotEligibleLabel {
                    column: column.to_string(),
                    distinct,
                    max_cardinality: self.max_label_cardinality,
                });
            }
        }

        let distribution = summarize(dataset, column)?;
        let missing = count_missing(dataset, column)?;
        let verdict = classify(&distribution, self.threshold)?;
        let advisory = advise(&verdict, column);
        debug!(
            pipeline = %self.name,
            column,
            classification = %verdict.classification,
            "label analysis complete"
        );

        Ok(LabelBiasReport {
            meta: ReportMeta::now(&self.name, self.source.clone()),
            column: column.to_string(),
            headline: verdict.headline(),
            distribution,
            missing,
            verdict,
            advisory,
        })
    }
}

/// Run a default label check (threshold 0.5, strict selection).
pub fn run_label_check(dataset: &TabularDataset, column: &str) -> Result<LabelBiasReport> {
    Pipeline::new().name("label-check").run(dataset, column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Value;
    use crate::imbalance::Classification;
    use approx::assert_relative_eq;

    fn create_test_dataset() -> TabularDataset {
        let label: Vec<Value> = ["yes", "yes", "yes", "yes", "no"]
            .iter()
            .map(|&s| Value::from(s))
            .collect();
        let id: Vec<Value> = (0..5).map(|i| Value::from(i as f64)).collect();
        let sex = vec![
            Value::from("f"),
            Value::from("m"),
            Value::Missing,
            Value::from("m"),
            Value::from("f"),
        ];
        TabularDataset::from_columns(vec![("id", id), ("label", label), ("sex", sex)]).unwrap()
    }

    #[test]
    fn test_end_to_end_imbalanced() {
        let ds = create_test_dataset();
        let report = run_label_check(&ds, "label").unwrap();

        assert_eq!(report.distribution.get("yes"), Some(4));
        assert_eq!(report.distribution.get("no"), Some(1));
        assert_relative_eq!(report.verdict.ratio, 0.25);
        assert_eq!(report.verdict.classification, Classification::Imbalanced);
        assert!(report.advisory.narrative.contains("`label`"));
        assert_eq!(report.advisory.strategies.len(), 4);
        assert_eq!(report.missing, 0);
    }

    #[test]
    fn test_balanced_with_missing() {
        let ds = create_test_dataset();
        let report = run_label_check(&ds, "sex").unwrap();

        assert_eq!(report.missing, 1);
        assert_eq!(report.distribution.total(), 4);
        assert!(!report.is_imbalanced());
        assert!(report.advisory.strategies.is_empty());
        assert_eq!(report.headline, "Dataset looks balanced.");
    }

    #[test]
    fn test_strict_rejects_high_cardinality() {
        let ds = create_test_dataset();
        let pipeline = Pipeline::new().max_label_cardinality(5);

        match pipeline.run(&ds, "id") {
            Err(BiasError::NotEligibleLabel {
                column,
                distinct,
                max_cardinality,
            }) => {
                assert_eq!(column, "id");
                assert_eq!(distinct, 5);
                assert_eq!(max_cardinality, 5);
            }
            other => panic!("expected NotEligibleLabel, got {:?}", other),
        }

        let relaxed = pipeline.strict(false).run(&ds, "id").unwrap();
        assert_eq!(relaxed.distribution.len(), 5);
    }

    #[test]
    fn test_unknown_column() {
        let ds = create_test_dataset();
        assert!(matches!(
            run_label_check(&ds, "target"),
            Err(BiasError::ColumnNotFound(_))
        ));
    }

    #[test]
    fn test_all_missing_label_is_empty_distribution() {
        let ds = TabularDataset::from_columns(vec![("y", vec![Value::Missing; 3])]).unwrap();
        assert!(matches!(
            run_label_check(&ds, "y"),
            Err(BiasError::EmptyDistribution(_))
        ));
    }

    #[test]
    fn test_custom_threshold() {
        let ds = create_test_dataset();
        let report = Pipeline::new().threshold(0.2).run(&ds, "label").unwrap();
        assert!(!report.is_imbalanced());
        assert_eq!(report.verdict.threshold, 0.2);
    }

    #[test]
    fn test_config_roundtrip() {
        let pipeline = Pipeline::new()
            .name("tight")
            .threshold(0.8)
            .max_label_cardinality(10)
            .strict(false);
        let config = pipeline.to_config(Some("tight labels"));

        assert_eq!(config.name, "tight");
        assert_eq!(config.imbalance_threshold, 0.8);
        assert!(!config.strict_label_selection);

        let rebuilt = Pipeline::from_config(&config);
        let ds = create_test_dataset();
        assert!(!rebuilt.run(&ds, "sex").unwrap().is_imbalanced());
        assert_eq!(rebuilt.label_candidates(&ds), vec!["id", "label", "sex"]);
    }

    #[test]
    fn test_report_renderings() {
        let ds = create_test_dataset();
        let report = Pipeline::new().source("people.csv").run(&ds, "label").unwrap();

        let text = report.to_string();
        assert!(text.contains("Smallest class is only 25.0% of the largest."));
        assert!(text.contains("SMOTE"));

        let md = report.to_markdown();
        assert!(md.contains("| yes | 4 |"));

        let json = report.to_json().unwrap();
        assert!(json.contains("\"classification\": \"imbalanced\""));
        assert!(json.contains("people.csv"));

        let yaml = report.to_yaml().unwrap();
        assert!(yaml.contains("column: label"));
    }
}
