//! Session context: one dataset plus the policy used to analyze it.

use crate::data::{FrequencyDistribution, TabularDataset};
use crate::error::Result;
use crate::pipeline::config::AnalysisConfig;
use crate::pipeline::report::LabelBiasReport;
use crate::pipeline::runner::Pipeline;
use crate::profile::{profile_dataset, summarize, DatasetProfile};
use std::path::Path;

/// A loaded dataset and its analysis configuration.
///
/// Sessions own their dataset and share nothing; every query is a fresh
/// computation over the same immutable snapshot.
#[derive(Debug, Clone)]
pub struct Session {
    dataset: TabularDataset,
    config: AnalysisConfig,
    source: Option<String>,
}

impl Session {
    /// Start a session over an in-memory dataset.
    pub fn new(dataset: TabularDataset, config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            dataset,
            config,
            source: None,
        })
    }

    /// Start a session by loading a CSV file.
    pub fn from_csv<P: AsRef<Path>>(path: P, config: AnalysisConfig) -> Result<Self> {
        let path = path.as_ref();
        let dataset = TabularDataset::from_csv(path)?;
        let mut session = Self::new(dataset, config)?;
        session.source = Some(path.display().to_string());
        Ok(session)
    }

    pub fn dataset(&self) -> &TabularDataset {
        &self.dataset
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Source file the dataset was loaded from, if any.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Exploratory profile using the configured preview size.
    pub fn profile(&self) -> Result<DatasetProfile> {
        profile_dataset(&self.dataset, self.config.preview_rows)
    }

    /// Value counts of any column (not restricted to label candidates).
    pub fn distribution(&self, column: &str) -> Result<FrequencyDistribution> {
        summarize(&self.dataset, column)
    }

    /// Columns eligible for label analysis.
    pub fn label_candidates(&self) -> Vec<String> {
        self.pipeline().label_candidates(&self.dataset)
    }

    /// Full bias analysis of a label column.
    pub fn analyze_label(&self, column: &str) -> Result<LabelBiasReport> {
        self.pipeline().run(&self.dataset, column)
    }

    fn pipeline(&self) -> Pipeline {
        let pipeline = Pipeline::from_config(&self.config);
        match &self.source {
            Some(source) => pipeline.source(source),
            None => pipeline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BiasError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_csv() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "patient,approved,region").unwrap();
        for i in 0..12 {
            let approved = if i < 10 { "yes" } else { "no" };
            let region = if i % 2 == 0 { "north" } else { "south" };
            writeln!(file, "p{},{},{}", i, approved, region).unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_session_from_csv() {
        let file = create_test_csv();
        let session = Session::from_csv(file.path(), AnalysisConfig::default()).unwrap();

        assert_eq!(session.dataset().shape(), (12, 3));
        assert!(session.source().is_some());
        assert_eq!(session.profile().unwrap().preview.len(), 5);
    }

    #[test]
    fn test_session_label_analysis() {
        let file = create_test_csv();
        let config = AnalysisConfig::default().with_max_label_cardinality(10);
        let session = Session::from_csv(file.path(), config).unwrap();

        assert_eq!(session.label_candidates(), vec!["approved", "region"]);

        let report = session.analyze_label("approved").unwrap();
        assert!(report.is_imbalanced());
        assert_eq!(report.meta.source.as_deref(), session.source());

        let report = session.analyze_label("region").unwrap();
        assert!(!report.is_imbalanced());

        assert!(matches!(
            session.analyze_label("patient"),
            Err(BiasError::NotEligibleLabel { .. })
        ));
        // general distributions are not restricted to label candidates
        assert_eq!(session.distribution("patient").unwrap().len(), 12);
    }

    #[test]
    fn test_session_rejects_invalid_config() {
        let ds = TabularDataset::from_columns(Vec::<(String, _)>::new()).unwrap();
        let config = AnalysisConfig::default().with_threshold(-1.0);
        assert!(matches!(
            Session::new(ds, config),
            Err(BiasError::InvalidParameter(_))
        ));
    }
}
