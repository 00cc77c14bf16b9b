//! BiasRx: dataset inspection and label-imbalance detection
//!
//! This library profiles tabular datasets and checks whether a chosen label
//! column is imbalanced, with templated guidance on how to rebalance it.
//!
//! # Overview
//!
//! The library is organized into composable modules:
//!
//! - **data**: Core data structures (TabularDataset, Value, FrequencyDistribution)
//! - **profile**: Dataset and column profiling (shape, types, missing, cardinality)
//! - **imbalance**: Imbalance classification and advisory text
//! - **pipeline**: Configuration, sessions and end-to-end label analysis
//!
//! # Example
//!
//! ```no_run
//! use biasrx::prelude::*;
//!
//! let dataset = TabularDataset::from_csv("patients.csv").unwrap();
//!
//! let report = Pipeline::new()
//!     .threshold(0.5)
//!     .max_label_cardinality(50)
//!     .run(&dataset, "outcome")
//!     .unwrap();
//!
//! println!("{}", report.headline);
//! for strategy in &report.advisory.strategies {
//!     println!("{}: {}", strategy.name, strategy.description);
//! }
//! ```

pub mod data;
pub mod error;
pub mod imbalance;
pub mod pipeline;
pub mod profile;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::data::{Category, ColumnType, FrequencyDistribution, TabularDataset, Value};
    pub use crate::error::{BiasError, Result};
    pub use crate::imbalance::{
        advise, classify, rebalancing_strategies, AdvisoryReport, Classification,
        ImbalanceVerdict, Strategy, DEFAULT_IMBALANCE_THRESHOLD,
    };
    pub use crate::pipeline::{
        run_label_check, AnalysisConfig, LabelBiasReport, Pipeline, ReportMeta, Session,
    };
    pub use crate::profile::{
        count_missing, distinct_count, eligible_label_columns, profile_dataset, summarize,
        ColumnProfile, DatasetProfile, DEFAULT_MAX_LABEL_CARDINALITY, DEFAULT_PREVIEW_ROWS,
    };
}
