//! Data structures for dataset inspection.

mod dataset;
mod distribution;

pub use dataset::{ColumnType, TabularDataset, Value};
pub use distribution::{Category, FrequencyDistribution};
