//! Data profiling primitives for understanding dataset characteristics.

mod column;
mod dataset;

pub use column::{
    count_missing, distinct_count, eligible_label_columns, summarize,
    DEFAULT_MAX_LABEL_CARDINALITY,
};
pub use dataset::{profile_dataset, ColumnProfile, DatasetProfile, DEFAULT_PREVIEW_ROWS};
