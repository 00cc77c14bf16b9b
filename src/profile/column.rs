//! Per-column summaries: frequency distributions, missing counts, cardinality.

use crate::data::{FrequencyDistribution, TabularDataset, Value};
use crate::error::Result;
use std::collections::HashSet;
use tracing::debug;

/// Default upper bound (exclusive) on distinct values for a label column.
pub const DEFAULT_MAX_LABEL_CARDINALITY: usize = 50;

/// Count occurrences of each distinct non-missing value in a column.
///
/// Fails with [`BiasError::ColumnNotFound`](crate::error::BiasError::ColumnNotFound)
/// when the column does not exist.
pub fn summarize(dataset: &TabularDataset, column: &str) -> Result<FrequencyDistribution> {
    let values = dataset.column(column)?;
    let distribution = FrequencyDistribution::from_values(column, values);
    debug!(
        column,
        distinct = distribution.len(),
        total = distribution.total(),
        "summarized column"
    );
    Ok(distribution)
}

/// Number of missing values (nulls and NaNs) in a column.
pub fn count_missing(dataset: &TabularDataset, column: &str) -> Result<usize> {
    Ok(dataset
        .column(column)?
        .iter()
        .filter(|v| v.is_missing())
        .count())
}

/// Number of distinct non-missing values in a column.
pub fn distinct_count(dataset: &TabularDataset, column: &str) -> Result<usize> {
    let values = dataset.column(column)?;
    Ok(values
        .iter()
        .filter(|v| !v.is_missing())
        .map(Value::category_key)
        .collect::<HashSet<_>>()
        .len())
}

/// Columns plausible as classification labels.
///
/// A column qualifies when its distinct non-missing count is strictly below
/// `max_cardinality`. Dataset column order is preserved. This is a heuristic:
/// an all-missing column has zero distinct values and qualifies too.
pub fn eligible_label_columns(dataset: &TabularDataset, max_cardinality: usize) -> Vec<String> {
    dataset
        .column_names()
        .iter()
        .filter(|name| {
            distinct_count(dataset, name)
                .map(|n| n < max_cardinality)
                .unwrap_or(false)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BiasError;

    fn create_test_dataset() -> TabularDataset {
        let ids: Vec<Value> = (0..60).map(|i| Value::from(i as f64)).collect();
        let group: Vec<Value> = (0..60)
            .map(|i| if i % 3 == 0 { Value::from("b") } else { Value::from("a") })
            .collect();
        let score: Vec<Value> = (0..60)
            .map(|i| {
                if i % 10 == 0 {
                    Value::Missing
                } else {
                    Value::from((i % 7) as f64)
                }
            })
            .collect();
        TabularDataset::from_columns(vec![("id", ids), ("group", group), ("score", score)])
            .unwrap()
    }

    #[test]
    fn test_summarize() {
        let ds = TabularDataset::from_columns(vec![(
            "c",
            vec![Value::from("x"), Value::from("x"), Value::from("y")],
        )])
        .unwrap();
        let dist = summarize(&ds, "c").unwrap();

        assert_eq!(dist.get("x"), Some(2));
        assert_eq!(dist.get("y"), Some(1));
        assert_eq!(dist.total(), 3);
    }

    #[test]
    fn test_summarize_total_matches_non_missing() {
        let ds = create_test_dataset();
        let dist = summarize(&ds, "score").unwrap();
        let missing = count_missing(&ds, "score").unwrap();

        assert_eq!(missing, 6);
        assert_eq!(dist.total() + missing, ds.n_rows());
    }

    #[test]
    fn test_summarize_unknown_column() {
        let ds = create_test_dataset();
        assert!(matches!(
            summarize(&ds, "nope"),
            Err(BiasError::ColumnNotFound(_))
        ));
        assert!(matches!(
            count_missing(&ds, "nope"),
            Err(BiasError::ColumnNotFound(_))
        ));
    }

    #[test]
    fn test_distinct_count() {
        let ds = create_test_dataset();
        assert_eq!(distinct_count(&ds, "id").unwrap(), 60);
        assert_eq!(distinct_count(&ds, "group").unwrap(), 2);
        assert_eq!(distinct_count(&ds, "score").unwrap(), 7);
    }

    #[test]
    fn test_signed_zero_is_one_category() {
        let ds = TabularDataset::from_reader("x,y\n0,a\n-0,a\n0.0,b\n".as_bytes()).unwrap();
        let dist = summarize(&ds, "x").unwrap();

        assert_eq!(dist.categories.len(), 1);
        assert_eq!(dist.get("0"), Some(3));
        assert_eq!(distinct_count(&ds, "x").unwrap(), 1);
    }

    #[test]
    fn test_padded_values_are_one_category() {
        let ds = TabularDataset::from_reader("label\n yes\nyes\nno \n".as_bytes()).unwrap();
        let dist = summarize(&ds, "label").unwrap();

        assert_eq!(dist.get("yes"), Some(2));
        assert_eq!(dist.get("no"), Some(1));
        assert_eq!(distinct_count(&ds, "label").unwrap(), 2);
    }

    #[test]
    fn test_eligible_label_columns() {
        let ds = create_test_dataset();
        let eligible = eligible_label_columns(&ds, DEFAULT_MAX_LABEL_CARDINALITY);
        assert_eq!(eligible, vec!["group", "score"]);
    }

    #[test]
    fn test_eligible_boundary_is_exclusive() {
        let ds = create_test_dataset();
        // "group" has exactly 2 distinct values
        assert!(!eligible_label_columns(&ds, 2).contains(&"group".to_string()));
        assert!(eligible_label_columns(&ds, 3).contains(&"group".to_string()));
        // "id" has exactly 60
        assert!(!eligible_label_columns(&ds, 60).contains(&"id".to_string()));
        assert_eq!(eligible_label_columns(&ds, 61), vec!["id", "group", "score"]);
    }
}
