//! Whole-dataset exploratory profile.

use crate::data::{ColumnType, TabularDataset};
use crate::error::Result;
use super::column::{count_missing, distinct_count};
use serde::{Deserialize, Serialize};

/// Default number of preview rows.
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// Summary of one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    /// Column name.
    pub name: String,
    /// Inferred type.
    pub dtype: ColumnType,
    /// Number of missing values.
    pub missing: usize,
    /// Number of distinct non-missing values.
    pub unique: usize,
}

/// Exploratory profile of a dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetProfile {
    /// Number of rows.
    pub n_rows: usize,
    /// Number of columns.
    pub n_columns: usize,
    /// Column names, dataset order.
    pub headers: Vec<String>,
    /// Per-column summaries, dataset order.
    pub columns: Vec<ColumnProfile>,
    /// `(column, unique)` sorted by descending unique count.
    pub unique_ranking: Vec<(String, usize)>,
    /// First rows rendered as text.
    pub preview: Vec<Vec<String>>,
}

impl DatasetProfile {
    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.n_columns)
    }

    /// Total missing values across all columns.
    pub fn total_missing(&self) -> usize {
        self.columns.iter().map(|c| c.missing).sum()
    }

    /// Columns with at least one missing value.
    pub fn columns_with_missing(&self) -> Vec<&ColumnProfile> {
        self.columns.iter().filter(|c| c.missing > 0).collect()
    }

    /// Render as YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Render as pretty JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl std::fmt::Display for DatasetProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Dataset Profile")?;
        writeln!(f, "===============")?;
        writeln!(f)?;
        writeln!(f, "Shape: {} rows x {} columns", self.n_rows, self.n_columns)?;
        writeln!(f)?;

        writeln!(f, "First {} rows:", self.preview.len())?;
        writeln!(f, "  {}", self.headers.join(" | "))?;
        for row in &self.preview {
            writeln!(f, "  {}", row.join(" | "))?;
        }
        writeln!(f)?;

        let width = self
            .columns
            .iter()
            .map(|c| c.name.chars().count())
            .max()
            .unwrap_or(0)
            .max(6);
        writeln!(
            f,
            "  {:<width$}  {:<8}  {:>8}  {:>8}",
            "column",
            "type",
            "missing",
            "unique",
            width = width
        )?;
        for column in &self.columns {
            writeln!(
                f,
                "  {:<width$}  {:<8}  {:>8}  {:>8}",
                column.name,
                column.dtype.as_str(),
                column.missing,
                column.unique,
                width = width
            )?;
        }
        writeln!(f)?;

        writeln!(f, "Unique values per column (descending):")?;
        for (name, unique) in &self.unique_ranking {
            writeln!(f, "  {:<width$}  {:>8}", name, unique, width = width)?;
        }
        Ok(())
    }
}

/// Profile every column of a dataset and capture a preview of the first rows.
pub fn profile_dataset(dataset: &TabularDataset, preview_rows: usize) -> Result<DatasetProfile> {
    let mut columns = Vec::with_capacity(dataset.n_columns());
    for name in dataset.column_names() {
        columns.push(ColumnProfile {
            name: name.clone(),
            dtype: dataset.column_type(name)?,
            missing: count_missing(dataset, name)?,
            unique: distinct_count(dataset, name)?,
        });
    }

    let mut unique_ranking: Vec<(String, usize)> = columns
        .iter()
        .map(|c| (c.name.clone(), c.unique))
        .collect();
    unique_ranking.sort_by(|a, b| b.1.cmp(&a.1));

    let preview = (0..dataset.n_rows().min(preview_rows))
        .filter_map(|row| dataset.row(row))
        .map(|values| values.iter().map(|v| v.to_string()).collect())
        .collect();

    Ok(DatasetProfile {
        n_rows: dataset.n_rows(),
        n_columns: dataset.n_columns(),
        headers: dataset.column_names().to_vec(),
        columns,
        unique_ranking,
        preview,
    })
}
