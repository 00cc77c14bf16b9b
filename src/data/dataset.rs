//! Tabular dataset with dynamically typed columns.

use crate::error::{BiasError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Tokens treated as missing when parsing text input (compared case-insensitively).
const MISSING_TOKENS: &[&str] = &["", "na", "n/a", "nan", "null", "none"];

/// A single cell value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Free text or categorical level.
    Text(String),
    /// Numeric value.
    Number(f64),
    /// Boolean flag.
    Boolean(bool),
    /// Missing value.
    Missing,
}

impl Value {
    /// Trim a raw text field, returning `None` for missing-value tokens.
    ///
    /// Typed parsing happens per column once the column type is known.
    fn parse_missing(raw: &str) -> Option<&str> {
        let trimmed = raw.trim();
        if MISSING_TOKENS
            .iter()
            .any(|token| trimmed.eq_ignore_ascii_case(token))
        {
            None
        } else {
            Some(trimmed)
        }
    }

    /// Check if this is a missing value. NaN numbers count as missing.
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Missing => true,
            Value::Number(v) => v.is_nan(),
            _ => false,
        }
    }

    /// Try to get as text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as f64.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// The type of this value, or `None` when missing.
    pub fn value_type(&self) -> Option<ColumnType> {
        if self.is_missing() {
            return None;
        }
        match self {
            Value::Text(_) => Some(ColumnType::Text),
            Value::Number(_) => Some(ColumnType::Number),
            Value::Boolean(_) => Some(ColumnType::Boolean),
            Value::Missing => None,
        }
    }

    /// Text used to group values into categories.
    ///
    /// Same as `Display`, except that `-0` and `0` share one key.
    pub fn category_key(&self) -> String {
        match self {
            Value::Number(v) if *v == 0.0 => "0".to_string(),
            _ => self.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "{}", s),
            Value::Number(v) if v.is_nan() => write!(f, "NaN"),
            Value::Number(v) => write!(f, "{}", v),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Missing => write!(f, "<NA>"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Missing)
    }
}

/// Inferred type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Text,
    Number,
    Boolean,
    /// Every value is missing.
    Empty,
    /// Non-missing values of more than one type.
    Mixed,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Text => "text",
            ColumnType::Number => "number",
            ColumnType::Boolean => "boolean",
            ColumnType::Empty => "empty",
            ColumnType::Mixed => "mixed",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordered collection of named, equal-length columns.
///
/// The dataset is immutable once built; every analysis borrows it read-only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabularDataset {
    /// Column names in order.
    column_names: Vec<String>,
    /// Column values, parallel to `column_names`.
    columns: Vec<Vec<Value>>,
    /// Number of rows shared by all columns.
    n_rows: usize,
}

impl TabularDataset {
    /// Create a dataset from column names and their values.
    ///
    /// All columns must have the same length and names must be unique.
    pub fn new(column_names: Vec<String>, columns: Vec<Vec<Value>>) -> Result<Self> {
        if column_names.len() != columns.len() {
            return Err(BiasError::InvalidParameter(format!(
                "{} column names given for {} columns",
                column_names.len(),
                columns.len()
            )));
        }

        let mut seen = HashSet::new();
        for name in &column_names {
            if !seen.insert(name.as_str()) {
                return Err(BiasError::DuplicateColumn(name.clone()));
            }
        }

        let n_rows = columns.first().map(Vec::len).unwrap_or(0);
        for (name, values) in column_names.iter().zip(&columns) {
            if values.len() != n_rows {
                return Err(BiasError::DimensionMismatch {
                    column: name.clone(),
                    expected: n_rows,
                    actual: values.len(),
                });
            }
        }

        Ok(Self {
            column_names,
            columns,
            n_rows,
        })
    }

    /// Create a dataset from `(name, values)` pairs.
    pub fn from_columns<S: Into<String>>(columns: Vec<(S, Vec<Value>)>) -> Result<Self> {
        let (names, values): (Vec<String>, Vec<Vec<Value>>) = columns
            .into_iter()
            .map(|(name, values)| (name.into(), values))
            .unzip();
        Self::new(names, values)
    }

    /// Load a dataset from a CSV file.
    ///
    /// Expected format:
    /// - First row: header with column names
    /// - Subsequent rows: one record per row, same width as the header
    ///
    /// Empty fields and `NA`, `N/A`, `NaN`, `null`, `None` are missing.
    /// A column is boolean if every non-missing value is `true`/`false`,
    /// numeric if every non-missing value parses as a number, otherwise text.
    /// Leading and trailing whitespace is trimmed from every field and header
    /// name, so `" yes"` and `"yes"` are the same value.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let dataset = Self::from_reader(file)?;
        info!(
            path = %path.display(),
            rows = dataset.n_rows(),
            columns = dataset.n_columns(),
            "loaded dataset"
        );
        Ok(dataset)
    }

    /// Load a dataset from any CSV byte source.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let column_names: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|s| s.to_string())
            .collect();
        if column_names.is_empty() || column_names.iter().all(|s| s.is_empty()) {
            return Err(BiasError::EmptyData("CSV has no header row".to_string()));
        }

        // First pass: collect raw fields column-wise
        let mut raw: Vec<Vec<Option<String>>> = vec![Vec::new(); column_names.len()];
        for record in csv_reader.records() {
            let record = record?;
            for (col_idx, field) in record.iter().enumerate() {
                raw[col_idx].push(Value::parse_missing(field).map(str::to_string));
            }
        }

        // Second pass: infer a type per column and convert
        let columns = raw.into_iter().map(convert_column).collect();

        Self::new(column_names, columns)
    }

    /// Column names in order.
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns.
    pub fn n_columns(&self) -> usize {
        self.column_names.len()
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.n_columns())
    }

    /// Check if a column exists.
    pub fn has_column(&self, column: &str) -> bool {
        self.column_names.iter().any(|name| name == column)
    }

    /// Get all values for a column.
    pub fn column(&self, column: &str) -> Result<&[Value]> {
        self.column_names
            .iter()
            .position(|name| name == column)
            .map(|idx| self.columns[idx].as_slice())
            .ok_or_else(|| BiasError::ColumnNotFound(column.to_string()))
    }

    /// Iterate over `(name, values)` pairs in column order.
    pub fn iter_columns(&self) -> impl Iterator<Item = (&str, &[Value])> {
        self.column_names
            .iter()
            .map(String::as_str)
            .zip(self.columns.iter().map(Vec::as_slice))
    }

    /// Get a single cell.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        self.column(column).ok().and_then(|values| values.get(row))
    }

    /// Get a row as values in column order.
    pub fn row(&self, row: usize) -> Option<Vec<&Value>> {
        if row >= self.n_rows {
            return None;
        }
        Some(self.columns.iter().map(|values| &values[row]).collect())
    }

    /// Infer the type of a column from its non-missing values.
    pub fn column_type(&self, column: &str) -> Result<ColumnType> {
        let values = self.column(column)?;
        let mut found: Option<ColumnType> = None;
        for value_type in values.iter().filter_map(Value::value_type) {
            match found {
                None => found = Some(value_type),
                Some(existing) if existing != value_type => return Ok(ColumnType::Mixed),
                Some(_) => {}
            }
        }
        Ok(found.unwrap_or(ColumnType::Empty))
    }
}

/// Convert raw fields of one column to typed values.
fn convert_column(fields: Vec<Option<String>>) -> Vec<Value> {
    let all_boolean = fields.iter().flatten().all(|s| parse_bool(s).is_some());
    let all_numeric = fields.iter().flatten().all(|s| s.parse::<f64>().is_ok());

    fields
        .into_iter()
        .map(|field| match field {
            None => Value::Missing,
            Some(s) if all_boolean => {
                parse_bool(&s).map(Value::Boolean).unwrap_or(Value::Missing)
            }
            Some(s) if all_numeric => s
                .parse::<f64>()
                .map(Value::Number)
                .unwrap_or(Value::Missing),
            Some(s) => Value::Text(s),
        })
        .collect()
}

fn parse_bool(s: &str) -> Option<bool> {
    if s.eq_ignore_ascii_case("true") {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
