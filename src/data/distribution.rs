//! Value-frequency distributions for a single column.

use crate::data::Value;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// One distinct value and how often it occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Textual rendering of the value.
    pub value: String,
    /// Number of occurrences.
    pub count: usize,
}

/// Occurrence counts of each distinct non-missing value in a column.
///
/// Categories are kept sorted by descending count; ties keep the order in
/// which the values first appeared. The sum of counts equals the number of
/// non-missing values in the source column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyDistribution {
    /// Name of the source column.
    pub column: String,
    /// Categories, most frequent first.
    pub categories: Vec<Category>,
}

impl FrequencyDistribution {
    /// Count the distinct non-missing values of a column.
    pub fn from_values(column: impl Into<String>, values: &[Value]) -> Self {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut categories: Vec<Category> = Vec::new();

        for value in values.iter().filter(|v| !v.is_missing()) {
            let key = value.category_key();
            match index.get(&key) {
                Some(&idx) => categories[idx].count += 1,
                None => {
                    index.insert(key.clone(), categories.len());
                    categories.push(Category { value: key, count: 1 });
                }
            }
        }

        Self::sorted(column.into(), categories)
    }

    /// Build a distribution from precomputed `(value, count)` pairs.
    ///
    /// Repeated values are merged. Zero counts are kept.
    pub fn from_counts<I, S>(column: impl Into<String>, counts: I) -> Self
    where
        I: IntoIterator<Item = (S, usize)>,
        S: Into<String>,
    {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut categories: Vec<Category> = Vec::new();

        for (value, count) in counts {
            let value = value.into();
            match index.get(&value) {
                Some(&idx) => categories[idx].count += count,
                None => {
                    index.insert(value.clone(), categories.len());
                    categories.push(Category { value, count });
                }
            }
        }

        Self::sorted(column.into(), categories)
    }

    fn sorted(column: String, mut categories: Vec<Category>) -> Self {
        // stable: ties keep first-appearance order
        categories.sort_by(|a, b| b.count.cmp(&a.count));
        Self { column, categories }
    }

    /// Number of distinct values.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.categories.iter().map(|c| c.count).sum()
    }

    /// Count for a specific value, if present.
    pub fn get(&self, value: &str) -> Option<usize> {
        self.categories
            .iter()
            .find(|c| c.value == value)
            .map(|c| c.count)
    }

    /// Largest count, `None` when empty.
    pub fn max_count(&self) -> Option<usize> {
        self.categories.iter().map(|c| c.count).max()
    }

    /// Smallest count, `None` when empty.
    pub fn min_count(&self) -> Option<usize> {
        self.categories.iter().map(|c| c.count).min()
    }

    /// Iterate over categories, most frequent first.
    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    /// Write as two-column CSV: a `<column>,count` header then one row per value.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record([self.column.as_str(), "count"])?;
        for category in &self.categories {
            let count = category.count.to_string();
            csv_writer.write_record([category.value.as_str(), count.as_str()])?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Write the CSV export to a file.
    pub fn to_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        self.write_csv(file)
    }

    /// Render the CSV export as a string.
    pub fn to_csv_string(&self) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_csv(&mut buffer)?;
        // csv output of String fields is always valid UTF-8
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

impl fmt::Display for FrequencyDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Distribution of `{}`", self.column)?;
        let width = self
            .categories
            .iter()
            .map(|c| c.value.chars().count())
            .max()
            .unwrap_or(0)
            .max(5);
        let total = self.total();
        for category in &self.categories {
            let share = if total > 0 {
                category.count as f64 / total as f64 * 100.0
            } else {
                0.0
            };
            writeln!(
                f,
                "  {:<width$}  {:>8}  ({:5.1}%)",
                category.value,
                category.count,
                share,
                width = width
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(raw: &[&str]) -> Vec<Value> {
        raw.iter().map(|&s| Value::from(s)).collect()
    }

    #[test]
    fn test_counts_distinct_values() {
        let dist = FrequencyDistribution::from_values("c", &values(&["x", "x", "y"]));

        assert_eq!(dist.len(), 2);
        assert_eq!(dist.get("x"), Some(2));
        assert_eq!(dist.get("y"), Some(1));
        assert_eq!(dist.total(), 3);
    }

    #[test]
    fn test_missing_excluded() {
        let column = vec![
            Value::from("a"),
            Value::Missing,
            Value::Number(f64::NAN),
            Value::from("a"),
        ];
        let dist = FrequencyDistribution::from_values("c", &column);

        assert_eq!(dist.len(), 1);
        assert_eq!(dist.total(), 2);
    }

    #[test]
    fn test_sorted_descending_ties_stable() {
        let dist = FrequencyDistribution::from_values(
            "c",
            &values(&["b", "a", "c", "c", "a", "c"]),
        );
        let order: Vec<&str> = dist.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(order, vec!["c", "a", "b"]);

        let tied = FrequencyDistribution::from_values("c", &values(&["q", "p", "p", "q"]));
        let order: Vec<&str> = tied.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(order, vec!["q", "p"]);
    }

    #[test]
    fn test_numbers_and_booleans_as_categories() {
        let column = vec![
            Value::from(1.0),
            Value::from(1.0),
            Value::from(0.0),
            Value::from(true),
        ];
        let dist = FrequencyDistribution::from_values("c", &column);
        assert_eq!(dist.get("1"), Some(2));
        assert_eq!(dist.get("0"), Some(1));
        assert_eq!(dist.get("true"), Some(1));
    }

    #[test]
    fn test_negative_zero_merges_with_zero() {
        let column = vec![Value::from(0.0), Value::from(-0.0), Value::from(0.0)];
        let dist = FrequencyDistribution::from_values("x", &column);
        assert_eq!(dist.len(), 1);
        assert_eq!(dist.get("0"), Some(3));
        assert_eq!(dist.get("-0"), None);
    }

    #[test]
    fn test_from_counts_merges() {
        let dist = FrequencyDistribution::from_counts("c", vec![("A", 3), ("B", 5), ("A", 4)]);
        assert_eq!(dist.get("A"), Some(7));
        assert_eq!(dist.max_count(), Some(7));
        assert_eq!(dist.min_count(), Some(5));
    }

    #[test]
    fn test_csv_export() {
        let dist = FrequencyDistribution::from_values(
            "label",
            &values(&["yes", "no, really", "yes"]),
        );
        let csv = dist.to_csv_string().unwrap();
        assert_eq!(csv, "label,count\nyes,2\n\"no, really\",1\n");
    }

    #[test]
    fn test_csv_export_to_file() {
        let dist = FrequencyDistribution::from_values("g", &values(&["a", "b", "a"]));
        let file = tempfile::NamedTempFile::new().unwrap();
        dist.to_csv(file.path()).unwrap();

        let written = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(written, "g,count\na,2\nb,1\n");
    }
}
