//! Class-imbalance classification of a frequency distribution.

use crate::data::FrequencyDistribution;
use crate::error::{BiasError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Default imbalance threshold: minority/majority below this is imbalanced.
pub const DEFAULT_IMBALANCE_THRESHOLD: f64 = 0.5;

/// Balanced or imbalanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Balanced,
    Imbalanced,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Balanced => "balanced",
            Classification::Imbalanced => "imbalanced",
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying a label distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImbalanceVerdict {
    /// Minority count divided by majority count, in `[0, 1]`.
    pub ratio: f64,
    /// Classification against `threshold`.
    pub classification: Classification,
    /// Count of the most frequent class.
    pub majority_count: usize,
    /// Count of the least frequent class.
    pub minority_count: usize,
    /// Threshold the ratio was compared against.
    pub threshold: f64,
}

impl ImbalanceVerdict {
    pub fn is_imbalanced(&self) -> bool {
        self.classification == Classification::Imbalanced
    }

    /// Minority size as a percentage of the majority.
    pub fn minority_percent(&self) -> f64 {
        self.ratio * 100.0
    }

    /// One-line headline for display.
    pub fn headline(&self) -> String {
        match self.classification {
            Classification::Imbalanced => format!(
                "Imbalance detected! Smallest class is only {:.1}% of the largest.",
                self.minority_percent()
            ),
            Classification::Balanced => "Dataset looks balanced.".to_string(),
        }
    }
}

impl std::fmt::Display for ImbalanceVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Imbalance Verdict")?;
        writeln!(f, "  Classification: {}", self.classification)?;
        writeln!(f, "  Ratio:          {:.4}", self.ratio)?;
        writeln!(f, "  Threshold:      {}", self.threshold)?;
        writeln!(f, "  Majority count: {}", self.majority_count)?;
        writeln!(f, "  Minority count: {}", self.minority_count)?;
        Ok(())
    }
}

/// Check that a threshold is a usable ratio.
pub fn validate_threshold(threshold: f64) -> Result<()> {
    if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
        return Err(BiasError::InvalidParameter(format!(
            "imbalance threshold must be in [0, 1], got {}",
            threshold
        )));
    }
    Ok(())
}

/// Classify a distribution as balanced or imbalanced.
///
/// The ratio is `min(counts) / max(counts)`; the distribution is imbalanced
/// when the ratio is strictly below `threshold`, so a ratio equal to the
/// threshold is balanced. If every count is zero the ratio is taken as `1.0`
/// and the result is balanced.
///
/// # Errors
///
/// - [`BiasError::EmptyDistribution`] if the distribution has no entries.
/// - [`BiasError::InvalidParameter`] if `threshold` is not in `[0, 1]`.
pub fn classify(distribution: &FrequencyDistribution, threshold: f64) -> Result<ImbalanceVerdict> {
    validate_threshold(threshold)?;

    let (majority_count, minority_count) =
        match (distribution.max_count(), distribution.min_count()) {
            (Some(max), Some(min)) => (max, min),
            _ => return Err(BiasError::EmptyDistribution(distribution.column.clone())),
        };

    let ratio = if majority_count == 0 {
        1.0
    } else {
        minority_count as f64 / majority_count as f64
    };

    let classification = if ratio < threshold {
        Classification::Imbalanced
    } else {
        Classification::Balanced
    };

    let verdict = ImbalanceVerdict {
        ratio,
        classification,
        majority_count,
        minority_count,
        threshold,
    };

    debug!(
        column = %distribution.column,
        ratio,
        majority_count,
        minority_count,
        "classified distribution"
    );
    if verdict.is_imbalanced() {
        warn!(
            column = %distribution.column,
            ratio,
            threshold,
            "label imbalance detected"
        );
    }

    Ok(verdict)
}
