//! Label bias report produced by the pipeline.

use crate::data::FrequencyDistribution;
use crate::error::Result;
use crate::imbalance::{AdvisoryReport, ImbalanceVerdict};
use serde::{Deserialize, Serialize};

/// Report generation metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    /// Generation timestamp (RFC 3339).
    pub generated: String,
    /// Tool name.
    pub tool: String,
    /// Tool version.
    pub version: String,
    /// Configuration name used.
    pub config: String,
    /// Source dataset file (if known).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl ReportMeta {
    pub(crate) fn now(config: &str, source: Option<String>) -> Self {
        Self {
            generated: chrono::Utc::now().to_rfc3339(),
            tool: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            config: config.to_string(),
            source,
        }
    }
}

/// Full result of analyzing one label column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelBiasReport {
    /// Generation metadata.
    pub meta: ReportMeta,
    /// Label column analyzed.
    pub column: String,
    /// Value counts of the label column.
    pub distribution: FrequencyDistribution,
    /// Missing values in the label column (excluded from the distribution).
    pub missing: usize,
    /// Balanced/imbalanced verdict.
    pub verdict: ImbalanceVerdict,
    /// One-line summary of the verdict.
    pub headline: String,
    /// Suggested strategies and narrative.
    pub advisory: AdvisoryReport,
}

impl LabelBiasReport {
    pub fn is_imbalanced(&self) -> bool {
        self.verdict.is_imbalanced()
    }

    /// Render as YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Render as pretty JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Render as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str("# Label Bias Detection\n\n");
        md.push_str(&format!("Distribution of `{}`:\n\n", self.column));
        md.push_str(&format!("| {} | count |\n", self.column));
        md.push_str("|---|---|\n");
        for category in self.distribution.iter() {
            md.push_str(&format!("| {} | {} |\n", category.value, category.count));
        }
        md.push('\n');
        if self.missing > 0 {
            md.push_str(&format!("Missing values excluded: {}\n\n", self.missing));
        }

        md.push_str(&format!("**{}**\n\n", self.headline));
        md.push_str(&format!(
            "- **Ratio**: {:.3} (threshold {})\n",
            self.verdict.ratio, self.verdict.threshold
        ));
        md.push_str(&format!(
            "- **Majority / minority**: {} / {}\n\n",
            self.verdict.majority_count, self.verdict.minority_count
        ));

        md.push_str(&self.advisory.to_markdown());
        md
    }
}

impl std::fmt::Display for LabelBiasReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Label Bias Detection")?;
        writeln!(f, "====================")?;
        writeln!(f)?;
        write!(f, "{}", self.distribution)?;
        if self.missing > 0 {
            writeln!(f, "  ({} missing values excluded)", self.missing)?;
        }
        writeln!(f)?;
        writeln!(f, "{}", self.headline)?;
        writeln!(
            f,
            "  Ratio: {:.3} (threshold {}), majority {} / minority {}",
            self.verdict.ratio,
            self.verdict.threshold,
            self.verdict.majority_count,
            self.verdict.minority_count
        )?;
        writeln!(f)?;
        write!(f, "{}", self.advisory)
    }
}
