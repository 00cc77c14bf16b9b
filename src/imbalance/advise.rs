//! Remediation guidance for imbalanced label columns.

use crate::imbalance::classify::{Classification, ImbalanceVerdict};
use serde::{Deserialize, Serialize};

/// Fixed rebalancing strategies, in presentation order.
const STRATEGIES: [(&str, &str); 4] = [
    ("SMOTE", "Create synthetic examples for the minority class"),
    ("Oversampling", "Duplicate underrepresented class rows"),
    ("Undersampling", "Reduce majority class instances"),
    ("Class weighting", "Adjust model training sensitivity"),
];

/// A named rebalancing strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strategy {
    pub name: String,
    pub description: String,
}

/// Templated guidance for a label column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryReport {
    /// Label column the advice refers to.
    pub label_column: String,
    /// Classification the advice was selected from.
    pub classification: Classification,
    /// Explanatory text.
    pub narrative: String,
    /// Suggested strategies; empty when balanced.
    pub strategies: Vec<Strategy>,
}

impl AdvisoryReport {
    pub fn has_strategies(&self) -> bool {
        !self.strategies.is_empty()
    }

    /// Render as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        if self.has_strategies() {
            md.push_str("## Bias Fix Suggestions\n\n");
            md.push_str("Try one of these:\n\n");
            for strategy in &self.strategies {
                md.push_str(&format!("- **{}:** {}\n", strategy.name, strategy.description));
            }
            md.push('\n');
        }

        md.push_str("## BiasRx Insight\n\n");
        md.push_str(&self.narrative);
        md.push('\n');
        md
    }
}

impl std::fmt::Display for AdvisoryReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.has_strategies() {
            writeln!(f, "Bias Fix Suggestions")?;
            writeln!(f, "  Try one of these:")?;
            for strategy in &self.strategies {
                writeln!(f, "  - {}: {}", strategy.name, strategy.description)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "{}", self.narrative)
    }
}

/// The fixed strategy list recommended for imbalanced labels.
pub fn rebalancing_strategies() -> Vec<Strategy> {
    STRATEGIES
        .iter()
        .map(|&(name, description)| Strategy {
            name: name.to_string(),
            description: description.to_string(),
        })
        .collect()
}

/// Select guidance for a verdict on `label_column`.
///
/// Imbalanced verdicts get the four rebalancing strategies and a narrative
/// explaining the risks; balanced verdicts get no strategies and a short
/// confirmation.
pub fn advise(verdict: &ImbalanceVerdict, label_column: &str) -> AdvisoryReport {
    let (narrative, strategies) = match verdict.classification {
        Classification::Imbalanced => (imbalanced_narrative(label_column), rebalancing_strategies()),
        Classification::Balanced => (balanced_narrative(label_column), Vec::new()),
    };

    AdvisoryReport {
        label_column: label_column.to_string(),
        classification: verdict.classification,
        narrative,
        strategies,
    }
}

fn imbalanced_narrative(label_column: &str) -> String {
    format!(
        "Hello! I'm BiasRx.\n\
         \n\
         Based on the distribution of `{}`, I noticed that one class is significantly underrepresented.\n\
         \n\
         This could make your model biased by:\n\
         - Learning patterns only from the majority class\n\
         - Failing to recognize edge cases\n\
         - Creating unfair predictions for the underrepresented group\n\
         \n\
         Consider balancing this before training!",
        label_column
    )
}

fn balanced_narrative(label_column: &str) -> String {
    format!(
        "Hello! I'm BiasRx.\n\
         \n\
         The classes in `{}` are reasonably balanced. No rebalancing is needed before training.",
        label_column
    )
}
