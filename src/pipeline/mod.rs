//! Pipeline composition and execution for label bias analysis.

mod config;
mod report;
mod runner;
mod session;

pub use config::AnalysisConfig;
pub use report::{LabelBiasReport, ReportMeta};
pub use runner::{run_label_check, Pipeline};
pub use session::Session;
