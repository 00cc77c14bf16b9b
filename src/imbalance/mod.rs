//! Label imbalance detection and remediation guidance.

pub mod advise;
pub mod classify;

pub use advise::{advise, rebalancing_strategies, AdvisoryReport, Strategy};
pub use classify::{
    classify, validate_threshold, Classification, ImbalanceVerdict, DEFAULT_IMBALANCE_THRESHOLD,
};
