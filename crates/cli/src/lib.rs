//! PhishGuard offline tooling
//!
//! Library half of the `phishguard` binary:
//! - `dataset`: Labelled URL CSVs and feature-table export
//! - `merge`: Combine a labelled CSV with top-ranked legitimate hosts
//! - `metrics`: Confusion matrix and offline evaluation

pub mod dataset;
pub mod merge;
pub mod metrics;

pub use dataset::{
    parse_label, write_feature_table, Dataset, LabeledUrl, LEGITIMATE_LABEL, PHISHING_LABEL,
};
pub use merge::{merge_datasets, read_ranked_hosts, MergeSummary};
pub use metrics::{evaluate, ConfusionMatrix, EvaluationReport};
