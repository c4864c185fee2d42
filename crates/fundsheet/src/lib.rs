#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/fundsheet/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod report;

// Re-export main types from sub-crates
pub use fundsheet_data as data;
pub use fundsheet_output as output;

pub use config::{DEFAULT_OUTPUT, FailurePolicy, PLACEHOLDER_API_KEY, ReportConfig};
pub use error::{ReportError, Result};
pub use report::{Collected, EvaluationSource, Progress, Report, run_report};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
