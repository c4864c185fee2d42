#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/fundsheet/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod evaluation;
pub mod fmp;

pub use error::{DataError, Result};
pub use evaluation::Evaluation;
pub use fmp::{Endpoint, FmpClient};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
