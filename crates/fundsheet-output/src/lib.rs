#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/fundsheet/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod export;
pub mod layout;
pub mod ratio;
pub mod summary;
pub mod workbook;

pub use error::{OutputError, Result};
pub use export::{EvaluationRecord, EvaluationTable, ExportFormat, Exporter};
pub use layout::{CellValue, Column, header, rows};
pub use ratio::{RatioMode, price_to_earnings};
pub use summary::{RunSummary, SkippedSymbol};
pub use workbook::{SheetNaming, WorkbookWriter};
