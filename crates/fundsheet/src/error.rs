//! Error types for report runs.

use fundsheet_data::DataError;
use fundsheet_output::OutputError;
use thiserror::Error;

/// Errors that end a report run.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Fetch failure surfaced under the abort policy, or client setup failure.
    #[error(transparent)]
    Data(#[from] DataError),

    /// The output artifact could not be written.
    #[error("Failed to write output: {0}")]
    Output(#[from] OutputError),

    /// Nothing to fetch after normalizing the symbol list.
    #[error("No symbols given")]
    NoSymbols,
}

/// Result type for report runs.
pub type Result<T> = std::result::Result<T, ReportError>;
