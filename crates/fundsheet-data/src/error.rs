//! Error types for data operations.

use crate::fmp::Endpoint;
use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while fetching company financials.
#[derive(Debug, Error)]
pub enum DataError {
    /// Network error: request construction, transport or body read.
    ///
    /// The request URL is stripped; it carries the API key.
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("{endpoint} request for {symbol} failed: HTTP {status}")]
    Status {
        /// Endpoint that was queried
        endpoint: Endpoint,
        /// Symbol that was queried
        symbol: String,
        /// Status code returned by the API
        status: u16,
    },

    /// The response body was not the expected JSON shape.
    #[error("Could not parse {endpoint} response for {symbol}: {source}")]
    Decode {
        /// Endpoint that was queried
        endpoint: Endpoint,
        /// Symbol that was queried
        symbol: String,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Missing data
    #[error("Missing data for {symbol}: {reason}")]
    MissingData {
        /// Symbol that was queried
        symbol: String,
        /// Reason for missing data
        reason: String,
    },

    /// Invalid symbol
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    /// Invalid client configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<reqwest::Error> for DataError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.without_url())
    }
}

impl DataError {
    /// Returns the HTTP status code when the API rejected the request.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the API simply had nothing for the symbol.
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::MissingData { .. } | Self::Status { status: 404, .. }
        )
    }
}
