//! Financial Modeling Prep (FMP) data fetching.
//!
//! Two endpoints are used per symbol:
//! - `enterprise-values`: share price, share count, market capitalization
//! - `income-statement`: revenue, net income, EPS and the rest of the statement
//!
//! # Example
//!
//! ```no_run
//! use fundsheet_data::fmp::{FmpClient, DEFAULT_PERIODS};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FmpClient::new("my-api-key")?;
//!     let evaluation = client.fetch_evaluation("AAPL", DEFAULT_PERIODS).await?;
//!     println!("{} EPS: {}", evaluation.symbol, evaluation.income.eps);
//!     Ok(())
//! }
//! ```

pub mod client;
mod de;
pub mod wire;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use client::{DEFAULT_BASE_URL, DEFAULT_PERIODS, DEFAULT_TIMEOUT, FmpClient, FmpClientBuilder};
pub use wire::{EnterpriseValueEntry, IncomeStatementEntry};

/// Data category queried from the API; displays as its URL path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Endpoint {
    /// Income statement periods
    IncomeStatement,
    /// Enterprise value periods
    EnterpriseValues,
}

impl Endpoint {
    /// URL path segment relative to the API base.
    pub const fn path(&self) -> &'static str {
        match self {
            Self::IncomeStatement => "income-statement",
            Self::EnterpriseValues => "enterprise-values",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
