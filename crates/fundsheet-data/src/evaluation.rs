//! Merged company snapshot built from both FMP endpoints.

use crate::error::{DataError, Result};
use crate::fmp::wire::{EnterpriseValueEntry, IncomeStatementEntry};
use serde::{Deserialize, Serialize};

/// One company's financial snapshot for its latest reported period.
///
/// Market fields come from the enterprise-values endpoint and statement
/// fields from the income-statement endpoint. The prior-period fields are
/// only filled when the API returned a second period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Stock symbol
    pub symbol: String,
    /// Report date of the current period
    pub date: String,
    /// Market data for the current period
    pub market: EnterpriseValueEntry,
    /// Income statement for the current period
    pub income: IncomeStatementEntry,
    /// Share price one period earlier
    pub prior_stock_price: Option<f64>,
    /// Basic EPS one period earlier
    pub prior_eps: Option<f64>,
}

impl Evaluation {
    /// Merge the current (and optionally prior) period of each endpoint.
    ///
    /// Identity fields prefer the income statement, falling back to the
    /// enterprise-values entry when the statement leaves them empty.
    pub fn merge(
        market: EnterpriseValueEntry,
        income: IncomeStatementEntry,
        prior_market: Option<&EnterpriseValueEntry>,
        prior_income: Option<&IncomeStatementEntry>,
    ) -> Self {
        let symbol = first_non_empty(&income.symbol, &market.symbol).to_string();
        let date = first_non_empty(&income.date, &market.date).to_string();

        Self {
            symbol,
            date,
            prior_stock_price: prior_market.map(|m| m.stock_price),
            prior_eps: prior_income.map(|i| i.eps),
            market,
            income,
        }
    }

    /// Build an evaluation from endpoint responses ordered newest first.
    ///
    /// # Errors
    /// `DataError::MissingData` if either endpoint returned no periods or the
    /// merged record carries no symbol.
    pub fn from_periods(
        symbol: &str,
        values: &[EnterpriseValueEntry],
        statements: &[IncomeStatementEntry],
    ) -> Result<Self> {
        let (Some(market), Some(income)) = (values.first(), statements.first()) else {
            return Err(not_found(symbol));
        };

        let evaluation = Self::merge(
            market.clone(),
            income.clone(),
            values.get(1),
            statements.get(1),
        );

        if evaluation.symbol.is_empty() {
            return Err(not_found(symbol));
        }

        Ok(evaluation)
    }

    /// Whether any prior-period figure is available.
    pub const fn has_prior(&self) -> bool {
        self.prior_stock_price.is_some() || self.prior_eps.is_some()
    }
}

fn first_non_empty<'a>(preferred: &'a str, fallback: &'a str) -> &'a str {
    if preferred.is_empty() {
        fallback
    } else {
        preferred
    }
}

fn not_found(symbol: &str) -> DataError {
    DataError::MissingData {
        symbol: symbol.to_string(),
        reason: "financials not found".to_string(),
    }
}
