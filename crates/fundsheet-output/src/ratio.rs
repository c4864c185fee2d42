//! Price-to-earnings ratio.
//!
//! Earnings per share can be zero (break-even year) or absent (no prior
//! period). Both leave the ratio undefined rather than infinite.

use fundsheet_data::Evaluation;
use serde::{Deserialize, Serialize};

/// How ratio cells are emitted in a workbook.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RatioMode {
    /// Precomputed number; undefined ratios leave the cell empty.
    #[default]
    Value,
    /// Spreadsheet formula over the row's price and EPS cells.
    Formula,
}

/// Price divided by earnings per share.
///
/// Returns `None` when EPS is zero or either input (or the quotient) is not
/// finite. Negative EPS gives a negative ratio.
pub fn price_to_earnings(price: f64, eps: f64) -> Option<f64> {
    if eps == 0.0 || !eps.is_finite() || !price.is_finite() {
        return None;
    }
    let ratio = price / eps;
    ratio.is_finite().then_some(ratio)
}

/// P/E for the evaluation's current period.
pub fn current_pe(evaluation: &Evaluation) -> Option<f64> {
    price_to_earnings(evaluation.market.stock_price, evaluation.income.eps)
}

/// P/E for the period before, when both prior figures are known.
pub fn prior_pe(evaluation: &Evaluation) -> Option<f64> {
    match (evaluation.prior_stock_price, evaluation.prior_eps) {
        (Some(price), Some(eps)) => price_to_earnings(price, eps),
        _ => None,
    }
}
