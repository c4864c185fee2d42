//! Terminal summary of a run.

use crate::ratio::{current_pe, prior_pe};
use fundsheet_data::Evaluation;
use std::fmt;

/// A symbol that produced no row, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedSymbol {
    /// Requested symbol.
    pub symbol: String,
    /// Human-readable reason.
    pub reason: String,
}

impl SkippedSymbol {
    /// Create a new skipped entry.
    pub fn new(symbol: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            reason: reason.into(),
        }
    }
}

/// What a run gathered and where it went.
#[derive(Debug, Clone)]
pub struct RunSummary<'a> {
    /// Rows written.
    pub evaluations: &'a [Evaluation],
    /// Symbols left out.
    pub skipped: &'a [SkippedSymbol],
    /// Output location.
    pub destination: String,
}

impl<'a> RunSummary<'a> {
    /// Create a new summary.
    pub fn new(
        evaluations: &'a [Evaluation],
        skipped: &'a [SkippedSymbol],
        destination: impl Into<String>,
    ) -> Self {
        Self {
            evaluations,
            skipped,
            destination: destination.into(),
        }
    }

    /// Format as ASCII table for terminal display.
    pub fn to_ascii_table(&self) -> String {
        let mut output = String::new();

        output.push_str(&"=".repeat(72));
        output.push('\n');
        output.push_str(&format!(
            "{:<10} {:>12} {:>10} {:>10} {:>12} {:>12}\n",
            "Symbol", "Price", "EPS", "P/E", "Prior EPS", "Prior P/E"
        ));
        output.push_str(&"-".repeat(72));
        output.push('\n');

        for eval in self.evaluations {
            output.push_str(&format!(
                "{:<10} {:>12.2} {:>10.2} {:>10} {:>12} {:>12}\n",
                eval.symbol,
                eval.market.stock_price,
                eval.income.eps,
                fmt_opt(current_pe(eval)),
                fmt_opt(eval.prior_eps),
                fmt_opt(prior_pe(eval)),
            ));
        }

        if !self.skipped.is_empty() {
            output.push_str(&"-".repeat(72));
            output.push('\n');
            for skipped in self.skipped {
                output.push_str(&format!(
                    "financials not found for : {} ({})\n",
                    skipped.symbol, skipped.reason
                ));
            }
        }

        output.push_str(&"=".repeat(72));
        output.push('\n');
        output.push_str(&format!(
            "{} gathered, {} skipped. Data stored in : {}\n",
            self.evaluations.len(),
            self.skipped.len(),
            self.destination
        ));

        output
    }
}

impl fmt::Display for RunSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_ascii_table())
    }
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.2}", v))
}
