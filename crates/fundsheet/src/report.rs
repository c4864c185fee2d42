//! Report pipeline: fetch each symbol, then write one row per success.

use crate::config::{FailurePolicy, ReportConfig};
use crate::error::{ReportError, Result};
use fundsheet_data::{DataError, Evaluation, FmpClient};
use fundsheet_output::{EvaluationTable, Exporter, SkippedSymbol};
use std::future::Future;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Anything that can produce an [`Evaluation`] for a symbol.
pub trait EvaluationSource {
    /// Fetch and merge `periods` periods for `symbol`.
    fn fetch_evaluation(
        &self,
        symbol: &str,
        periods: u32,
    ) -> impl Future<Output = fundsheet_data::Result<Evaluation>>;
}

impl EvaluationSource for FmpClient {
    fn fetch_evaluation(
        &self,
        symbol: &str,
        periods: u32,
    ) -> impl Future<Output = fundsheet_data::Result<Evaluation>> {
        Self::fetch_evaluation(self, symbol, periods)
    }
}

/// Per-symbol outcome reported while collecting.
#[derive(Debug, Clone, Copy)]
pub enum Progress<'a> {
    /// Collection starts with this many symbols after normalizing.
    Started(usize),
    /// A request for this symbol is about to start.
    Fetching(&'a str),
    /// The symbol produced a row.
    Gathered(&'a Evaluation),
    /// The symbol was left out.
    Skipped(&'a str, &'a DataError),
}

/// Outcome of collecting a symbol list.
#[derive(Debug, Default)]
pub struct Collected {
    /// One evaluation per gathered symbol, in input order.
    pub evaluations: Vec<Evaluation>,
    /// Symbols left out, with the failure that excluded them.
    pub skipped: Vec<(String, DataError)>,
}

impl Collected {
    /// Skipped symbols with readable reasons.
    pub fn skipped_symbols(&self) -> Vec<SkippedSymbol> {
        self.skipped
            .iter()
            .map(|(symbol, err)| SkippedSymbol::new(symbol.clone(), err.to_string()))
            .collect()
    }
}

/// Runs the fetch and write steps for one configuration.
#[derive(Debug, Clone)]
pub struct Report {
    config: ReportConfig,
}

impl Report {
    /// Create a report for `config`.
    pub const fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub const fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Fetch every symbol from `source`, one after another.
    ///
    /// Symbols are trimmed and upper-cased; blank entries are dropped.
    /// `progress` sees every step.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::NoSymbols`] if nothing is left to fetch, or the
    /// first fetch failure under [`FailurePolicy::Abort`].
    pub async fn collect<S, F>(
        &self,
        symbols: &[impl AsRef<str>],
        source: &S,
        mut progress: F,
    ) -> Result<Collected>
    where
        S: EvaluationSource,
        F: FnMut(Progress<'_>),
    {
        let symbols = normalize_symbols(symbols);
        if symbols.is_empty() {
            return Err(ReportError::NoSymbols);
        }

        let periods = self.config.periods();
        let mut collected = Collected::default();
        progress(Progress::Started(symbols.len()));

        for symbol in &symbols {
            progress(Progress::Fetching(symbol));
            match source.fetch_evaluation(symbol, periods).await {
                Ok(evaluation) => {
                    info!(symbol = %symbol, date = %evaluation.date, "financials gathered");
                    progress(Progress::Gathered(&evaluation));
                    collected.evaluations.push(evaluation);
                }
                Err(e) => {
                    if self.config.failure_policy == FailurePolicy::Abort {
                        return Err(e.into());
                    }
                    warn!(symbol = %symbol, error = %e, "financials not found, skipping");
                    progress(Progress::Skipped(symbol, &e));
                    collected.skipped.push((symbol.clone(), e));
                }
            }
        }

        debug!(
            gathered = collected.evaluations.len(),
            skipped = collected.skipped.len(),
            "collection finished"
        );
        Ok(collected)
    }

    /// Write `evaluations` in the configured format, replacing the output file.
    ///
    /// Returns the path written.
    ///
    /// # Errors
    ///
    /// Returns an error if the artifact cannot be built or saved.
    pub fn write(&self, evaluations: &[Evaluation]) -> Result<PathBuf> {
        let path = self.config.output_path();
        EvaluationTable::new(evaluations)
            .with_workbook(self.config.workbook_writer())
            .export_to_file(&path, self.config.format)?;
        info!(path = %path.display(), rows = evaluations.len(), "data stored");
        Ok(path)
    }
}

/// Fetch `symbols` from FMP and write the result.
///
/// # Errors
///
/// Returns an error if the client cannot be built, the symbol list is empty,
/// a fetch fails under [`FailurePolicy::Abort`], or the output cannot be
/// written.
pub async fn run_report(
    config: &ReportConfig,
    symbols: &[impl AsRef<str>],
) -> Result<(Collected, PathBuf)> {
    if config.uses_placeholder_key() {
        warn!("no API key configured; FMP will reject requests");
    }
    let client = config.client()?;
    let report = Report::new(config.clone());
    let collected = report.collect(symbols, &client, |_| {}).await?;
    let path = report.write(&collected.evaluations)?;
    Ok((collected, path))
}

fn normalize_symbols(symbols: &[impl AsRef<str>]) -> Vec<String> {
    symbols
        .iter()
        .filter_map(|s| {
            let symbol = s.as_ref().trim();
            if symbol.is_empty() {
                warn!("skipping blank symbol");
                None
            } else {
                Some(symbol.to_ascii_uppercase())
            }
        })
        .collect()
}
