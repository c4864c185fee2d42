//! fundsheet CLI binary.
//!
//! Fetches FMP fundamentals for the given symbols and writes one spreadsheet
//! row per symbol.

use clap::{ArgAction, Parser, ValueEnum};
use fundsheet::{FailurePolicy, Progress, Report, ReportConfig};
use fundsheet_data::fmp::{DEFAULT_BASE_URL, DEFAULT_PERIODS};
use fundsheet_output::{ExportFormat, RatioMode, RunSummary, SheetNaming};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::process;
use std::time::Duration;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "fundsheet")]
#[command(about = "Collect FMP fundamentals and P/E ratios into a spreadsheet", long_about = None)]
#[command(version)]
struct Cli {
    /// Stock symbols to fetch
    #[arg(required = true)]
    symbols: Vec<String>,

    /// FMP API key
    #[arg(long, env = "FMP_API_KEY", default_value = fundsheet::PLACEHOLDER_API_KEY, hide_env_values = true)]
    api_key: String,

    /// Periods per endpoint (current plus prior)
    #[arg(long, default_value_t = DEFAULT_PERIODS)]
    periods: u32,

    /// Output file
    #[arg(short, long, default_value = fundsheet::DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = FormatArg::Xlsx)]
    format: FormatArg,

    /// Worksheet naming scheme
    #[arg(long, value_enum, default_value_t = SheetNameArg::MonthYear)]
    sheet_name: SheetNameArg,

    /// Write P/E cells as spreadsheet formulas
    #[arg(long)]
    formulas: bool,

    /// Stop at the first symbol that cannot be fetched
    #[arg(long)]
    fail_fast: bool,

    /// API base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout: u64,

    /// Hide the progress bar
    #[arg(long)]
    no_progress: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum FormatArg {
    Xlsx,
    Csv,
    Json,
    PrettyJson,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Xlsx => Self::Xlsx,
            FormatArg::Csv => Self::Csv,
            FormatArg::Json => Self::Json,
            FormatArg::PrettyJson => Self::PrettyJson,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum SheetNameArg {
    MonthYear,
    ReportDate,
}

impl From<SheetNameArg> for SheetNaming {
    fn from(arg: SheetNameArg) -> Self {
        match arg {
            SheetNameArg::MonthYear => Self::MonthYear,
            SheetNameArg::ReportDate => Self::ReportDate,
        }
    }
}

impl Cli {
    fn report_config(&self) -> ReportConfig {
        ReportConfig {
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            periods: self.periods,
            timeout_secs: self.timeout,
            output: self.output.clone(),
            format: self.format.into(),
            sheet_naming: self.sheet_name.into(),
            ratio_mode: if self.formulas {
                RatioMode::Formula
            } else {
                RatioMode::Value
            },
            failure_policy: if self.fail_fast {
                FailurePolicy::Abort
            } else {
                FailurePolicy::SkipSymbol
            },
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.report_config();
    if config.uses_placeholder_key() {
        warn!("no API key given; pass --api-key or set FMP_API_KEY");
    }

    let client = config.client()?;
    let report = Report::new(config);

    let pb = if cli.no_progress {
        ProgressBar::hidden()
    } else {
        // Sized once collection reports how many symbols survive normalizing.
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("█▓░"),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    };

    let collected = report
        .collect(&cli.symbols, &client, |progress| match progress {
            Progress::Started(total) => pb.set_length(total as u64),
            Progress::Fetching(symbol) => pb.set_message(format!("Fetching {}...", symbol)),
            Progress::Gathered(evaluation) => {
                say(&pb, format!("Financials gathered for : {}", evaluation.symbol));
                pb.inc(1);
            }
            Progress::Skipped(symbol, _) => {
                say(&pb, format!("financials not found for : {}", symbol));
                pb.inc(1);
            }
        })
        .await;

    let collected = match collected {
        Ok(c) => {
            pb.finish_and_clear();
            c
        }
        Err(e) => {
            pb.finish_with_message("Failed!");
            return Err(e.into());
        }
    };

    let path = report.write(&collected.evaluations)?;

    let skipped = collected.skipped_symbols();
    let summary = RunSummary::new(
        &collected.evaluations,
        &skipped,
        path.display().to_string(),
    );
    println!();
    print!("{}", summary);

    Ok(())
}

/// Print above the progress bar, or straight to stdout when it is hidden.
fn say(pb: &ProgressBar, line: String) {
    if pb.is_hidden() {
        println!("{}", line);
    } else {
        pb.println(line);
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["fundsheet", "--api-key", "k", "AAPL", "MSFT"]).unwrap();
        assert_eq!(cli.symbols, vec!["AAPL", "MSFT"]);

        let config = cli.report_config();
        assert_eq!(config.api_key, "k");
        assert_eq!(config.periods, 2);
        assert_eq!(config.output, PathBuf::from("finances.xlsx"));
        assert_eq!(config.format, ExportFormat::Xlsx);
        assert_eq!(config.sheet_naming, SheetNaming::MonthYear);
        assert_eq!(config.ratio_mode, RatioMode::Value);
        assert_eq!(config.failure_policy, FailurePolicy::SkipSymbol);
    }

    #[test]
    fn test_flags_map_to_config() {
        let cli = Cli::try_parse_from([
            "fundsheet",
            "--api-key",
            "k",
            "--format",
            "pretty-json",
            "--sheet-name",
            "report-date",
            "--formulas",
            "--fail-fast",
            "--periods",
            "4",
            "-vv",
            "AAPL",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);

        let config = cli.report_config();
        assert_eq!(config.format, ExportFormat::PrettyJson);
        assert_eq!(config.sheet_naming, SheetNaming::ReportDate);
        assert_eq!(config.ratio_mode, RatioMode::Formula);
        assert_eq!(config.failure_policy, FailurePolicy::Abort);
        assert_eq!(config.periods, 4);
    }

    #[test]
    fn test_symbols_required() {
        assert!(Cli::try_parse_from(["fundsheet", "--api-key", "k"]).is_err());
    }
}
