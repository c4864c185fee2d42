//! Run configuration.

use fundsheet_data::fmp::{DEFAULT_BASE_URL, DEFAULT_PERIODS, DEFAULT_TIMEOUT};
use fundsheet_data::FmpClient;
use fundsheet_output::{ExportFormat, RatioMode, SheetNaming, WorkbookWriter};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// API key used when none is configured. Requests made with it are rejected.
pub const PLACEHOLDER_API_KEY: &str = "enterApiKey";

/// Default output file.
pub const DEFAULT_OUTPUT: &str = "finances.xlsx";

/// What to do when a symbol cannot be fetched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Log the failure, leave the symbol out and keep going.
    #[default]
    SkipSymbol,
    /// Stop the run with the first failure.
    Abort,
}

/// Configuration for one report run.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// FMP API key.
    pub api_key: String,
    /// API base URL.
    pub base_url: String,
    /// Periods requested per endpoint (current plus prior).
    pub periods: u32,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Output file.
    pub output: PathBuf,
    /// Output format.
    pub format: ExportFormat,
    /// Worksheet naming scheme.
    pub sheet_naming: SheetNaming,
    /// How ratio cells are written.
    pub ratio_mode: RatioMode,
    /// Failure handling.
    pub failure_policy: FailurePolicy,
}

impl ReportConfig {
    /// Whether the placeholder key is still in use.
    pub fn uses_placeholder_key(&self) -> bool {
        self.api_key.trim().is_empty() || self.api_key == PLACEHOLDER_API_KEY
    }

    /// Periods to request, never less than one.
    pub fn periods(&self) -> u32 {
        self.periods.max(1)
    }

    /// Per-request timeout.
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Where the artifact is written.
    ///
    /// The default file name follows the chosen format's extension; an
    /// explicit path is used as given.
    pub fn output_path(&self) -> PathBuf {
        if self.output == Path::new(DEFAULT_OUTPUT) {
            self.output.with_extension(self.format.extension())
        } else {
            self.output.clone()
        }
    }

    /// Build the FMP client for this configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot
    /// be built.
    pub fn client(&self) -> fundsheet_data::Result<FmpClient> {
        FmpClient::builder(self.api_key.clone())
            .base_url(self.base_url.clone())
            .timeout(self.timeout())
            .build()
    }

    /// Workbook writer for this configuration, dated today.
    pub fn workbook_writer(&self) -> WorkbookWriter {
        WorkbookWriter::new()
            .with_sheet_naming(self.sheet_naming)
            .with_ratio_mode(self.ratio_mode)
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            api_key: PLACEHOLDER_API_KEY.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            periods: DEFAULT_PERIODS,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            format: ExportFormat::default(),
            sheet_naming: SheetNaming::default(),
            ratio_mode: RatioMode::default(),
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl fmt::Debug for ReportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("periods", &self.periods)
            .field("timeout_secs", &self.timeout_secs)
            .field("output", &self.output)
            .field("format", &self.format)
            .field("sheet_naming", &self.sheet_naming)
            .field("ratio_mode", &self.ratio_mode)
            .field("failure_policy", &self.failure_policy)
            .finish()
    }
}
