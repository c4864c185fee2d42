//! Single-sheet `.xlsx` workbook writer.
//!
//! Every write builds a fresh workbook and replaces the target file; earlier
//! runs are never appended to.

use crate::error::Result;
use crate::layout::{CellValue, Column, header};
use crate::ratio::RatioMode;
use chrono::{Local, NaiveDate};
use fundsheet_data::Evaluation;
use rust_xlsxwriter::{Format, Formula, Workbook};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

/// Longest sheet name Excel accepts.
const MAX_SHEET_NAME: usize = 31;

/// How the single worksheet is named.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SheetNaming {
    /// Month and year of the run, e.g. `October2026`.
    #[default]
    MonthYear,
    /// Report date of the first evaluation, e.g. `2024-09-28`.
    ReportDate,
}

/// Builds and saves evaluation workbooks.
#[derive(Debug, Clone)]
pub struct WorkbookWriter {
    sheet_naming: SheetNaming,
    ratio_mode: RatioMode,
    as_of: NaiveDate,
}

impl WorkbookWriter {
    /// Writer dated today with default naming and precomputed ratios.
    pub fn new() -> Self {
        Self {
            sheet_naming: SheetNaming::default(),
            ratio_mode: RatioMode::default(),
            as_of: Local::now().date_naive(),
        }
    }

    /// Set the sheet naming scheme.
    pub const fn with_sheet_naming(mut self, sheet_naming: SheetNaming) -> Self {
        self.sheet_naming = sheet_naming;
        self
    }

    /// Set how ratio cells are written.
    pub const fn with_ratio_mode(mut self, ratio_mode: RatioMode) -> Self {
        self.ratio_mode = ratio_mode;
        self
    }

    /// Set the run date used for month-year sheet names.
    pub const fn as_of(mut self, date: NaiveDate) -> Self {
        self.as_of = date;
        self
    }

    /// Name of the worksheet for these evaluations.
    pub fn sheet_name(&self, evaluations: &[Evaluation]) -> String {
        let month_year = || self.as_of.format("%B%Y").to_string();
        let raw = match self.sheet_naming {
            SheetNaming::MonthYear => month_year(),
            SheetNaming::ReportDate => evaluations
                .iter()
                .map(|e| e.date.trim())
                .find(|d| !d.is_empty())
                .map_or_else(month_year, str::to_string),
        };
        sanitize_sheet_name(&raw)
    }

    /// Build the workbook in memory.
    pub fn build(&self, evaluations: &[Evaluation]) -> Result<Workbook> {
        let mut workbook = Workbook::new();
        let sheet_name = self.sheet_name(evaluations);
        let bold = Format::new().set_bold();

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet_name)?;

        for (col, label) in header().into_iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, label, &bold)?;
        }

        for (i, evaluation) in evaluations.iter().enumerate() {
            let row = i as u32 + 1;
            for (c, column) in Column::ALL.iter().enumerate() {
                let col = c as u16;
                let value = column.cell(evaluation);

                if self.ratio_mode == RatioMode::Formula
                    && let Some(expr) = column.formula(row)
                {
                    // Undefined ratios cache as blank, not the writer's default 0.
                    let cached = value.as_f64().map(|v| v.to_string()).unwrap_or_default();
                    let formula = Formula::new(expr).set_result(cached);
                    worksheet.write_formula(row, col, formula)?;
                    continue;
                }

                match value {
                    CellValue::Text(s) => {
                        worksheet.write_string(row, col, s)?;
                    }
                    CellValue::Number(n) => {
                        worksheet.write_number(row, col, n)?;
                    }
                    CellValue::Integer(n) => {
                        worksheet.write_number(row, col, n as f64)?;
                    }
                    CellValue::Empty => {}
                }
            }
        }

        worksheet.autofit();
        debug!(sheet = %sheet_name, rows = evaluations.len(), "built workbook");

        Ok(workbook)
    }

    /// Serialize the workbook to `.xlsx` bytes.
    pub fn to_buffer(&self, evaluations: &[Evaluation]) -> Result<Vec<u8>> {
        let mut workbook = self.build(evaluations)?;
        Ok(workbook.save_to_buffer()?)
    }

    /// Write the workbook to `path`, replacing any existing file.
    ///
    /// Returns the worksheet name.
    pub fn write(&self, path: &Path, evaluations: &[Evaluation]) -> Result<String> {
        if path.exists() {
            warn!(path = %path.display(), "output file already exists, replacing it");
        }
        let mut workbook = self.build(evaluations)?;
        workbook.save(path)?;
        Ok(self.sheet_name(evaluations))
    }
}

impl Default for WorkbookWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Make `raw` acceptable as an Excel worksheet name.
///
/// Replaces `[ ] : * ? / \` with `-`, strips surrounding apostrophes and
/// truncates to 31 characters. An empty result becomes `Sheet1`.
pub fn sanitize_sheet_name(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '-',
            other => other,
        })
        .collect();
    let truncated: String = cleaned
        .trim()
        .trim_matches('\'')
        .chars()
        .take(MAX_SHEET_NAME)
        .collect();
    let trimmed = truncated.trim_end_matches('\'').trim_end();

    if trimmed.is_empty() {
        "Sheet1".to_string()
    } else {
        trimmed.to_string()
    }
}
