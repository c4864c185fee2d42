//! Export functionality for evaluation tables.
//!
//! The workbook is the primary artifact; CSV and JSON carry the same rows for
//! scripting. CSV reuses the workbook's header and cells, JSON keeps every
//! fetched field plus the derived ratios.

use crate::error::{OutputError, Result};
use crate::layout::{header, rows};
use crate::ratio::{current_pe, prior_pe};
use crate::workbook::WorkbookWriter;
use fundsheet_data::Evaluation;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Export format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportFormat {
    /// Excel workbook.
    #[default]
    Xlsx,

    /// Comma-separated values format.
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }

    /// Whether the format is plain text.
    pub const fn is_text(&self) -> bool {
        !matches!(self, Self::Xlsx)
    }
}

/// Evaluation with its derived ratios, as written to JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvaluationRecord {
    /// Fetched snapshot.
    #[serde(flatten)]
    pub evaluation: Evaluation,

    /// Current price / EPS.
    pub pe_ratio: Option<f64>,

    /// Prior price / prior EPS.
    pub prior_pe_ratio: Option<f64>,
}

impl From<&Evaluation> for EvaluationRecord {
    fn from(evaluation: &Evaluation) -> Self {
        Self {
            pe_ratio: current_pe(evaluation),
            prior_pe_ratio: prior_pe(evaluation),
            evaluation: evaluation.clone(),
        }
    }
}

/// Trait for exporting data in various formats.
pub trait Exporter {
    /// Export data to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the format is binary.
    fn export_to_string(&self, format: ExportFormat) -> Result<String>;

    /// Export data to a file in the specified format, replacing the file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<()> {
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

/// The evaluations of one run, ready to export.
#[derive(Debug, Clone)]
pub struct EvaluationTable<'a> {
    evaluations: &'a [Evaluation],
    workbook: WorkbookWriter,
}

impl<'a> EvaluationTable<'a> {
    /// Create a table with a default workbook writer.
    pub fn new(evaluations: &'a [Evaluation]) -> Self {
        Self {
            evaluations,
            workbook: WorkbookWriter::new(),
        }
    }

    /// Use a configured workbook writer for `.xlsx` output.
    pub fn with_workbook(mut self, workbook: WorkbookWriter) -> Self {
        self.workbook = workbook;
        self
    }

    /// Number of data rows.
    pub const fn len(&self) -> usize {
        self.evaluations.len()
    }

    /// Whether the table has no data rows.
    pub const fn is_empty(&self) -> bool {
        self.evaluations.is_empty()
    }

    /// Rows with derived ratios.
    pub fn records(&self) -> Vec<EvaluationRecord> {
        self.evaluations.iter().map(EvaluationRecord::from).collect()
    }

    fn to_csv(&self) -> Result<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        wtr.write_record(header())?;
        for row in rows(self.evaluations) {
            wtr.write_record(row.iter().map(|cell| cell.to_field()))?;
        }
        let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
        String::from_utf8(bytes)
            .map_err(|e| OutputError::InvalidFormat(format!("CSV output is not UTF-8: {}", e)))
    }
}

impl Exporter for EvaluationTable<'_> {
    fn export_to_string(&self, format: ExportFormat) -> Result<String> {
        match format {
            ExportFormat::Xlsx => Err(OutputError::InvalidFormat(
                "xlsx is a binary format; write it to a file".to_string(),
            )),
            ExportFormat::Csv => self.to_csv(),
            ExportFormat::Json => Ok(serde_json::to_string(&self.records())?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(&self.records())?),
        }
    }

    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<()> {
        if format == ExportFormat::Xlsx {
            self.workbook.write(path, self.evaluations)?;
            return Ok(());
        }
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}
