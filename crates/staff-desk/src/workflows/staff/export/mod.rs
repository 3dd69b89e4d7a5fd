//! Vacancy exports for the expanded staff row: spreadsheet rows keep raw
//! numbers, the printable document rounds percentages for display.

pub mod document;
pub mod rows;
pub mod spreadsheet;

use std::fmt;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::info;

use super::domain::{StaffRecord, VacancyRecord};

pub use document::write_pdf;
pub use rows::{
    format_percentage, to_document_table, to_spreadsheet_rows, DocumentTable, ExportCell,
    VacancyExportRow, DOCUMENT_HEADERS, SPREADSHEET_COLUMNS,
};
pub use spreadsheet::{write_csv, write_xlsx, SHEET_NAME};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Xlsx,
    Csv,
    Pdf,
}

impl ExportFormat {
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
            Self::Pdf => "pdf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "xlsx" | "excel" => Ok(Self::Xlsx),
            "csv" => Ok(Self::Csv),
            "pdf" => Ok(Self::Pdf),
            other => Err(format!("unsupported export format '{other}' (xlsx, csv, pdf)")),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("no vacancies to export for this staff member")]
    NothingToExport,
    #[error("failed to write export file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to build spreadsheet: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error("failed to write csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to build pdf: {0}")]
    Pdf(#[from] printpdf::Error),
}

/// The joined vacancy subset of one staff member, ready to be written.
#[derive(Debug, Clone)]
pub struct VacancyExport<'a> {
    staff: &'a StaffRecord,
    vacancies: Vec<&'a VacancyRecord>,
}

impl<'a> VacancyExport<'a> {
    pub fn new(staff: &'a StaffRecord, vacancies: Vec<&'a VacancyRecord>) -> Self {
        Self { staff, vacancies }
    }

    /// `{employee_code}-vacancies`, safe to use as a single file name.
    pub fn file_stem(&self) -> String {
        let code = sanitize_file_component(self.staff.employee_code());
        if code.is_empty() {
            format!("staff-{}-vacancies", self.staff.id)
        } else {
            format!("{code}-vacancies")
        }
    }

    pub fn title(&self) -> String {
        let first = self.staff.first_name.as_deref().unwrap_or_default();
        let last = self.staff.last_name.as_deref().unwrap_or_default();
        format!("{first} {last} - Vacancies")
    }

    pub fn spreadsheet_rows(&self) -> Vec<VacancyExportRow> {
        to_spreadsheet_rows(self.vacancies.iter().copied())
    }

    pub fn document_table(&self) -> DocumentTable {
        to_document_table(self.vacancies.iter().copied())
    }

    /// Write `{stem}.{ext}` into `dir` and return the path.
    pub fn write(&self, format: ExportFormat, dir: &Path) -> Result<PathBuf, ExportError> {
        if self.vacancies.is_empty() {
            return Err(ExportError::NothingToExport);
        }

        let path = dir.join(format!("{}.{}", self.file_stem(), format.extension()));
        match format {
            ExportFormat::Xlsx => write_xlsx(&self.spreadsheet_rows(), &path)?,
            ExportFormat::Csv => {
                let file = File::create(&path)?;
                write_csv(&self.spreadsheet_rows(), BufWriter::new(file))?;
            }
            ExportFormat::Pdf => write_pdf(&self.title(), &self.document_table(), &path)?,
        }

        info!(
            staff_id = %self.staff.id,
            rows = self.vacancies.len(),
            %format,
            path = %path.display(),
            "vacancy export written"
        );
        Ok(path)
    }
}

/// Replace separators and characters that are invalid in file names, and
/// strip leading dots so the stem can never name a parent or hidden entry.
fn sanitize_file_component(raw: &str) -> String {
    let replaced: String = raw
        .trim()
        .chars()
        .map(|ch| match ch {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            ch if ch.is_control() || ch.is_whitespace() => '-',
            ch => ch,
        })
        .collect();
    replaced.trim_start_matches('.').to_string()
}
