//! Spreadsheet export of the fetched patient list.
//!
//! Rows are filtered by an inclusive created-date range and written to an xlsx workbook
//! with a single `Patients` worksheet and a fixed set of columns.

use api_shared::PatientDto;
use chrono::{DateTime, NaiveDate, Utc};
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use std::path::Path;

pub const DEFAULT_EXPORT_FILE: &str = "PatientsData.xlsx";
pub const SHEET_NAME: &str = "Patients";
pub const HEADERS: [&str; 5] = ["FirstName", "LastName", "Email", "DateOfBirth", "CreatedDate"];

const DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("start date {start} is after end date {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
    #[error("failed to write workbook: {0}")]
    Xlsx(#[from] XlsxError),
}

/// Inclusive range of calendar days. Either bound may be open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Self, ExportError> {
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(ExportError::InvalidRange { start, end });
            }
        }
        Ok(Self { start, end })
    }

    /// A patient without a created date only passes an unbounded range.
    pub fn contains(&self, created: Option<DateTime<Utc>>) -> bool {
        let Some(created) = created else {
            return self.start.is_none() && self.end.is_none();
        };
        let day = created.date_naive();
        self.start.map_or(true, |start| day >= start) && self.end.map_or(true, |end| day <= end)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportRow {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: String,
    pub created_date: String,
}

impl ExportRow {
    /// Cell values in [`HEADERS`] order.
    pub fn cells(&self) -> [&str; 5] {
        [
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.date_of_birth,
            &self.created_date,
        ]
    }
}

impl From<&PatientDto> for ExportRow {
    fn from(p: &PatientDto) -> Self {
        Self {
            first_name: p.first_name.clone(),
            last_name: p.last_name.clone(),
            email: p.email.clone(),
            date_of_birth: p.date_of_birth.format(DATE_FORMAT).to_string(),
            created_date: p
                .created_date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
        }
    }
}

pub fn export_rows(patients: &[PatientDto], range: &DateRange) -> Vec<ExportRow> {
    patients
        .iter()
        .filter(|p| range.contains(p.created_date))
        .map(ExportRow::from)
        .collect()
}

/// Builds the workbook: a bold header row, then one row per patient.
pub fn build_workbook(rows: &[ExportRow]) -> Result<Workbook, ExportError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let worksheet = workbook.add_worksheet().set_name(SHEET_NAME)?;

    for (col, header) in (0u16..).zip(HEADERS) {
        worksheet.write_string_with_format(0, col, header, &bold)?;
    }
    for (row, record) in (1u32..).zip(rows) {
        for (col, value) in (0u16..).zip(record.cells()) {
            worksheet.write_string(row, col, value)?;
        }
    }

    Ok(workbook)
}

/// Filters, projects and writes the export file. Returns the number of rows written.
pub fn export_to_path(
    patients: &[PatientDto],
    range: &DateRange,
    path: &Path,
) -> Result<usize, ExportError> {
    let rows = export_rows(patients, range);
    let mut workbook = build_workbook(&rows)?;
    workbook.save(path)?;
    tracing::info!("exported {} patients to {}", rows.len(), path.display());
    Ok(rows.len())
}
