use rust_xlsxwriter::Workbook;
use std::io::Write;
use std::path::Path;

use super::rows::{ExportCell, VacancyExportRow, SPREADSHEET_COLUMNS};
use super::ExportError;

pub const SHEET_NAME: &str = "Vacancies";

/// Single-sheet workbook: header row, then one row per vacancy.
pub fn write_xlsx(rows: &[VacancyExportRow], path: &Path) -> Result<(), ExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (column, header) in (0u16..).zip(SPREADSHEET_COLUMNS) {
        worksheet.write_string(0, column, header)?;
    }

    for (row_index, row) in (1u32..).zip(rows) {
        for (column, (_, cell)) in (0u16..).zip(row.cells()) {
            match cell {
                ExportCell::Text(text) => {
                    worksheet.write_string(row_index, column, text)?;
                }
                ExportCell::Number(number) => {
                    worksheet.write_number(row_index, column, number)?;
                }
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}

/// Same schema as the workbook, as comma-separated text.
pub fn write_csv<W: Write>(rows: &[VacancyExportRow], writer: W) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_writer(writer);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
