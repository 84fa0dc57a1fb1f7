use crate::models::Season;
use crate::utils::presenter::{ScheduleRow, COLUMNS};
use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use std::io::Write;

pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const SHEET_NAME: &str = "Schedule";
const COLUMN_WIDTHS: [f64; 5] = [10.0, 12.0, 12.0, 14.0, 60.0];

/// File name for a season export, e.g. "blackhawks_schedule_2025-2026.xlsx"
pub fn export_filename(nickname: &str, season: Season) -> String {
    format!("{}_schedule_{}.xlsx", nickname, season.label())
}

/// Build a single-sheet workbook with a header row and one row per fixture.
/// An empty slice still produces a valid workbook holding only the header.
pub fn to_xlsx(rows: &[ScheduleRow]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, (title, width)) in COLUMNS.iter().zip(COLUMN_WIDTHS).enumerate() {
        let col = col as u16;
        sheet.write_string_with_format(0, col, *title, &header)?;
        sheet.set_column_width(col, width)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = i as u32 + 1;
        for (col, cell) in row.cells().iter().enumerate() {
            sheet.write_string(r, col as u16, *cell)?;
        }
    }

    workbook.save_to_buffer()
}

/// Write the same table as CSV
pub fn write_csv<W: Write>(rows: &[ScheduleRow], writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);

    csv.write_record(COLUMNS)
        .context("Failed to write CSV header")?;
    for row in rows {
        csv.write_record(row.cells())
            .context("Failed to write CSV row")?;
    }
    csv.flush().context("Failed to flush CSV output")?;

    Ok(())
}

/// Save schedule rows to an xlsx file
pub fn save_xlsx(rows: &[ScheduleRow], filename: &str) -> Result<()> {
    let bytes = to_xlsx(rows).context("Failed to build spreadsheet")?;
    std::fs::write(filename, bytes).context("Failed to write spreadsheet file")?;
    Ok(())
}

/// Save schedule rows to a CSV file
pub fn save_csv(rows: &[ScheduleRow], filename: &str) -> Result<()> {
    let file = std::fs::File::create(filename).context("Failed to create CSV file")?;
    write_csv(rows, file)
}
