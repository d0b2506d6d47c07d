// Single-sheet xlsx tables: header row + one line per checklist row

use std::path::Path;

use auditdesk_checklist::ChecklistRow;
use calamine::{open_workbook_auto, Data, Reader};
use rust_xlsxwriter::{Color, Format, Workbook};

use crate::columns::{CellValue, Column};
use crate::error::IoError;

pub(crate) const SHEET_NAME: &str = "Checklist";

const HEADER_BACKGROUND: u32 = 0xD7E4BC;

/// Serialize a table to xlsx bytes. Counts are written as numbers.
pub(crate) fn table_to_bytes(columns: &[Column], rows: &[ChecklistRow]) -> Result<Vec<u8>, IoError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet().set_name(SHEET_NAME)?;

    let header_format = Format::new().set_bold().set_background_color(Color::RGB(HEADER_BACKGROUND));
    for (col, column) in columns.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, column.name(), &header_format)?;
    }

    for (idx, row) in rows.iter().enumerate() {
        let row32 = (idx + 1) as u32;
        for (col, column) in columns.iter().enumerate() {
            let col16 = col as u16;
            match column.value(row) {
                CellValue::Text(s) => {
                    worksheet.write_string(row32, col16, &*s)?;
                }
                CellValue::Count(n) => {
                    worksheet.write_number(row32, col16, n as f64)?;
                }
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

/// Read the first sheet as text records, header included.
pub(crate) fn read_records(path: &Path) -> Result<Vec<Vec<String>>, IoError> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| IoError::Xlsx(format!("cannot open {}: {e}", path.display())))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| IoError::Xlsx(format!("{} contains no sheets", path.display())))?
        .map_err(|e| IoError::Xlsx(format!("cannot read {}: {e}", path.display())))?;

    Ok(range
        .rows()
        .map(|cells| cells.iter().map(cell_text).collect())
        .filter(|record: &Vec<String>| record.iter().any(|s| !s.is_empty()))
        .collect())
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Int(n) => n.to_string(),
        // Whole floats are counts written by table_to_bytes
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_counts_render_without_fraction() {
        assert_eq!(cell_text(&Data::Float(55.0)), "55");
        assert_eq!(cell_text(&Data::Float(1.5)), "1.5");
        assert_eq!(cell_text(&Data::Int(7)), "7");
        assert_eq!(cell_text(&Data::Empty), "");
    }
}
