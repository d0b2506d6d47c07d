//! Ledger and report column contract.
//!
//! Names and order are read by downstream report consumers; do not reorder.

use std::borrow::Cow;
use std::path::Path;

use auditdesk_checklist::ChecklistRow;
use chrono::NaiveDate;

use crate::error::IoError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    ReferenceDate,
    CompanyName,
    Layout,
    DailyObservation,
    DailyStatus,
    CumulativeObservation,
    CountYesterday,
    CountToday,
    ComparisonOutcome,
    CumulativeStatus,
}

pub const LEDGER_COLUMNS: [Column; 10] = [
    Column::ReferenceDate,
    Column::CompanyName,
    Column::Layout,
    Column::DailyObservation,
    Column::DailyStatus,
    Column::CumulativeObservation,
    Column::CountYesterday,
    Column::CountToday,
    Column::ComparisonOutcome,
    Column::CumulativeStatus,
];

pub const CUMULATIVE_VIEW: [Column; 7] = [
    Column::ReferenceDate,
    Column::CompanyName,
    Column::Layout,
    Column::CumulativeObservation,
    Column::CountYesterday,
    Column::CountToday,
    Column::CumulativeStatus,
];

pub const DAILY_VIEW: [Column; 5] = [
    Column::ReferenceDate,
    Column::CompanyName,
    Column::Layout,
    Column::DailyObservation,
    Column::DailyStatus,
];

/// A typed cell: counts stay numeric in xlsx output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue<'a> {
    Text(Cow<'a, str>),
    Count(u64),
}

impl std::fmt::Display for CellValue<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s}"),
            Self::Count(n) => write!(f, "{n}"),
        }
    }
}

impl Column {
    pub fn name(self) -> &'static str {
        match self {
            Self::ReferenceDate => "reference_date",
            Self::CompanyName => "company_name",
            Self::Layout => "layout",
            Self::DailyObservation => "daily_observation",
            Self::DailyStatus => "daily_status",
            Self::CumulativeObservation => "cumulative_observation",
            Self::CountYesterday => "count_yesterday",
            Self::CountToday => "count_today",
            Self::ComparisonOutcome => "comparison_outcome",
            Self::CumulativeStatus => "cumulative_status",
        }
    }

    pub fn value(self, row: &ChecklistRow) -> CellValue<'_> {
        match self {
            Self::ReferenceDate => CellValue::Text(Cow::Owned(row.reference_date.format("%Y-%m-%d").to_string())),
            Self::CompanyName => CellValue::Text(Cow::Borrowed(&row.company_name)),
            Self::Layout => CellValue::Text(Cow::Borrowed(&row.layout)),
            Self::DailyObservation => CellValue::Text(Cow::Borrowed(&row.daily_observation)),
            Self::DailyStatus => CellValue::Text(Cow::Owned(row.daily_status.to_string())),
            Self::CumulativeObservation => CellValue::Text(Cow::Borrowed(&row.cumulative_observation)),
            Self::CountYesterday => CellValue::Count(row.count_yesterday),
            Self::CountToday => CellValue::Count(row.count_today),
            Self::ComparisonOutcome => CellValue::Text(Cow::Owned(row.comparison_outcome.to_string())),
            Self::CumulativeStatus => CellValue::Text(Cow::Owned(row.cumulative_status.to_string())),
        }
    }
}

pub fn header(columns: &[Column]) -> Vec<&'static str> {
    columns.iter().map(|c| c.name()).collect()
}

pub(crate) fn check_header(path: &Path, found: &[String]) -> Result<(), IoError> {
    let expected = header(&LEDGER_COLUMNS);
    let matches = found.len() == expected.len() && found.iter().zip(&expected).all(|(f, e)| f.trim() == *e);
    if matches {
        Ok(())
    } else {
        Err(IoError::Header { path: path.to_path_buf(), found: found.to_vec(), expected })
    }
}

/// Parse one ledger record laid out as [`LEDGER_COLUMNS`].
pub(crate) fn parse_record(path: &Path, row: usize, fields: &[String]) -> Result<ChecklistRow, IoError> {
    let cell_err = |column: Column, message: String| IoError::Cell {
        path: path.to_path_buf(),
        row,
        column: column.name(),
        message,
    };
    let field = |column: Column| {
        field_at(fields, column).ok_or_else(|| cell_err(column, "missing value".into()))
    };
    let count = |column: Column| -> Result<u64, IoError> {
        let raw = field(column)?;
        raw.trim().parse().map_err(|_| cell_err(column, format!("not a count: '{raw}'")))
    };

    let date_raw = field(Column::ReferenceDate)?;
    let reference_date = NaiveDate::parse_from_str(date_raw.trim(), "%Y-%m-%d")
        .map_err(|_| cell_err(Column::ReferenceDate, format!("not a date: '{date_raw}'")))?;

    Ok(ChecklistRow {
        reference_date,
        company_name: field(Column::CompanyName)?.to_string(),
        layout: field(Column::Layout)?.to_string(),
        daily_observation: field(Column::DailyObservation)?.to_string(),
        daily_status: field(Column::DailyStatus)?
            .parse()
            .map_err(|e| cell_err(Column::DailyStatus, e))?,
        cumulative_observation: field(Column::CumulativeObservation)?.to_string(),
        count_yesterday: count(Column::CountYesterday)?,
        count_today: count(Column::CountToday)?,
        comparison_outcome: field(Column::ComparisonOutcome)?
            .parse()
            .map_err(|e| cell_err(Column::ComparisonOutcome, e))?,
        cumulative_status: field(Column::CumulativeStatus)?
            .parse()
            .map_err(|e| cell_err(Column::CumulativeStatus, e))?,
    })
}

fn field_at(fields: &[String], column: Column) -> Option<&str> {
    let idx = LEDGER_COLUMNS.iter().position(|c| *c == column)?;
    fields.get(idx).map(|s| s.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn ledger_header_order() {
        assert_eq!(
            header(&LEDGER_COLUMNS),
            vec![
                "reference_date",
                "company_name",
                "layout",
                "daily_observation",
                "daily_status",
                "cumulative_observation",
                "count_yesterday",
                "count_today",
                "comparison_outcome",
                "cumulative_status",
            ]
        );
    }

    #[test]
    fn parse_valid_record() {
        let record = fields(&[
            "2025-06-10", "Empresa_7", "Carteira", "data found", "OK", "40 -> 55", "40", "55", "Increased", "OK",
        ]);
        let row = parse_record(Path::new("h.csv"), 2, &record).unwrap();
        assert_eq!(row.count_today, 55);
        assert_eq!(Column::CountYesterday.value(&row), CellValue::Count(40));
        assert_eq!(Column::ReferenceDate.value(&row).to_string(), "2025-06-10");
    }

    #[test]
    fn bad_count_names_row_and_column() {
        let record = fields(&[
            "2025-06-10", "Empresa_7", "Carteira", "data found", "OK", "", "many", "55", "Equal", "OK",
        ]);
        let err = parse_record(Path::new("h.csv"), 4, &record).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("row 4"), "{msg}");
        assert!(msg.contains("count_yesterday"), "{msg}");
    }

    #[test]
    fn header_mismatch_rejected() {
        let found = fields(&["Data_Referencia", "Empresa"]);
        assert!(matches!(check_header(Path::new("h.csv"), &found), Err(IoError::Header { .. })));
    }
}
