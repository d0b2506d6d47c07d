//! The history ledger: every checklist row ever produced, one row per
//! (reference_date, company, layout).
//!
//! Read-modify-overwrite with no locking. Two runs against the same file at
//! once lose one of the updates.

use std::path::Path;

use auditdesk_checklist::{merge_day, ChecklistRow};

use crate::columns::{check_header, header, parse_record, LEDGER_COLUMNS};
use crate::error::IoError;
use crate::{write_atomic, xlsx};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerFormat {
    Xlsx,
    Csv,
}

impl LedgerFormat {
    pub fn from_path(path: &Path) -> Result<Self, IoError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("xlsx") => Ok(Self::Xlsx),
            Some("csv") => Ok(Self::Csv),
            _ => Err(IoError::UnknownFormat(path.to_path_buf())),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
        }
    }
}

/// Load the ledger. A missing file is an empty ledger (`None`).
pub fn read_ledger(path: &Path) -> Result<Option<Vec<ChecklistRow>>, IoError> {
    let format = LedgerFormat::from_path(path)?;
    if !path.exists() {
        tracing::info!(path = %path.display(), "no history ledger yet");
        return Ok(None);
    }

    let records = match format {
        LedgerFormat::Xlsx => xlsx::read_records(path)?,
        LedgerFormat::Csv => read_csv_records(path)?,
    };

    let Some((head, body)) = records.split_first() else {
        return Ok(Some(Vec::new()));
    };
    check_header(path, head)?;

    let rows = body
        .iter()
        .enumerate()
        .map(|(i, record)| parse_record(path, i + 2, record))
        .collect::<Result<Vec<_>, _>>()?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "history ledger loaded");
    Ok(Some(rows))
}

/// Persist the whole ledger, replacing the file.
pub fn write_ledger(path: &Path, rows: &[ChecklistRow]) -> Result<(), IoError> {
    let bytes = match LedgerFormat::from_path(path)? {
        LedgerFormat::Xlsx => xlsx::table_to_bytes(&LEDGER_COLUMNS, rows)?,
        LedgerFormat::Csv => csv_bytes(rows)?,
    };
    write_atomic(path, &bytes)?;
    tracing::info!(path = %path.display(), rows = rows.len(), "history ledger written");
    Ok(())
}

/// Read, merge the day in, write back. Returns the merged ledger.
pub fn update_ledger(path: &Path, day: Vec<ChecklistRow>) -> Result<Vec<ChecklistRow>, IoError> {
    let prior = read_ledger(path)?;
    let merged = merge_day(prior, day)?;
    write_ledger(path, &merged)?;
    Ok(merged)
}

fn read_csv_records(path: &Path) -> Result<Vec<Vec<String>>, IoError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;
    let mut records = Vec::new();
    for record in reader.records() {
        let record = record?;
        records.push(record.iter().map(|s| s.to_string()).collect());
    }
    Ok(records)
}

fn csv_bytes(rows: &[ChecklistRow]) -> Result<Vec<u8>, IoError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(header(&LEDGER_COLUMNS))?;
    for row in rows {
        writer.write_record(LEDGER_COLUMNS.iter().map(|c| c.value(row).to_string()))?;
    }
    writer
        .into_inner()
        .map_err(|e| IoError::Csv(csv::Error::from(e.into_error())))
}
