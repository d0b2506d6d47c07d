use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported ledger extension: {}", .0.display())]
    UnknownFormat(PathBuf),
    #[error("XLSX error: {0}")]
    Xlsx(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// Header row does not match the fixed ledger columns.
    #[error("{}: unexpected header {found:?}, expected {expected:?}", path.display())]
    Header {
        path: PathBuf,
        found: Vec<String>,
        expected: Vec<&'static str>,
    },
    /// A ledger cell could not be parsed. `row` is 1-based, header = row 1.
    #[error("{}: row {row}, column '{column}': {message}", path.display())]
    Cell {
        path: PathBuf,
        row: usize,
        column: &'static str,
        message: String,
    },
    #[error(transparent)]
    Merge(#[from] auditdesk_checklist::ChecklistError),
}

impl From<rust_xlsxwriter::XlsxError> for IoError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        Self::Xlsx(e.to_string())
    }
}
