// File I/O for the history ledger and the report views

pub mod columns;
pub mod error;
pub mod ledger;
pub mod report;
mod xlsx;

pub use columns::{Column, CUMULATIVE_VIEW, DAILY_VIEW, LEDGER_COLUMNS};
pub use error::IoError;
pub use ledger::{read_ledger, update_ledger, write_ledger, LedgerFormat};
pub use report::{write_reports, ReportPaths};

use std::path::{Path, PathBuf};

/// Write `bytes` to a sibling temp file, then rename it over `path`.
///
/// Readers never see a half-written file. Concurrent writers still race:
/// the last rename wins.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), IoError> {
    let tmp = temp_path(path);
    std::fs::write(&tmp, bytes).map_err(|source| IoError::Write { path: tmp.clone(), source })?;
    std::fs::rename(&tmp, path).map_err(|source| {
        let _ = std::fs::remove_file(&tmp);
        IoError::Write { path: path.to_path_buf(), source }
    })
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
