// Daily and cumulative report views of one run's checklist

use std::path::{Path, PathBuf};

use auditdesk_checklist::ChecklistRow;
use chrono::NaiveDate;

use crate::columns::{Column, CUMULATIVE_VIEW, DAILY_VIEW};
use crate::error::IoError;
use crate::{write_atomic, xlsx};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub cumulative: PathBuf,
    pub daily: PathBuf,
}

impl ReportPaths {
    /// `cumulative_report_DD_MM_YYYY.xlsx` and `daily_report_DD_MM_YYYY.xlsx` under `dir`.
    pub fn for_date(dir: &Path, date: NaiveDate) -> Self {
        let stamp = date.format("%d_%m_%Y");
        Self {
            cumulative: dir.join(format!("cumulative_report_{stamp}.xlsx")),
            daily: dir.join(format!("daily_report_{stamp}.xlsx")),
        }
    }
}

pub fn write_reports(dir: &Path, date: NaiveDate, rows: &[ChecklistRow]) -> Result<ReportPaths, IoError> {
    let paths = ReportPaths::for_date(dir, date);
    write_view(&paths.cumulative, &CUMULATIVE_VIEW, rows)?;
    write_view(&paths.daily, &DAILY_VIEW, rows)?;
    tracing::info!(
        cumulative = %paths.cumulative.display(),
        daily = %paths.daily.display(),
        "reports written"
    );
    Ok(paths)
}

pub fn write_view(path: &Path, columns: &[Column], rows: &[ChecklistRow]) -> Result<(), IoError> {
    let bytes = xlsx::table_to_bytes(columns, rows)?;
    write_atomic(path, &bytes)
}
