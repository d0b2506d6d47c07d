//! `auditdesk run`: one full checklist pass.
//!
//! Nothing is written until the whole checklist has been built; reports are
//! written only after the ledger update succeeded.

use std::path::PathBuf;

use chrono::NaiveDate;

use auditdesk_checklist::{build_checklist, ChecklistRow, RunDates, Status};
use auditdesk_store::SqliteStore;

use crate::settings::{FormatArg, Settings};
use crate::CliError;

pub struct RunArgs {
    pub settings: Option<PathBuf>,
    pub db: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
    pub date: Option<String>,
    pub format: Option<FormatArg>,
    pub json: bool,
}

pub fn cmd_run(args: RunArgs) -> Result<(), CliError> {
    let mut settings = match &args.settings {
        Some(path) => Settings::load(path).map_err(CliError::config)?,
        None => Settings::default(),
    };
    if let Some(db) = args.db {
        settings.paths.db = db;
    }
    if let Some(out_dir) = args.out_dir {
        settings.paths.out_dir = out_dir;
    }
    if let Some(format) = args.format {
        settings.paths.ledger_format = format;
    }

    let dates = match args.date.as_deref() {
        Some(raw) => RunDates::for_reference(parse_date(raw)?),
        None => RunDates::from_today(chrono::Local::now().date_naive(), settings.checklist.closed_weekday),
    };
    tracing::info!(reference = %dates.reference, comparison = %dates.comparison, "checklist run");

    let store = SqliteStore::open(&settings.paths.db).map_err(|e| {
        CliError::store(e.to_string()).with_hint("create the tables with `auditdesk init-db <path>`")
    })?;
    let rows = build_checklist(&settings.checklist, &store, dates).map_err(|e| CliError::store(e.to_string()))?;

    std::fs::create_dir_all(&settings.paths.out_dir).map_err(|e| {
        CliError::io(format!("cannot create {}: {e}", settings.paths.out_dir.display()))
    })?;

    let ledger_path = settings.ledger_path();
    let ledger = auditdesk_io::update_ledger(&ledger_path, rows.clone()).map_err(|e| CliError::io(e.to_string()))?;
    let reports = auditdesk_io::write_reports(&settings.paths.out_dir, dates.reference, &rows)
        .map_err(|e| CliError::io(e.to_string()))?;

    if args.json {
        let json = serde_json::to_string_pretty(&rows)
            .map_err(|e| CliError::general(format!("JSON serialization error: {e}")))?;
        println!("{json}");
    }

    let summary = Summary::of(&rows);
    if summary.needs_review > 0 {
        tracing::warn!(pairs = summary.needs_review, "pairs need review");
    }
    eprintln!(
        "checklist {}: {} pairs, daily {} OK / {} review, cumulative {} OK / {} review",
        dates.reference,
        rows.len(),
        summary.daily_ok,
        rows.len() - summary.daily_ok,
        summary.cumulative_ok,
        rows.len() - summary.cumulative_ok,
    );
    eprintln!("ledger: {} ({} rows)", ledger_path.display(), ledger.len());
    eprintln!("reports: {} | {}", reports.cumulative.display(), reports.daily.display());
    Ok(())
}

fn parse_date(raw: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| CliError::args(format!("invalid --date '{raw}': {e}")).with_hint("expected YYYY-MM-DD"))
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Summary {
    daily_ok: usize,
    cumulative_ok: usize,
    needs_review: usize,
}

impl Summary {
    fn of(rows: &[ChecklistRow]) -> Self {
        let mut s = Self::default();
        for row in rows {
            if row.daily_status == Status::Ok {
                s.daily_ok += 1;
            }
            if row.cumulative_status == Status::Ok {
                s.cumulative_ok += 1;
            }
            if row.needs_review() {
                s.needs_review += 1;
            }
        }
        s
    }
}
