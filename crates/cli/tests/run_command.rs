// End-to-end tests for `auditdesk run`.
// Run with: cargo test -p auditdesk-cli --test run_command

use std::path::Path;
use std::process::Command;

use chrono::{NaiveDate, NaiveDateTime};

use auditdesk_checklist::{ComparisonOutcome, DailyAuditEntry};
use auditdesk_store::SqliteStore;

const SETTINGS: &str = r#"
layouts = ["Carteira", "Tempos"]

[[companies]]
id = 7
name = "Empresa_7"

[paths]
db = "store.sqlite"
out_dir = "reports"
ledger_format = "csv"
"#;

fn auditdesk() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_auditdesk"));
    cmd.env("AUDITDESK_LOG", "error");
    cmd
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn seed(dir: &Path) {
    let store = SqliteStore::create(&dir.join("store.sqlite")).unwrap();
    store.insert_count_rows(7, "Carteira", date("2025-06-09"), 40).unwrap();
    store.insert_count_rows(7, "Carteira", date("2025-06-10"), 15).unwrap();
    store.insert_count_rows(7, "Tempos", date("2025-06-09"), 55).unwrap();
    store
        .insert_entry(&DailyAuditEntry {
            company_id: 7,
            layout: "Tempos".into(),
            reference_date: date("2025-06-10"),
            outcome: ComparisonOutcome::Increased,
            inserted_at: NaiveDateTime::parse_from_str("2025-06-11 06:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
        })
        .unwrap();
}

fn ledger_lines(dir: &Path) -> Vec<String> {
    std::fs::read_to_string(dir.join("reports/checklist_history.csv"))
        .unwrap()
        .lines()
        .map(|l| l.to_string())
        .collect()
}

#[test]
fn run_writes_ledger_and_reports() {
    let dir = tempfile::tempdir().unwrap();
    seed(dir.path());
    let settings = dir.path().join("auditdesk.toml");
    std::fs::write(&settings, SETTINGS).unwrap();

    let output = auditdesk()
        .args(["run", "--date", "2025-06-10", "--json", "--settings"])
        .arg(&settings)
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 2);
    assert_eq!(rows[0]["cumulative_observation"], "40 -> 55");
    assert_eq!(rows[0]["daily_status"], "NEEDS_REVIEW");
    assert_eq!(rows[1]["comparison_outcome"], "Increased");
    assert_eq!(rows[1]["cumulative_status"], "NEEDS_REVIEW");

    let lines = ledger_lines(dir.path());
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("2025-06-10,Empresa_7,Carteira,no data on 2025-06-10,NEEDS_REVIEW,40 -> 55,40,55,Equal,OK"));

    assert!(dir.path().join("reports/cumulative_report_10_06_2025.xlsx").exists());
    assert!(dir.path().join("reports/daily_report_10_06_2025.xlsx").exists());
}

#[test]
fn rerun_same_day_replaces_rows() {
    let dir = tempfile::tempdir().unwrap();
    seed(dir.path());
    let settings = dir.path().join("auditdesk.toml");
    std::fs::write(&settings, SETTINGS).unwrap();

    for day in ["2025-06-09", "2025-06-10", "2025-06-10"] {
        let status = auditdesk()
            .args(["run", "--date", day, "--settings"])
            .arg(&settings)
            .status()
            .unwrap();
        assert!(status.success());
    }

    let lines = ledger_lines(dir.path());
    assert_eq!(lines.len(), 5);
    assert_eq!(lines.iter().filter(|l| l.starts_with("2025-06-09,")).count(), 2);
    assert_eq!(lines.iter().filter(|l| l.starts_with("2025-06-10,")).count(), 2);
}

#[test]
fn missing_store_exits_with_store_code() {
    let dir = tempfile::tempdir().unwrap();
    let output = auditdesk()
        .args(["run", "--date", "2025-06-10", "--db"])
        .arg(dir.path().join("absent.sqlite"))
        .arg("--out-dir")
        .arg(dir.path().join("reports"))
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
    assert!(String::from_utf8_lossy(&output.stderr).contains("database not found"));
    assert!(!dir.path().join("reports").exists());
}

#[test]
fn unwritable_out_dir_exits_with_ledger_code() {
    let dir = tempfile::tempdir().unwrap();
    seed(dir.path());
    let blocker = dir.path().join("out");
    std::fs::write(&blocker, b"not a directory").unwrap();

    let output = auditdesk()
        .args(["run", "--date", "2025-06-10", "--db"])
        .arg(dir.path().join("store.sqlite"))
        .arg("--out-dir")
        .arg(&blocker)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(5));
    assert!(String::from_utf8_lossy(&output.stderr).contains("cannot create"));
    assert_eq!(std::fs::read(&blocker).unwrap(), b"not a directory");
}

#[test]
fn bad_date_exits_with_usage_code() {
    let status = auditdesk().args(["run", "--date", "June 10"]).status().unwrap();
    assert_eq!(status.code(), Some(2));
}

#[test]
fn init_db_then_validate() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("fresh.sqlite");
    assert!(auditdesk().arg("init-db").arg(&db).status().unwrap().success());
    assert!(SqliteStore::open(&db).is_ok());

    let settings = dir.path().join("auditdesk.toml");
    std::fs::write(&settings, SETTINGS).unwrap();
    assert!(auditdesk().arg("validate").arg(&settings).status().unwrap().success());

    std::fs::write(&settings, "layouts = []").unwrap();
    assert_eq!(auditdesk().arg("validate").arg(&settings).status().unwrap().code(), Some(3));
}

#[test]
fn xlsx_ledger_by_default() {
    let dir = tempfile::tempdir().unwrap();
    seed(dir.path());
    let status = auditdesk()
        .args(["run", "--date", "2025-06-10", "--db"])
        .arg(dir.path().join("store.sqlite"))
        .arg("--out-dir")
        .arg(dir.path().join("out"))
        .status()
        .unwrap();
    assert!(status.success());

    use calamine::{open_workbook_auto, Reader};
    let mut wb = open_workbook_auto(dir.path().join("out/checklist_history.xlsx")).unwrap();
    let range = wb.worksheet_range_at(0).unwrap().unwrap();
    // header + 12 companies x 3 layouts
    assert_eq!(range.height(), 37);
}
