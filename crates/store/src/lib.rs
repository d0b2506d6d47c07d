//! SQLite-backed record store.
//!
//! Table and column names belong to the upstream ETL and are kept verbatim.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;

use auditdesk_checklist::model::{ComparisonOutcome, DailyAuditEntry};
use auditdesk_checklist::source::{AuditSource, LatestEntryQuery};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS Auditoria_LayoutNew (
    Id INTEGER PRIMARY KEY AUTOINCREMENT,
    IdCompany INTEGER NOT NULL,
    Layout TEXT NOT NULL,
    dtDataReferencia DATE NOT NULL       -- YYYY-MM-DD
);

CREATE TABLE IF NOT EXISTS input_Auditoria (
    Id INTEGER PRIMARY KEY AUTOINCREMENT,
    idCompanyDeep INTEGER NOT NULL,
    LayoutDeep TEXT NOT NULL,
    dtDataReferenciaEPS DATE NOT NULL,   -- YYYY-MM-DD
    diferenca TEXT NOT NULL CHECK(diferenca IN ('Igual','Aumentou','Reduziu')),
    DeepInsert DATETIME NOT NULL         -- YYYY-MM-DD HH:MM:SS
);
"#;

// julianday() ranks 'T'-separated and fractional timestamps by time, not text.
const SQL_LATEST_ENTRY: &str = "
    SELECT diferenca, DeepInsert
    FROM input_Auditoria
    WHERE dtDataReferenciaEPS = ?1
      AND idCompanyDeep = ?2
      AND LayoutDeep = ?3
    ORDER BY julianday(DeepInsert) DESC, Id DESC
    LIMIT 1";

const SQL_CUMULATIVE_COUNT: &str = "
    SELECT COUNT(*) FROM Auditoria_LayoutNew
    WHERE IdCompany = ?1 AND Layout = ?2 AND dtDataReferencia <= ?3";

const DATE_FMT: &str = "%Y-%m-%d";
const DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
    #[error("query failed: {0}")]
    Query(#[from] rusqlite::Error),
    #[error("bad value in {column}: '{value}' ({reason})")]
    BadValue {
        column: &'static str,
        value: String,
        reason: String,
    },
}

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open an existing store. A missing file is an error, never an empty store.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            return Err(StoreError::NotFound(path.to_path_buf()));
        }
        let conn = Connection::open(path).map_err(|source| StoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "store opened");
        Ok(Self { conn })
    }

    /// Create (or reuse) a store file and make sure both tables exist.
    pub fn create(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|source| StoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    pub fn in_memory() -> Result<Self, StoreError> {
        let store = Self { conn: Connection::open_in_memory()? };
        store.init_schema()?;
        Ok(store)
    }

    pub fn init_schema(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    pub fn insert_entry(&self, entry: &DailyAuditEntry) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO input_Auditoria (idCompanyDeep, LayoutDeep, dtDataReferenciaEPS, diferenca, DeepInsert)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                entry.company_id,
                entry.layout,
                entry.reference_date.format(DATE_FMT).to_string(),
                outcome_to_store(entry.outcome),
                entry.inserted_at.format(DATETIME_FMT).to_string(),
            ],
        )?;
        Ok(())
    }

    /// Insert `n` cumulative rows dated `date`.
    pub fn insert_count_rows(&self, company_id: i64, layout: &str, date: NaiveDate, n: usize) -> Result<(), StoreError> {
        let date = date.format(DATE_FMT).to_string();
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO Auditoria_LayoutNew (IdCompany, Layout, dtDataReferencia) VALUES (?1, ?2, ?3)",
            )?;
            for _ in 0..n {
                stmt.execute(params![company_id, layout, date])?;
            }
        }
        tx.commit()?;
        Ok(())
    }
}

impl AuditSource for SqliteStore {
    type Error = StoreError;

    fn latest_entry(&self, query: &LatestEntryQuery<'_>) -> Result<Option<DailyAuditEntry>, StoreError> {
        let mut stmt = self.conn.prepare_cached(SQL_LATEST_ENTRY)?;
        let raw: Option<(String, String)> = stmt
            .query_row(
                params![
                    query.reference_date.format(DATE_FMT).to_string(),
                    query.company_id,
                    query.layout,
                ],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let Some((outcome, inserted_at)) = raw else {
            return Ok(None);
        };
        Ok(Some(DailyAuditEntry {
            company_id: query.company_id,
            layout: query.layout.to_string(),
            reference_date: query.reference_date,
            outcome: outcome.parse().map_err(|reason| StoreError::BadValue {
                column: "diferenca",
                value: outcome.clone(),
                reason,
            })?,
            inserted_at: parse_timestamp(&inserted_at)?,
        }))
    }

    fn cumulative_count(&self, company_id: i64, layout: &str, up_to: NaiveDate) -> Result<u64, StoreError> {
        let mut stmt = self.conn.prepare_cached(SQL_CUMULATIVE_COUNT)?;
        let count: i64 = stmt.query_row(
            params![company_id, layout, up_to.format(DATE_FMT).to_string()],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }
}

/// The table's CHECK constraint only admits the upstream vocabulary.
fn outcome_to_store(outcome: ComparisonOutcome) -> &'static str {
    match outcome {
        ComparisonOutcome::Equal => "Igual",
        ComparisonOutcome::Increased => "Aumentou",
        ComparisonOutcome::Reduced => "Reduziu",
    }
}

fn parse_timestamp(value: &str) -> Result<NaiveDateTime, StoreError> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
    ];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .ok_or_else(|| StoreError::BadValue {
            column: "DeepInsert",
            value: value.to_string(),
            reason: "expected YYYY-MM-DD HH:MM:SS".into(),
        })
}
