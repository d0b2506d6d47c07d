use chrono::NaiveDate;
use thiserror::Error;

/// Which of the two store queries a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    /// Latest daily audit entry for a single reference date.
    DailyEntry,
    /// Cumulative row count up to and including a date.
    CumulativeCount,
}

impl std::fmt::Display for LookupKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DailyEntry => write!(f, "daily entry"),
            Self::CumulativeCount => write!(f, "cumulative count"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ChecklistError {
    /// TOML parse / deserialization error.
    #[error("config parse error: {0}")]
    ConfigParse(String),
    /// Config validation error (empty lists, duplicate ids, etc.).
    #[error("config validation error: {0}")]
    ConfigValidation(String),
    /// A store lookup failed. Fatal for the whole run.
    #[error("{kind} lookup failed for company {company_id}, layout '{layout}', date {date}: {source}")]
    Lookup {
        kind: LookupKind,
        company_id: i64,
        layout: String,
        date: NaiveDate,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// A batch handed to the merge spans more than one reference date.
    #[error("checklist batch mixes reference dates {first} and {other}")]
    MixedDates { first: NaiveDate, other: NaiveDate },
}
