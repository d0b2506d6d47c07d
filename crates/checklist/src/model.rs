use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Store records
// ---------------------------------------------------------------------------

/// Outcome of the upstream audit comparison for one (company, layout, date).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonOutcome {
    Equal,
    Increased,
    Reduced,
}

impl std::fmt::Display for ComparisonOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Equal => write!(f, "Equal"),
            Self::Increased => write!(f, "Increased"),
            Self::Reduced => write!(f, "Reduced"),
        }
    }
}

impl FromStr for ComparisonOutcome {
    type Err = String;

    /// Accepts the ledger names and the upstream ETL vocabulary.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Equal" | "Igual" => Ok(Self::Equal),
            "Increased" | "Aumentou" => Ok(Self::Increased),
            "Reduced" | "Reduziu" => Ok(Self::Reduced),
            other => Err(format!("unknown comparison outcome '{other}'")),
        }
    }
}

/// One row of the daily audit table. Several may exist per key; the latest
/// insertion is authoritative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyAuditEntry {
    pub company_id: i64,
    pub layout: String,
    pub reference_date: NaiveDate,
    pub outcome: ComparisonOutcome,
    pub inserted_at: NaiveDateTime,
}

// ---------------------------------------------------------------------------
// Checklist output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "NEEDS_REVIEW")]
    NeedsReview,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ok => write!(f, "OK"),
            Self::NeedsReview => write!(f, "NEEDS_REVIEW"),
        }
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "OK" => Ok(Self::Ok),
            "NEEDS_REVIEW" => Ok(Self::NeedsReview),
            other => Err(format!("unknown status '{other}'")),
        }
    }
}

/// One checklist line per (company, layout) per run.
///
/// Field order is the ledger column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistRow {
    pub reference_date: NaiveDate,
    pub company_name: String,
    pub layout: String,
    pub daily_observation: String,
    pub daily_status: Status,
    pub cumulative_observation: String,
    pub count_yesterday: u64,
    pub count_today: u64,
    /// `Equal` is also the placeholder when no daily entry exists; check
    /// `daily_status` before reading this as a measured value.
    pub comparison_outcome: ComparisonOutcome,
    pub cumulative_status: Status,
}

impl ChecklistRow {
    pub fn needs_review(&self) -> bool {
        self.daily_status == Status::NeedsReview || self.cumulative_status == Status::NeedsReview
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_parses_both_vocabularies() {
        assert_eq!("Igual".parse::<ComparisonOutcome>().unwrap(), ComparisonOutcome::Equal);
        assert_eq!("Aumentou".parse::<ComparisonOutcome>().unwrap(), ComparisonOutcome::Increased);
        assert_eq!("Reduziu".parse::<ComparisonOutcome>().unwrap(), ComparisonOutcome::Reduced);
        assert_eq!("Reduced".parse::<ComparisonOutcome>().unwrap(), ComparisonOutcome::Reduced);
        assert!("Maior".parse::<ComparisonOutcome>().is_err());
    }

    #[test]
    fn status_serializes_as_ledger_text() {
        assert_eq!(serde_json::to_string(&Status::NeedsReview).unwrap(), "\"NEEDS_REVIEW\"");
        assert_eq!(Status::Ok.to_string(), "OK");
        assert_eq!("NEEDS_REVIEW".parse::<Status>().unwrap(), Status::NeedsReview);
    }
}
