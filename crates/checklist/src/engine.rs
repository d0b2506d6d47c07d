use chrono::{NaiveDate, Weekday};

use crate::calendar::{comparison_date, previous_business_day};
use crate::config::{ChecklistConfig, Company};
use crate::error::{ChecklistError, LookupKind};
use crate::model::{ChecklistRow, ComparisonOutcome, Status};
use crate::source::{AuditSource, LatestEntryQuery};

pub const OBS_DATA_FOUND: &str = "data found";
pub const OBS_NO_CUMULATIVE: &str = "no cumulative data at reference date";

/// The pair of dates a run compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunDates {
    pub reference: NaiveDate,
    pub comparison: NaiveDate,
}

impl RunDates {
    pub fn for_reference(reference: NaiveDate) -> Self {
        Self { reference, comparison: comparison_date(reference) }
    }

    /// Dates for a run started on `today`.
    pub fn from_today(today: NaiveDate, closed: Weekday) -> Self {
        Self::for_reference(previous_business_day(today, closed))
    }
}

/// Build the checklist for every (company, layout) pair in config order.
///
/// Any lookup failure aborts the whole run.
pub fn build_checklist<S: AuditSource>(
    config: &ChecklistConfig,
    source: &S,
    dates: RunDates,
) -> Result<Vec<ChecklistRow>, ChecklistError> {
    let mut rows = Vec::with_capacity(config.pair_count());
    for company in &config.companies {
        for layout in &config.layouts {
            let row = check_pair(source, company, layout, dates)?;
            tracing::debug!(
                company = company.id,
                layout = %layout,
                daily = %row.daily_status,
                cumulative = %row.cumulative_status,
                "pair checked"
            );
            rows.push(row);
        }
    }
    Ok(rows)
}

fn check_pair<S: AuditSource>(
    source: &S,
    company: &Company,
    layout: &str,
    dates: RunDates,
) -> Result<ChecklistRow, ChecklistError> {
    let lookup_err = |kind: LookupKind, date: NaiveDate| {
        move |e: S::Error| ChecklistError::Lookup {
            kind,
            company_id: company.id,
            layout: layout.to_string(),
            date,
            source: Box::new(e),
        }
    };

    // Daily
    let query = LatestEntryQuery {
        company_id: company.id,
        layout,
        reference_date: dates.reference,
    };
    let entry = source
        .latest_entry(&query)
        .map_err(lookup_err(LookupKind::DailyEntry, dates.reference))?;

    let (daily_status, daily_observation, comparison_outcome) = match entry {
        Some(entry) => (Status::Ok, OBS_DATA_FOUND.to_string(), entry.outcome),
        None => (
            Status::NeedsReview,
            format!("no data on {}", dates.reference.format("%Y-%m-%d")),
            ComparisonOutcome::Equal,
        ),
    };

    // Cumulative
    let count_today = source
        .cumulative_count(company.id, layout, dates.reference)
        .map_err(lookup_err(LookupKind::CumulativeCount, dates.reference))?;
    let count_yesterday = source
        .cumulative_count(company.id, layout, dates.comparison)
        .map_err(lookup_err(LookupKind::CumulativeCount, dates.comparison))?;

    let (cumulative_status, cumulative_observation) = classify_cumulative(count_yesterday, count_today);

    Ok(ChecklistRow {
        reference_date: dates.reference,
        company_name: company.name.clone(),
        layout: layout.to_string(),
        daily_observation,
        daily_status,
        cumulative_observation,
        count_yesterday,
        count_today,
        comparison_outcome,
        cumulative_status,
    })
}

/// Growth must be strictly positive. An empty total is its own failure.
pub fn classify_cumulative(count_yesterday: u64, count_today: u64) -> (Status, String) {
    if count_today == 0 {
        (Status::NeedsReview, OBS_NO_CUMULATIVE.to_string())
    } else if count_today > count_yesterday {
        (Status::Ok, format!("{count_yesterday} -> {count_today}"))
    } else {
        (Status::NeedsReview, format!("no growth: {count_yesterday} -> {count_today}"))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
