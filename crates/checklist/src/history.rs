use chrono::NaiveDate;

use crate::error::ChecklistError;
use crate::model::ChecklistRow;

/// Fold one day's checklist into the history ledger.
///
/// Every prior row dated like the new batch is dropped, every other prior row
/// is kept in order, and the new batch is appended. `prior = None` (no ledger
/// yet) yields just the new batch. The batch must hold a single reference
/// date; an empty batch leaves the ledger unchanged.
pub fn merge_day(
    prior: Option<Vec<ChecklistRow>>,
    day: Vec<ChecklistRow>,
) -> Result<Vec<ChecklistRow>, ChecklistError> {
    let Some(date) = batch_date(&day)? else {
        return Ok(prior.unwrap_or_default());
    };

    let mut ledger: Vec<ChecklistRow> = prior
        .unwrap_or_default()
        .into_iter()
        .filter(|row| row.reference_date != date)
        .collect();
    ledger.extend(day);
    Ok(ledger)
}

fn batch_date(day: &[ChecklistRow]) -> Result<Option<NaiveDate>, ChecklistError> {
    let Some(first) = day.first().map(|r| r.reference_date) else {
        return Ok(None);
    };
    if let Some(other) = day.iter().map(|r| r.reference_date).find(|d| *d != first) {
        return Err(ChecklistError::MixedDates { first, other });
    }
    Ok(Some(first))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ComparisonOutcome, Status};

    fn row(date: &str, company: &str, count_today: u64) -> ChecklistRow {
        ChecklistRow {
            reference_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            company_name: company.into(),
            layout: "Carteira".into(),
            daily_observation: "data found".into(),
            daily_status: Status::Ok,
            cumulative_observation: String::new(),
            count_yesterday: 0,
            count_today,
            comparison_outcome: ComparisonOutcome::Equal,
            cumulative_status: Status::Ok,
        }
    }

    #[test]
    fn no_prior_ledger_is_the_day() {
        let day = vec![row("2025-06-10", "A", 1), row("2025-06-10", "B", 2)];
        assert_eq!(merge_day(None, day.clone()).unwrap(), day);
        assert_eq!(merge_day(Some(Vec::new()), day.clone()).unwrap(), day);
    }

    #[test]
    fn same_day_rows_are_replaced() {
        let prior = vec![
            row("2025-06-09", "A", 1),
            row("2025-06-10", "A", 99),
            row("2025-06-08", "A", 0),
            row("2025-06-10", "B", 99),
        ];
        let day = vec![row("2025-06-10", "A", 5)];
        let merged = merge_day(Some(prior), day).unwrap();
        assert_eq!(
            merged,
            vec![row("2025-06-09", "A", 1), row("2025-06-08", "A", 0), row("2025-06-10", "A", 5)]
        );
    }

    #[test]
    fn merging_twice_does_not_duplicate() {
        let day = vec![row("2025-06-10", "A", 5)];
        let once = merge_day(Some(vec![row("2025-06-09", "A", 1)]), day.clone()).unwrap();
        let twice = merge_day(Some(once.clone()), day).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_batch_keeps_ledger() {
        let prior = vec![row("2025-06-09", "A", 1)];
        assert_eq!(merge_day(Some(prior.clone()), Vec::new()).unwrap(), prior);
    }

    #[test]
    fn mixed_dates_rejected() {
        let day = vec![row("2025-06-10", "A", 5), row("2025-06-11", "A", 6)];
        let err = merge_day(None, day).unwrap_err();
        assert!(matches!(err, ChecklistError::MixedDates { .. }));
    }
}
