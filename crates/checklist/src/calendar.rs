use chrono::{Datelike, Days, NaiveDate, Weekday};

/// The last business day strictly before `today`.
///
/// Starts at yesterday and walks back over `closed` days.
pub fn previous_business_day(today: NaiveDate, closed: Weekday) -> NaiveDate {
    let mut day = today - Days::new(1);
    while day.weekday() == closed {
        day = day - Days::new(1);
    }
    day
}

/// The comparison date for cumulative counts: one calendar day before `reference`.
pub fn comparison_date(reference: NaiveDate) -> NaiveDate {
    reference - Days::new(1)
}
