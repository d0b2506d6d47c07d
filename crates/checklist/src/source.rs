//! Read-only access to the record store.
//!
//! The engine only ever asks two questions: "what is the latest audit entry
//! for this key" and "how many cumulative rows exist up to this date".

use chrono::NaiveDate;

use crate::model::DailyAuditEntry;

/// Ranked point lookup: the single most recently inserted daily entry for a
/// (company, layout, date) key.
///
/// Ranking is by `inserted_at` descending. Entries with identical timestamps
/// rank by insertion order, later first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestEntryQuery<'a> {
    pub company_id: i64,
    pub layout: &'a str,
    pub reference_date: NaiveDate,
}

impl LatestEntryQuery<'_> {
    pub fn matches(&self, entry: &DailyAuditEntry) -> bool {
        entry.company_id == self.company_id
            && entry.layout == self.layout
            && entry.reference_date == self.reference_date
    }

    /// Apply the ranking to entries given in insertion order.
    pub fn pick<'e, I>(&self, entries: I) -> Option<&'e DailyAuditEntry>
    where
        I: IntoIterator<Item = &'e DailyAuditEntry>,
    {
        // max_by_key keeps the last of equal maxima, which is the later insertion.
        entries
            .into_iter()
            .filter(|e| self.matches(e))
            .max_by_key(|e| e.inserted_at)
    }
}

pub trait AuditSource {
    type Error: std::error::Error + Send + Sync + 'static;

    fn latest_entry(&self, query: &LatestEntryQuery<'_>) -> Result<Option<DailyAuditEntry>, Self::Error>;

    /// Number of cumulative rows for (company, layout) with date <= `up_to`.
    fn cumulative_count(&self, company_id: i64, layout: &str, up_to: NaiveDate) -> Result<u64, Self::Error>;
}

// ---------------------------------------------------------------------------
// In-memory source
// ---------------------------------------------------------------------------

/// Vector-backed source for fixtures and tests. Entries are kept in
/// insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pub entries: Vec<DailyAuditEntry>,
    pub counts: Vec<(i64, String, NaiveDate)>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_entry(&mut self, entry: DailyAuditEntry) {
        self.entries.push(entry);
    }

    /// Add `n` cumulative rows dated `date`.
    pub fn push_counts(&mut self, company_id: i64, layout: &str, date: NaiveDate, n: usize) {
        for _ in 0..n {
            self.counts.push((company_id, layout.to_string(), date));
        }
    }
}

impl AuditSource for MemorySource {
    type Error = std::convert::Infallible;

    fn latest_entry(&self, query: &LatestEntryQuery<'_>) -> Result<Option<DailyAuditEntry>, Self::Error> {
        Ok(query.pick(&self.entries).cloned())
    }

    fn cumulative_count(&self, company_id: i64, layout: &str, up_to: NaiveDate) -> Result<u64, Self::Error> {
        Ok(self
            .counts
            .iter()
            .filter(|(c, l, d)| *c == company_id && l == layout && *d <= up_to)
            .count() as u64)
    }
}
