use chrono::{DateTime, NaiveDate, Utc};

/// Whole days elapsed from `reference` to `as_of`, at UTC day granularity.
///
/// Negative means not yet due. Deliberately asymmetric: only the forward
/// direction is meaningful for aging.
pub fn days_overdue(reference: NaiveDate, as_of: NaiveDate) -> i64 {
    as_of.signed_duration_since(reference).num_days()
}

/// Day-granular aging for timestamped records; collapses through the UTC
/// calendar day to avoid timezone drift.
pub fn days_overdue_utc(reference: DateTime<Utc>, as_of: NaiveDate) -> i64 {
    days_overdue(reference.date_naive(), as_of)
}

/// Whether a creation timestamp is strictly more than `cutoff_days` in the
/// past relative to `as_of`. Used by the overdue-client surface, always ANDed
/// with the status-set filter.
pub fn past_cutoff(created_at: DateTime<Utc>, as_of: NaiveDate, cutoff_days: i64) -> bool {
    days_overdue_utc(created_at, as_of) > cutoff_days
}
