//! Client-side narrowing of already-fetched record lists.
//!
//! Every set criterion must hold (logical AND). Evaluation never fails: a
//! record that lacks the field a criterion looks at is just left out.

mod criteria;
mod record;

pub use criteria::{FilterCriteria, OVERDUE};
pub use record::{Filterable, ReferenceKind};

use chrono::{DateTime, Utc};

use crate::models::macros::normalize_label;

/// Keep the records matching every criterion, evaluated against the current time.
pub fn filter_records<T, I>(records: I, criteria: &FilterCriteria) -> Vec<T>
where
    T: Filterable,
    I: IntoIterator<Item = T>,
{
    filter_records_at(records, criteria, Utc::now())
}

/// Same as [`filter_records`] with an explicit "now" for the overdue check.
pub fn filter_records_at<T, I>(records: I, criteria: &FilterCriteria, now: DateTime<Utc>) -> Vec<T>
where
    T: Filterable,
    I: IntoIterator<Item = T>,
{
    if criteria.is_empty() {
        return records.into_iter().collect();
    }
    let search = criteria.search_term();
    records
        .into_iter()
        .filter(|record| evaluate(record, criteria, search.as_deref(), now))
        .collect()
}

/// Whether a single record satisfies `criteria`.
pub fn matches<T: Filterable>(record: &T, criteria: &FilterCriteria, now: DateTime<Utc>) -> bool {
    evaluate(record, criteria, criteria.search_term().as_deref(), now)
}

fn evaluate<T: Filterable>(
    record: &T,
    criteria: &FilterCriteria,
    search: Option<&str>,
    now: DateTime<Utc>,
) -> bool {
    status_matches(record, criteria, now)
        && search.is_none_or(|term| search_matches(record, term))
        && reference_matches(record, ReferenceKind::Project, criteria.project.as_deref())
        && reference_matches(
            record,
            ReferenceKind::Specialization,
            criteria.specialization.as_deref(),
        )
        && reference_matches(record, ReferenceKind::Worker, criteria.worker.as_deref())
        && date_matches(record, criteria)
}

fn status_matches<T: Filterable>(record: &T, criteria: &FilterCriteria, now: DateTime<Utc>) -> bool {
    let Some(wanted) = criteria.status.as_deref() else {
        return true;
    };
    if criteria.wants_overdue() {
        return record.deadline().is_some_and(|deadline| deadline < now);
    }
    let wanted = normalize_label(wanted);
    record
        .status_labels()
        .into_iter()
        .any(|status| normalize_label(status) == wanted)
}

fn search_matches<T: Filterable>(record: &T, term: &str) -> bool {
    record
        .search_fields()
        .into_iter()
        .any(|field| field.to_lowercase().contains(term))
}

fn reference_matches<T: Filterable>(record: &T, kind: ReferenceKind, key: Option<&str>) -> bool {
    let Some(key) = key.map(str::trim) else {
        return true;
    };
    record
        .references(kind)
        .into_iter()
        .any(|reference| reference.matches_key(key))
}

fn date_matches<T: Filterable>(record: &T, criteria: &FilterCriteria) -> bool {
    if criteria.from.is_none() && criteria.to.is_none() {
        return true;
    }
    let Some(date) = record.primary_date() else {
        return false;
    };
    criteria.from.is_none_or(|from| date >= from) && criteria.to.is_none_or(|to| date <= to)
}
