use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::macros::normalize_label;
use crate::models::wire;

/// Status value that compares the deadline against "now" instead of the
/// record's own status field.
pub const OVERDUE: &str = "overdue";

/// Named predicates applied to a listing. Unset criteria always pass.
///
/// Deserializes from query strings (`?status=pending&search=roof`); blank
/// values count as unset and unknown names are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    #[serde(default, deserialize_with = "wire::blank_as_none")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "wire::blank_as_none")]
    pub search: Option<String>,
    #[serde(default, deserialize_with = "wire::blank_as_none")]
    pub project: Option<String>,
    #[serde(default, deserialize_with = "wire::blank_as_none")]
    pub specialization: Option<String>,
    #[serde(default, deserialize_with = "wire::blank_as_none")]
    pub worker: Option<String>,
    #[serde(default, deserialize_with = "wire::blank_as_none")]
    pub from: Option<NaiveDate>,
    #[serde(default, deserialize_with = "wire::blank_as_none")]
    pub to: Option<NaiveDate>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn with_project(mut self, key: impl Into<String>) -> Self {
        self.project = Some(key.into());
        self
    }

    pub fn with_worker(mut self, key: impl Into<String>) -> Self {
        self.worker = Some(key.into());
        self
    }

    pub fn with_specialization(mut self, key: impl Into<String>) -> Self {
        self.specialization = Some(key.into());
        self
    }

    pub fn between(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    pub(crate) fn wants_overdue(&self) -> bool {
        self.status
            .as_deref()
            .is_some_and(|status| normalize_label(status) == OVERDUE)
    }

    /// Lowercased search term, if any.
    pub(crate) fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_lowercase)
    }
}

/// Build criteria from `(name, value)` pairs, the shape the dashboard keeps
/// its filter state in. Unknown names and blank values are skipped, as are
/// dates that do not parse.
impl<K, V> FromIterator<(K, V)> for FilterCriteria
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(pairs: I) -> Self {
        let mut criteria = FilterCriteria::default();
        for (name, value) in pairs {
            let value: String = value.into();
            let value = value.trim().to_string();
            if value.is_empty() {
                continue;
            }
            match name.as_ref() {
                "status" => criteria.status = Some(value),
                "search" => criteria.search = Some(value),
                "project" => criteria.project = Some(value),
                "specialization" => criteria.specialization = Some(value),
                "worker" => criteria.worker = Some(value),
                "from" => criteria.from = value.parse().ok(),
                "to" => criteria.to = value.parse().ok(),
                other => log::debug!("Ignoring unknown filter '{}'", other),
            }
        }
        criteria
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn pairs_skip_blanks_and_unknown_names() {
        let criteria: FilterCriteria = [
            ("status", "pending"),
            ("search", "  "),
            ("colour", "red"),
            ("from", "2024-01-31"),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            criteria,
            FilterCriteria::default()
                .with_status("pending")
                .between(NaiveDate::from_ymd_opt(2024, 1, 31), None)
        );
    }

    #[test]
    fn overdue_is_recognized_in_any_case() {
        assert!(FilterCriteria::default().with_status("Overdue").wants_overdue());
        assert!(!FilterCriteria::default().with_status("pending").wants_overdue());
    }

    #[test]
    fn query_strings_treat_blank_as_unset() {
        let criteria: FilterCriteria =
            serde_json::from_value(serde_json::json!({ "status": "", "project": "p-1" }))
                .unwrap();
        assert_eq!(criteria, FilterCriteria::default().with_project("p-1"));
    }
}
