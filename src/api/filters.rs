//! Query scoping for section loads

use std::collections::BTreeMap;

use crate::models::VisitStatus;

/// Key-value constraints applied to every data-section request
///
/// Ordered so that the generated query strings are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    entries: BTreeMap<String, String>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: add a constraint. Blank values are dropped, the way an
    /// empty form field means "no constraint".
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if value.trim().is_empty() {
            self.entries.remove(&key);
        } else {
            self.entries.insert(key, value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Query pairs, in key order
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FilterSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = FilterSet::new();
        for (k, v) in iter {
            set.insert(k, v);
        }
        set
    }
}

/// Parameters of `GET /visits`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisitQuery {
    pub status: Option<VisitStatus>,
    pub limit: Option<usize>,
    pub filters: FilterSet,
}

impl VisitQuery {
    /// Every visit, unfiltered
    pub fn all() -> Self {
        Self::default()
    }

    /// The first `limit` planned visits
    pub fn planned(limit: usize) -> Self {
        Self {
            status: Some(VisitStatus::Planned),
            limit: Some(limit),
            filters: FilterSet::new(),
        }
    }

    /// Builder method: scope by a filter set
    pub fn filtered(mut self, filters: &FilterSet) -> Self {
        self.filters = filters.clone();
        self
    }

    /// Query pairs: `status`, `limit`, then the filters
    pub fn pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(status) = self.status {
            pairs.push(("status".to_string(), status.as_str().to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        merge_filters(pairs, &self.filters)
    }
}

/// Append the filters to built-in query pairs
///
/// A filter whose key is already present is skipped: the built-in value wins,
/// so a request never carries two values for the same key.
pub(crate) fn merge_filters(
    mut pairs: Vec<(String, String)>,
    filters: &FilterSet,
) -> Vec<(String, String)> {
    for (key, value) in filters.pairs() {
        if pairs.iter().any(|(k, _)| k == key) {
            tracing::debug!(key, "Filter shadowed by a built-in query parameter");
            continue;
        }
        pairs.push((key.to_string(), value.to_string()));
    }
    pairs
}
