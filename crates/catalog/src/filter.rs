//! Conjunctive filtering of a dataset.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::paginate::parse_page;
use crate::url_state::{QueryParams, PAGE_KEY, QUERY_KEY, WILDCARD};
use crate::{Record, TableSpec};

/// Current value of one categorical criterion.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Selection {
    #[default]
    All,
    Value(String),
}

impl Selection {
    /// Empty input and the `all` sentinel both mean no constraint.
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() || raw == WILDCARD {
            Selection::All
        } else {
            Selection::Value(raw.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Selection::All => None,
            Selection::Value(v) => Some(v),
        }
    }
}

impl From<&str> for Selection {
    fn from(raw: &str) -> Self {
        Selection::parse(raw)
    }
}

/// Free-text query, one selection per criterion key, and the requested page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FilterState {
    pub query: String,
    pub selections: BTreeMap<String, Selection>,
    pub page: usize,
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterState {
    pub fn new() -> Self {
        Self { query: String::new(), selections: BTreeMap::new(), page: 1 }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self.page = 1;
        self
    }

    pub fn with_selection(mut self, key: impl Into<String>, selection: impl Into<Selection>) -> Self {
        self.selections.insert(key.into(), selection.into());
        self.page = 1;
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page.max(1);
        self
    }

    /// Selection for `key`; unknown keys are unconstrained.
    pub fn selection(&self, key: &str) -> &Selection {
        static ALL: Selection = Selection::All;
        self.selections.get(key).unwrap_or(&ALL)
    }

    pub fn is_unfiltered(&self) -> bool {
        self.query.is_empty() && self.selections.values().all(Selection::is_all)
    }

    /// Read the state for `spec` out of URL query parameters. Keys that are
    /// not criteria of this table are ignored.
    pub fn from_params(spec: &TableSpec, params: &QueryParams) -> Self {
        let selections = spec
            .criteria
            .iter()
            .map(|c| (c.key.to_string(), Selection::parse(params.get(c.key).unwrap_or(""))))
            .collect();

        Self {
            query: params.get(QUERY_KEY).unwrap_or("").to_string(),
            selections,
            page: parse_page(params.get(PAGE_KEY)),
        }
    }
}

/// Whether `record` satisfies every active criterion of `state`.
pub fn matches<R: Record>(record: &R, spec: &TableSpec, state: &FilterState) -> bool {
    if !state.query.is_empty() {
        let needle = state.query.to_lowercase();
        let hit = spec
            .search_fields
            .iter()
            .filter_map(|name| record.field(name))
            .any(|value| value.contains_lowercase(&needle));
        if !hit {
            return false;
        }
    }

    spec.criteria.iter().all(|criterion| match state.selection(criterion.key).value() {
        None => true,
        Some(wanted) => record
            .field(criterion.field)
            .is_some_and(|value| value.matches_value(wanted)),
    })
}

/// The filtered view: records matching `state`, in dataset order.
pub fn apply<'a, R: Record>(records: &'a [R], spec: &TableSpec, state: &FilterState) -> Vec<&'a R> {
    records.iter().filter(|r| matches(*r, spec, state)).collect()
}
