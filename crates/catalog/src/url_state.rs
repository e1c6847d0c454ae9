//! Two-way binding between [`FilterState`] and a URL query string.
//!
//! The query string is the source of truth: every mutation rewrites the
//! parameters, hands the new location to a [`Navigator`], and re-derives the
//! filter state from the rewritten parameters.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{FilterState, TableSpec};

pub const QUERY_KEY: &str = "q";
pub const PAGE_KEY: &str = "page";
pub const WILDCARD: &str = "all";

/// Ordered query parameters with `URLSearchParams` semantics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `a=1&b=two%20words`, with or without a leading `?`.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        let pairs = raw
            .split('&')
            .filter(|part| !part.is_empty())
            .map(|part| match part.split_once('=') {
                Some((k, v)) => (decode(k), decode(v)),
                None => (decode(part), String::new()),
            })
            .collect();
        Self { pairs }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// Replace the first `key` in place and drop any later duplicates, or
    /// append when absent.
    pub fn set(&mut self, key: &str, value: &str) {
        let mut seen = false;
        self.pairs.retain_mut(|(k, v)| {
            if k != key {
                return true;
            }
            if seen {
                return false;
            }
            seen = true;
            *v = value.to_string();
            true
        });
        if !seen {
            self.pairs.push((key.to_string(), value.to_string()));
        }
    }

    pub fn remove(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `?`-prefixed location, or an empty string when there are no params.
    pub fn to_location(&self) -> String {
        if self.is_empty() {
            String::new()
        } else {
            format!("?{self}")
        }
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (k, v)) in self.pairs.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(f, "{}={}", urlencoding::encode(k), urlencoding::encode(v))?;
        }
        Ok(())
    }
}

fn decode(raw: &str) -> String {
    let raw = raw.replace('+', " ");
    match urlencoding::decode(&raw) {
        Ok(s) => s.into_owned(),
        Err(_) => String::from_utf8_lossy(&urlencoding::decode_binary(raw.as_bytes())).into_owned(),
    }
}

/// Empty values never constrain. `all` is the sentinel of categorical keys
/// only; as a text query it is an ordinary search term.
fn is_wildcard(key: &str, value: &str) -> bool {
    value.is_empty() || (key != QUERY_KEY && value == WILDCARD)
}

/// Upsert `updates` into a copy of `current`. Wildcard values remove their
/// key. Unless `page` itself is being updated, the page resets to 1. The
/// result is canonical, so stale wildcards already in `current` are dropped.
pub fn apply_updates(current: &QueryParams, updates: &[(&str, &str)]) -> QueryParams {
    let mut next = canonicalize(current);
    for (key, value) in updates {
        if is_wildcard(key, value) {
            next.remove(key);
        } else {
            next.set(key, value);
        }
    }
    if !updates.iter().any(|(key, _)| *key == PAGE_KEY) {
        next.set(PAGE_KEY, "1");
    }
    next
}

/// Drop empty values and categorical `all` values so links stay canonical.
pub fn canonicalize(params: &QueryParams) -> QueryParams {
    QueryParams {
        pairs: params.pairs.iter().filter(|(k, v)| !is_wildcard(k, v)).cloned().collect(),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryMode {
    Push,
    Replace,
}

/// Side effect that moves the address bar to a new location without a
/// document reload.
pub trait Navigator {
    fn navigate(&mut self, location: &str, mode: HistoryMode);
}

impl<N: Navigator + ?Sized> Navigator for &mut N {
    fn navigate(&mut self, location: &str, mode: HistoryMode) {
        (**self).navigate(location, mode);
    }
}

/// In-memory history stack.
#[derive(Clone, Debug, Default)]
pub struct MemoryHistory {
    entries: Vec<String>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn current(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }
}

impl Navigator for MemoryHistory {
    fn navigate(&mut self, location: &str, mode: HistoryMode) {
        match (mode, self.entries.last_mut()) {
            (HistoryMode::Replace, Some(last)) => *last = location.to_string(),
            _ => self.entries.push(location.to_string()),
        }
    }
}

/// Filter state for one table, mirrored into the URL on every change.
pub struct FilterSession<'s, N: Navigator> {
    spec: &'s TableSpec,
    params: QueryParams,
    state: FilterState,
    navigator: N,
    mode: HistoryMode,
}

impl<'s, N: Navigator> FilterSession<'s, N> {
    /// Start from the location's current query string.
    pub fn new(spec: &'s TableSpec, query: &str, navigator: N) -> Self {
        let params = QueryParams::parse(query);
        let state = FilterState::from_params(spec, &params);
        Self { spec, params, state, navigator, mode: HistoryMode::Push }
    }

    pub fn with_history_mode(mut self, mode: HistoryMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn params(&self) -> &QueryParams {
        &self.params
    }

    pub fn location(&self) -> String {
        self.params.to_location()
    }

    pub fn into_navigator(self) -> N {
        self.navigator
    }

    /// Free-text query. Uses `Replace` so typing does not flood history.
    pub fn set_query(&mut self, text: &str) {
        self.commit(&[(QUERY_KEY, text)], HistoryMode::Replace);
    }

    pub fn select(&mut self, key: &str, value: &str) {
        self.commit(&[(key, value)], self.mode);
    }

    /// Several keys in one transition.
    pub fn update(&mut self, updates: &[(&str, &str)]) {
        self.commit(updates, self.mode);
    }

    pub fn go_to_page(&mut self, page: usize) {
        let page = page.max(1).to_string();
        self.commit(&[(PAGE_KEY, page.as_str())], self.mode);
    }

    /// Reset the text query and every criterion of this table.
    pub fn clear_filters(&mut self) {
        let mut updates: Vec<(&str, &str)> = vec![(QUERY_KEY, "")];
        updates.extend(self.spec.criteria.iter().map(|c| (c.key, WILDCARD)));
        self.commit(&updates, self.mode);
    }

    fn commit(&mut self, updates: &[(&str, &str)], mode: HistoryMode) {
        let next = apply_updates(&self.params, updates);
        if next == self.params {
            return;
        }
        self.params = next;
        self.state = FilterState::from_params(self.spec, &self.params);
        let location = self.params.to_location();
        self.navigator.navigate(&location, mode);
    }
}
