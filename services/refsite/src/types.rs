use std::collections::BTreeMap;

use catalog::{FilterState, HistoryMode, PageInfo};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct ApiError {
    pub error: String,
}

#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
}

/// Locations a client can follow from the current page.
#[derive(Serialize)]
pub struct PageLinks {
    pub first: String,
    pub previous: Option<String>,
    pub next: Option<String>,
    pub last: String,
    pub clear: String,
}

#[derive(Serialize)]
pub struct PageView {
    pub dataset: &'static str,
    pub state: FilterState,
    pub canonical_query: String,
    pub page: PageInfo,
    pub rows: Vec<serde_json::Value>,
    pub links: PageLinks,
}

#[derive(Deserialize)]
pub struct FilterUpdateReq {
    /// Query string the client is currently showing.
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub set: BTreeMap<String, String>,
    /// Reset the text query and every criterion before applying `set`.
    #[serde(default)]
    pub clear: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct NavigationEntry {
    pub location: String,
    pub mode: HistoryMode,
}

#[derive(Serialize)]
pub struct FilterUpdateResp {
    pub location: String,
    pub history: Vec<NavigationEntry>,
    pub state: FilterState,
}
