use std::sync::Arc;

use axum::{
    extract::{Path, RawQuery, State},
    http::StatusCode,
    Json,
};
use catalog::{
    apply_updates, canonicalize, Catalog, DatasetInfo, FilterSession, FilterState, HistoryMode, Navigator,
    QueryParams, PAGE_KEY, QUERY_KEY, WILDCARD,
};
use tracing::{debug, warn};

use crate::state::SharedState;
use crate::types::{ApiError, FilterUpdateReq, FilterUpdateResp, NavigationEntry, PageLinks, PageView};

pub type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

pub fn api_error(status: StatusCode, error: impl Into<String>) -> (StatusCode, Json<ApiError>) {
    (status, Json(ApiError { error: error.into() }))
}

pub fn find_dataset(state: &SharedState, slug: &str) -> ApiResult<Arc<dyn Catalog>> {
    state.library.get(slug).ok_or_else(|| {
        warn!(dataset = %slug, "unknown dataset");
        api_error(StatusCode::NOT_FOUND, format!("unknown dataset: {slug}"))
    })
}

pub async fn list_datasets(State(state): State<SharedState>) -> Json<Vec<DatasetInfo>> {
    Json(state.library.iter().map(|t| t.info()).collect())
}

pub async fn get_page(
    State(state): State<SharedState>,
    Path(slug): Path<String>,
    RawQuery(query): RawQuery,
) -> ApiResult<Json<PageView>> {
    let table = find_dataset(&state, &slug)?;
    let spec = *table.spec();

    let params = QueryParams::parse(query.as_deref().unwrap_or_default());
    let filters = FilterState::from_params(&spec, &params);
    let page = table
        .page(&filters)
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    debug!(dataset = spec.slug, query = %filters.query, matches = page.page.total_items, "page served");

    let canonical = canonicalize(&params);
    let info = page.page;
    let at_page = |n: usize| {
        let n = n.to_string();
        link(spec.slug, &apply_updates(&canonical, &[(PAGE_KEY, n.as_str())]))
    };

    let mut clear: Vec<(&str, &str)> = vec![(QUERY_KEY, "")];
    clear.extend(spec.criteria.iter().map(|c| (c.key, WILDCARD)));

    let links = PageLinks {
        first: at_page(1),
        previous: info.has_previous.then(|| at_page(info.page - 1)),
        next: info.has_next.then(|| at_page(info.page + 1)),
        last: at_page(info.total_pages),
        clear: link(spec.slug, &apply_updates(&canonical, &clear)),
    };

    Ok(Json(PageView {
        dataset: spec.slug,
        state: FilterState { page: info.page, ..filters },
        canonical_query: canonical.to_string(),
        page: info,
        rows: page.rows,
        links,
    }))
}

pub async fn post_filters(
    State(state): State<SharedState>,
    Path(slug): Path<String>,
    Json(req): Json<FilterUpdateReq>,
) -> ApiResult<Json<FilterUpdateResp>> {
    let table = find_dataset(&state, &slug)?;
    let spec = table.spec();

    let mut recorder = Recorder::default();
    let mut session = FilterSession::new(spec, &req.query, &mut recorder);

    if req.clear {
        session.clear_filters();
    }
    let updates: Vec<(&str, &str)> = req.set.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
    match updates.as_slice() {
        [] => {}
        [(QUERY_KEY, text)] => session.set_query(text),
        _ => session.update(&updates),
    }

    let location = session.location();
    let filters = session.state().clone();
    drop(session);

    debug!(dataset = spec.slug, %location, transitions = recorder.entries.len(), "filters updated");

    Ok(Json(FilterUpdateResp { location, history: recorder.entries, state: filters }))
}

/// Collects navigations so the client can replay them against its own
/// history.
#[derive(Default)]
struct Recorder {
    entries: Vec<NavigationEntry>,
}

impl Navigator for Recorder {
    fn navigate(&mut self, location: &str, mode: HistoryMode) {
        self.entries.push(NavigationEntry { location: location.to_string(), mode });
    }
}

fn link(slug: &str, params: &QueryParams) -> String {
    format!("/datasets/{slug}{}", params.to_location())
}
