use axum::{
    extract::{Path, RawQuery, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use catalog::{CatalogError, FilterState, QueryParams};
use tracing::{debug, warn};

use crate::routes_datasets::{api_error, find_dataset, ApiResult};
use crate::state::SharedState;

/// Download of the full filtered view as CSV. Pagination is ignored.
pub async fn export_csv(
    State(state): State<SharedState>,
    Path(slug): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> ApiResult<Response> {
    let table = find_dataset(&state, &slug)?;
    let params = QueryParams::parse(query.as_deref().unwrap_or_default());
    let filters = FilterState::from_params(table.spec(), &params);

    let csv = match table.export(&filters) {
        Ok(csv) => csv,
        Err(CatalogError::EmptyExport) => {
            warn!(dataset = %slug, query = %filters.query, "export refused: no matching records");
            return Err(api_error(StatusCode::UNPROCESSABLE_ENTITY, CatalogError::EmptyExport.to_string()));
        }
        Err(e) => return Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())),
    };

    let etag = format!("\"{}\"", hex::encode(blake3::hash(csv.body.as_bytes()).as_bytes()));
    if headers
        .get(header::IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == etag)
    {
        return Ok((StatusCode::NOT_MODIFIED, [(header::ETAG, etag)]).into_response());
    }

    debug!(dataset = %slug, rows = csv.rows, bytes = csv.body.len(), "export served");

    Ok((
        [
            (header::CONTENT_TYPE, csv.content_type.to_string()),
            (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", csv.filename)),
            (header::ETAG, etag),
        ],
        csv.body,
    )
        .into_response())
}
