mod config;
mod routes_datasets;
mod routes_export;
mod state;
mod types;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Json, Router,
};
use standards::Library;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::state::{AppState, SharedState};
use crate::types::Health;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("refsite=info,standards=info")),
        )
        .init();

    let cfg = AppConfig::from_env()?;

    let library = Library::load(cfg.data_dir.as_deref()).context("Failed to load datasets")?;
    info!(datasets = library.len(), "library ready");

    let mut app = app(Arc::new(AppState::new(library)));
    if cfg.cors_permissive {
        app = app.layer(CorsLayer::permissive());
    }

    let listener = tokio::net::TcpListener::bind(cfg.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", cfg.bind_addr))?;
    info!(addr = %cfg.bind_addr, "refsite listening");
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn app(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/datasets", get(routes_datasets::list_datasets))
        .route("/datasets/:slug", get(routes_datasets::get_page))
        .route("/datasets/:slug/filters", post(routes_datasets::post_filters))
        .route("/datasets/:slug/export.csv", get(routes_export::export_csv))
        .with_state(state)
}

async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use tower::ServiceExt;

    fn builtin_app() -> Router {
        let library = Library::builtin().unwrap_or_else(|err| panic!("built-in datasets failed to load: {err}"));
        app(Arc::new(AppState::new(library)))
    }

    async fn send(router: Router, request: Request<Body>) -> Response {
        match router.oneshot(request).await {
            Ok(response) => response,
            Err(err) => panic!("router request failed: {err}"),
        }
    }

    async fn get_uri(router: Router, uri: &str) -> Response {
        let request = Request::builder()
            .uri(uri)
            .method("GET")
            .body(Body::empty())
            .unwrap_or_else(|err| panic!("failed to build request: {err}"));
        send(router, request).await
    }

    async fn post_json(router: Router, uri: &str, body: serde_json::Value) -> Response {
        let request = Request::builder()
            .uri(uri)
            .method("POST")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap_or_else(|err| panic!("failed to build request: {err}"));
        send(router, request).await
    }

    async fn body_text(response: Response) -> String {
        let bytes = match to_bytes(response.into_body(), 1024 * 1024).await {
            Ok(bytes) => bytes,
            Err(err) => panic!("failed to read response body: {err}"),
        };
        match String::from_utf8(bytes.to_vec()) {
            Ok(body) => body,
            Err(err) => panic!("response body is not UTF-8: {err}"),
        }
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let body = body_text(response).await;
        match serde_json::from_str(&body) {
            Ok(value) => value,
            Err(err) => panic!("response body is not JSON: {err}; body={body}"),
        }
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let response = get_uri(builtin_app(), "/health").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn lists_every_dataset_with_facets() {
        let response = get_uri(builtin_app(), "/datasets").await;
        assert_eq!(response.status(), StatusCode::OK);

        let value = body_json(response).await;
        let datasets = value.as_array().unwrap_or_else(|| panic!("expected a list: {value}"));
        assert_eq!(datasets.len(), 4);
        assert_eq!(datasets[1]["slug"], "pdf-ua-errors");
        assert_eq!(datasets[1]["page_size"], 15);
        assert_eq!(datasets[1]["criteria"][1]["options"], serde_json::json!(["Error", "Warning", "Need manual"]));
    }

    #[tokio::test]
    async fn unknown_dataset_is_not_found() {
        let router = builtin_app();
        let response = get_uri(router.clone(), "/datasets/section-508").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "unknown dataset: section-508");

        let response = get_uri(router, "/datasets/section-508/export.csv").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn page_applies_query_and_criteria() {
        let response = get_uri(builtin_app(), "/datasets/wcag-guidelines?q=KEYBOARD&level=A&principle=all").await;
        assert_eq!(response.status(), StatusCode::OK);

        let value = body_json(response).await;
        assert_eq!(value["page"]["total_items"], 1);
        assert_eq!(value["rows"][0]["id"], "2.1.1");
        assert_eq!(value["state"]["query"], "KEYBOARD");
        assert_eq!(value["canonical_query"], "q=KEYBOARD&level=A");
    }

    #[tokio::test]
    async fn page_links_navigate_and_clear() {
        let response = get_uri(builtin_app(), "/datasets/pdf-ua-errors?q=&severity=all&page=2").await;
        let value = body_json(response).await;

        assert_eq!(value["page"]["page"], 2);
        assert_eq!(value["page"]["total_pages"], 6);
        assert_eq!(value["rows"].as_array().map(Vec::len), Some(15));
        assert_eq!(value["canonical_query"], "page=2");

        let links = &value["links"];
        assert_eq!(links["first"], "/datasets/pdf-ua-errors?page=1");
        assert_eq!(links["previous"], "/datasets/pdf-ua-errors?page=1");
        assert_eq!(links["next"], "/datasets/pdf-ua-errors?page=3");
        assert_eq!(links["last"], "/datasets/pdf-ua-errors?page=6");
        assert_eq!(links["clear"], "/datasets/pdf-ua-errors?page=1");
    }

    #[tokio::test]
    async fn out_of_range_page_is_clamped() {
        let response = get_uri(builtin_app(), "/datasets/pdf-ua-errors?severity=Need%20manual&page=9").await;
        let value = body_json(response).await;

        assert_eq!(value["page"]["total_items"], 4);
        assert_eq!(value["page"]["page"], 1);
        assert_eq!(value["state"]["page"], 1);
        assert!(value["links"]["next"].is_null());
        assert!(value["links"]["previous"].is_null());
    }

    #[tokio::test]
    async fn filter_update_resets_page_and_strips_wildcards() {
        let response = post_json(
            builtin_app(),
            "/datasets/wcag-guidelines/filters",
            serde_json::json!({
                "query": "?level=AA&page=3&principle=Operable",
                "set": { "principle": "all" }
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let value = body_json(response).await;
        assert_eq!(value["location"], "?level=AA&page=1");
        assert_eq!(value["history"], serde_json::json!([{ "location": "?level=AA&page=1", "mode": "push" }]));
        assert_eq!(value["state"]["page"], 1);
        assert_eq!(value["state"]["selections"]["level"], "AA");
    }

    #[tokio::test]
    async fn filter_update_drops_stale_wildcards() {
        let response = post_json(
            builtin_app(),
            "/datasets/wcag-guidelines/filters",
            serde_json::json!({
                "query": "?level=all&principle=Operable",
                "set": { "principle": "Robust" }
            }),
        )
        .await;

        let value = body_json(response).await;
        assert_eq!(value["location"], "?principle=Robust&page=1");
        assert_eq!(value["history"][0]["location"], "?principle=Robust&page=1");
    }

    #[tokio::test]
    async fn text_query_all_survives_in_links() {
        let response = get_uri(builtin_app(), "/datasets/wcag-guidelines?q=all&level=all").await;
        let value = body_json(response).await;

        assert_eq!(value["state"]["query"], "all");
        assert_eq!(value["canonical_query"], "q=all");
        assert_eq!(value["links"]["first"], "/datasets/wcag-guidelines?q=all&page=1");
    }

    #[tokio::test]
    async fn typing_a_query_replaces_history() {
        let response = post_json(
            builtin_app(),
            "/datasets/readability-metrics/filters",
            serde_json::json!({ "query": "?category=Readability", "set": { "q": "flesch" } }),
        )
        .await;

        let value = body_json(response).await;
        assert_eq!(value["location"], "?category=Readability&q=flesch&page=1");
        assert_eq!(value["history"][0]["mode"], "replace");
    }

    #[tokio::test]
    async fn unchanged_filters_do_not_navigate() {
        let response = post_json(
            builtin_app(),
            "/datasets/pdf-ua-terms/filters",
            serde_json::json!({ "query": "?q=unicode&page=1", "set": { "q": "unicode" } }),
        )
        .await;

        let value = body_json(response).await;
        assert_eq!(value["location"], "?q=unicode&page=1");
        assert_eq!(value["history"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn clear_resets_every_filter() {
        let response = post_json(
            builtin_app(),
            "/datasets/pdf-ua-errors/filters",
            serde_json::json!({ "query": "?q=font&category=Fonts&severity=Error&page=2", "clear": true }),
        )
        .await;

        let value = body_json(response).await;
        assert_eq!(value["location"], "?page=1");
        assert_eq!(value["state"]["query"], "");
    }

    #[tokio::test]
    async fn export_downloads_the_filtered_view() {
        let response = get_uri(builtin_app(), "/datasets/pdf-ua-errors/export.csv?severity=Need+manual&page=2").await;
        assert_eq!(response.status(), StatusCode::OK);

        let headers = response.headers().clone();
        assert_eq!(headers[header::CONTENT_TYPE], "text/csv; charset=utf-8");
        assert_eq!(headers[header::CONTENT_DISPOSITION], "attachment; filename=\"pdf-ua-errors.csv\"");
        assert!(headers.contains_key(header::ETAG));

        let body = body_text(response).await;
        let lines: Vec<&str> = body.split('\n').collect();
        assert_eq!(lines[0], "\"Category\",\"Code\",\"Severity\",\"Message\",\"Guideline\",\"Fix Hint\"");
        assert_eq!(lines.len(), 5);
        assert!(lines[1..].iter().all(|l| l.contains("\"Need manual\"")));
    }

    #[tokio::test]
    async fn export_honours_if_none_match() {
        let router = builtin_app();
        let response = get_uri(router.clone(), "/datasets/pdf-ua-terms/export.csv").await;
        let etag = response.headers()[header::ETAG].clone();

        let request = Request::builder()
            .uri("/datasets/pdf-ua-terms/export.csv")
            .header(header::IF_NONE_MATCH, etag)
            .body(Body::empty())
            .unwrap_or_else(|err| panic!("failed to build request: {err}"));
        let response = send(router, request).await;
        assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
    }

    #[tokio::test]
    async fn empty_export_is_refused() {
        let response = get_uri(builtin_app(), "/datasets/wcag-guidelines/export.csv?q=no-such-criterion").await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");

        let value = body_json(response).await;
        assert_eq!(value["error"], "nothing to export: no records match the current filters");
    }

    #[tokio::test]
    async fn override_directory_is_served() {
        let dir = tempfile::tempdir().unwrap_or_else(|err| panic!("tempdir: {err}"));
        let terms = r#"[{"term": "Alt Text", "description": "Text alternative", "importance": "Images"}]"#;
        std::fs::write(dir.path().join("pdf-ua-terms.json"), terms).unwrap_or_else(|err| panic!("write: {err}"));

        let library = Library::load(Some(dir.path())).unwrap_or_else(|err| panic!("load: {err}"));
        let router = app(Arc::new(AppState::new(library)));

        let value = body_json(get_uri(router, "/datasets/pdf-ua-terms").await).await;
        assert_eq!(value["page"]["total_items"], 1);
        assert_eq!(value["rows"][0]["term"], "Alt Text");
    }
}
