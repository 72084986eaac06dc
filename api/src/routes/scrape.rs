//! Metric scrape endpoint.
//!
//! Serves the current registry snapshot in Prometheus text exposition
//! format at `GET /metrics`.

use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    routing::get,
    Router,
};
use shared::metrics::expose;

/// Creates the scrape routes with application state.
pub fn scrape_routes(state: AppState) -> Router {
    Router::new()
        .route("/metrics", get(scrape))
        .with_state(state)
}

/// Renders every gauge family as exposition text.
///
/// The snapshot reflects all writes completed before the read began;
/// writes racing with the scrape may appear in one family and not yet in
/// another, which the exposition contract allows.
async fn scrape(State(state): State<AppState>) -> (HeaderMap, String) {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(expose::CONTENT_TYPE),
    );
    (headers, state.registry().render())
}
