//! API documentation endpoint.
//!
//! Serves a plain-text description of the available endpoints as JSON at
//! `GET /help`.

use axum::{routing::get, Json, Router};
use serde::Serialize;

const HELP_TEXT: &str = r#"
Available Endpoints:

1. POST /attendance - Add a single attendee's attendance
    Request JSON body:
    {
        "name": "John Doe",
        "workshop_id": "workshop123",
        "present": true,
        "photo_link": "http://example.com/photo.jpg"
    }
    "present" is optional and defaults to true; "photo_link" is optional.

2. POST /attendance/bulk - Add multiple attendees' attendance
    Request JSON body: an array of objects in the same shape as above.
    Every element must carry "name" and "workshop_id".

3. DELETE /attendance/{name}/{workshop_id} - Remove an attendee's attendance
    Example: DELETE /attendance/John%20Doe/workshop123
    Sets the attendance status gauge to 0; nothing is deleted.

Prometheus Metrics:
- GET /metrics - Exposes gauge families for Prometheus to scrape
"#;

/// Help response.
#[derive(Debug, Serialize)]
pub struct HelpResponse {
    /// Endpoint documentation text.
    pub help: &'static str,
}

/// Creates the help routes.
pub fn help_routes() -> Router {
    Router::new().route("/help", get(help))
}

/// Returns endpoint documentation.
async fn help() -> Json<HelpResponse> {
    Json(HelpResponse { help: HELP_TEXT })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_help_lists_endpoints() {
        let app = help_routes();

        let response = app
            .oneshot(Request::builder().uri("/help").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let help: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let text = help["help"].as_str().unwrap();

        assert!(text.contains("POST /attendance"));
        assert!(text.contains("POST /attendance/bulk"));
        assert!(text.contains("DELETE /attendance"));
        assert!(text.contains("GET /metrics"));
    }
}
