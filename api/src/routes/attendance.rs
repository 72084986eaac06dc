//! Attendance ingestion endpoints.
//!
//! Thin adapter over the attendance gauge registry:
//!
//! - `POST /attendance` - record a single attendee
//! - `POST /attendance/bulk` - record a batch of attendees
//! - `DELETE /attendance/{name}/{workshop_id}` - mark an attendee as not present
//!
//! Removal never deletes a series; it only sets the attendance status
//! gauge to 0 for the empty-photo label tuple.

use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use shared::models::{AttendanceDraft, AttendanceError, AttendanceRecord};

/// Success response carrying a human-readable message.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Outcome description.
    pub message: String,
}

/// Response for bulk ingestion.
#[derive(Debug, Serialize, Deserialize)]
pub struct BulkResponse {
    /// Number of records applied.
    pub accepted: usize,
    /// Outcome description.
    pub message: String,
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct AttendanceApiError {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

impl AttendanceApiError {
    fn missing_field(err: &AttendanceError) -> (StatusCode, Json<Self>) {
        (
            StatusCode::BAD_REQUEST,
            Json(Self {
                error: "missing_field".to_string(),
                message: err.to_string(),
            }),
        )
    }

    fn invalid_record(err: &shared::validator::ValidationErrors) -> (StatusCode, Json<Self>) {
        (
            StatusCode::BAD_REQUEST,
            Json(Self {
                error: "invalid_record".to_string(),
                message: err.to_string(),
            }),
        )
    }
}

/// Creates the attendance routes with application state.
pub fn attendance_routes(state: AppState) -> Router {
    Router::new()
        .route("/attendance", post(record_attendance))
        .route("/attendance/bulk", post(bulk_attendance))
        .route(
            "/attendance/{name}/{workshop_id}",
            delete(remove_attendance),
        )
        .with_state(state)
}

/// Records a single attendee.
///
/// The body is treated as a draft so that a missing `name` or
/// `workshop_id` is reported as a field-level error rather than an opaque
/// deserialization failure. Identity strings must be non-empty; that
/// validation belongs to this adapter, not to the registry.
async fn record_attendance(
    State(state): State<AppState>,
    Json(draft): Json<AttendanceDraft>,
) -> Result<Json<MessageResponse>, (StatusCode, Json<AttendanceApiError>)> {
    let (name, workshop_id) = draft
        .identity(0)
        .map_err(|e| AttendanceApiError::missing_field(&e))?;

    let record = AttendanceRecord {
        name: name.to_string(),
        workshop_id: workshop_id.to_string(),
        present: draft.is_present(),
        photo_link: draft.photo_link.clone(),
    };
    record
        .validate_record()
        .map_err(|e| AttendanceApiError::invalid_record(&e))?;

    state.registry().record(
        &record.name,
        &record.workshop_id,
        record.present,
        record.photo_link.as_deref(),
    );

    Ok(Json(MessageResponse {
        message: "Attendance recorded successfully".to_string(),
    }))
}

/// Records a batch of attendees.
///
/// Drafts are applied in input order; later records for the same identity
/// overwrite earlier ones. A draft lacking a required field fails the
/// request with 400, and drafts past the failing one are not applied.
async fn bulk_attendance(
    State(state): State<AppState>,
    Json(drafts): Json<Vec<AttendanceDraft>>,
) -> Result<Json<BulkResponse>, (StatusCode, Json<AttendanceApiError>)> {
    let accepted = state
        .registry()
        .bulk_update(&drafts)
        .map_err(|e| AttendanceApiError::missing_field(&e))?;

    Ok(Json(BulkResponse {
        accepted,
        message: format!("Recorded attendance for {accepted} attendees"),
    }))
}

/// Marks an attendee as not present.
///
/// Only ever sets the status gauge to 0 with the photo label empty; no
/// series is deleted and the timestamp gauges still advance.
async fn remove_attendance(
    State(state): State<AppState>,
    Path((name, workshop_id)): Path<(String, String)>,
) -> Json<MessageResponse> {
    state.registry().record(&name, &workshop_id, false, None);

    Json(MessageResponse {
        message: "Attendance removed successfully".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_router() -> (Router, AppState) {
        let state = AppState::with_fresh_registry();
        (attendance_routes(state.clone()), state)
    }

    fn status_tuple(name: &str, workshop: &str, photo: &str) -> Vec<String> {
        vec![name.to_string(), workshop.to_string(), photo.to_string()]
    }

    #[tokio::test]
    async fn test_record_single_attendee() {
        let (app, state) = test_router();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/attendance")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"name": "Ada Lovelace", "workshop_id": "WORKSHOP-001"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            state
                .registry()
                .status()
                .get(&status_tuple("Ada Lovelace", "WORKSHOP-001", "")),
            Some(1.0)
        );
    }

    #[tokio::test]
    async fn test_record_with_photo_and_absence() {
        let (app, state) = test_router();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/attendance")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"name": "Ada", "workshop_id": "W1", "present": false, "photo_link": "https://example.com/a.jpg"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            state
                .registry()
                .status()
                .get(&status_tuple("Ada", "W1", "https://example.com/a.jpg")),
            Some(0.0)
        );
    }

    #[tokio::test]
    async fn test_record_missing_workshop_id_is_400() {
        let (app, state) = test_router();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/attendance")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"name": "Ada"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let error: AttendanceApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.error, "missing_field");

        assert!(state.registry().status().is_empty());
    }

    #[tokio::test]
    async fn test_record_empty_name_is_400() {
        let (app, state) = test_router();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/attendance")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"name": "", "workshop_id": "W1"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(state.registry().status().is_empty());
    }

    #[tokio::test]
    async fn test_bulk_defaults_present_to_true() {
        let (app, state) = test_router();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/attendance/bulk")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"[
                            {"name": "A", "workshop_id": "W1", "present": true},
                            {"name": "B", "workshop_id": "W1"}
                        ]"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let result: BulkResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(result.accepted, 2);

        assert_eq!(
            state.registry().status().get(&status_tuple("A", "W1", "")),
            Some(1.0)
        );
        assert_eq!(
            state.registry().status().get(&status_tuple("B", "W1", "")),
            Some(1.0)
        );
    }

    #[tokio::test]
    async fn test_bulk_missing_field_is_400() {
        let (app, _state) = test_router();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/attendance/bulk")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"[{"name": "A", "workshop_id": "W1"}, {"name": "B"}]"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let error: AttendanceApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.error, "missing_field");
        assert!(error.message.contains("workshop_id"));
    }

    #[tokio::test]
    async fn test_remove_sets_status_to_zero() {
        let (app, state) = test_router();
        state.registry().record("Ada", "W1", true, None);

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/attendance/Ada/W1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            state.registry().status().get(&status_tuple("Ada", "W1", "")),
            Some(0.0)
        );
    }

    #[tokio::test]
    async fn test_remove_decodes_percent_encoded_name() {
        let (app, state) = test_router();

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/attendance/Ada%20Lovelace/W1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            state
                .registry()
                .status()
                .get(&status_tuple("Ada Lovelace", "W1", "")),
            Some(0.0)
        );
    }
}
