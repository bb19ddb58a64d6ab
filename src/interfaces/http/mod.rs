//! HTTP interface: axum router, request validation, and error mapping.

pub mod payload;

use crate::application::service::ReceiptService;
use crate::error::ReceiptError;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use payload::ReceiptPayload;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::warn;
use uuid::Uuid;

pub fn router(service: Arc<ReceiptService>) -> Router {
    Router::new()
        .route("/receipts/process", post(process_receipt))
        .route("/receipts/{id}/points", get(receipt_points))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(service)
}

#[derive(Debug, Serialize)]
struct ProcessResponse {
    id: Uuid,
}

#[derive(Debug, Serialize)]
struct PointsResponse {
    id: Uuid,
    points: i64,
}

/// Transport-facing error wrapper mapping domain errors to status codes and
/// JSON error bodies.
pub struct ApiError(ReceiptError);

impl From<ReceiptError> for ApiError {
    fn from(err: ReceiptError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            ReceiptError::MissingField(_) | ReceiptError::InvalidField(_) => {
                (StatusCode::BAD_REQUEST, self.0.to_string())
            }
            ReceiptError::NotFound => (StatusCode::NOT_FOUND, self.0.to_string()),
            ReceiptError::Storage(e) => {
                warn!("storage failure: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "storage unavailable".to_string(),
                )
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

async fn process_receipt(
    State(service): State<Arc<ReceiptService>>,
    body: Result<Json<ReceiptPayload>, JsonRejection>,
) -> Result<Json<ProcessResponse>, ApiError> {
    let Json(payload) = body.map_err(|rejection| {
        warn!("rejected receipt body: {}", rejection.body_text());
        ReceiptError::InvalidField("body")
    })?;

    let receipt = payload.validate()?;
    let id = service.submit(receipt).await?;
    Ok(Json(ProcessResponse { id }))
}

async fn receipt_points(
    State(service): State<Arc<ReceiptService>>,
    Path(id): Path<String>,
) -> Result<Json<PointsResponse>, ApiError> {
    // A non-uuid id cannot match any stored receipt.
    let id = Uuid::parse_str(&id).map_err(|_| ReceiptError::NotFound)?;
    let points = service.points(id).await?;
    Ok(Json(PointsResponse { id, points }))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy" }))
}
