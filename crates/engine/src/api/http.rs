//! HTTP routes.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use promo_domain::{Promotion, PromotionId};
use std::sync::Arc;

use crate::app::App;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/api/health", get(health))
        .route(
            "/api/promotions",
            get(list_promotions).post(create_promotion),
        )
        .route(
            "/api/promotions/{id}",
            get(get_promotion)
                .put(update_promotion)
                .delete(delete_promotion),
        )
}

async fn health() -> &'static str {
    "OK"
}

// =============================================================================
// Promotions
// =============================================================================

async fn list_promotions(State(app): State<Arc<App>>) -> Result<Json<Vec<Promotion>>, ApiError> {
    let promotions = app.repositories.promotion.find_all().await?;
    Ok(Json(promotions))
}

async fn get_promotion(
    State(app): State<Arc<App>>,
    Path(id): Path<i64>,
) -> Result<Json<Promotion>, ApiError> {
    let id = PromotionId::from_i64(id);
    let promotion = app
        .repositories
        .promotion
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::promotion_not_found(id))?;
    Ok(Json(promotion))
}

async fn create_promotion(
    State(app): State<Arc<App>>,
    payload: Result<Json<Promotion>, JsonRejection>,
) -> Result<(StatusCode, Json<Promotion>), ApiError> {
    let Json(payload) = payload?;

    let saved = app
        .repositories
        .promotion
        .save(&payload.without_id())
        .await?;

    tracing::info!(promotion_id = ?saved.id, name = %saved.name, "Promotion created");
    Ok((StatusCode::CREATED, Json(saved)))
}

async fn update_promotion(
    State(app): State<Arc<App>>,
    Path(id): Path<i64>,
    payload: Result<Json<Promotion>, JsonRejection>,
) -> Result<Json<Promotion>, ApiError> {
    let Json(payload) = payload?;
    let id = PromotionId::from_i64(id);

    let existing = app
        .repositories
        .promotion
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::promotion_not_found(id))?;

    let updated = app
        .repositories
        .promotion
        .save(&existing.with_updates_from(&payload))
        .await?;

    tracing::info!(promotion_id = %id, "Promotion updated");
    Ok(Json(updated))
}

async fn delete_promotion(
    State(app): State<Arc<App>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let id = PromotionId::from_i64(id);

    app.repositories
        .promotion
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::promotion_not_found(id))?;

    app.repositories.promotion.delete_by_id(id).await?;

    tracing::info!(promotion_id = %id, "Promotion deleted");
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
}

impl ApiError {
    pub fn promotion_not_found(id: PromotionId) -> Self {
        ApiError::NotFound(format!("Promotion with ID {id} not found"))
    }
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg).into_response(),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
            }
        }
    }
}

impl From<crate::infrastructure::ports::RepoError> for ApiError {
    fn from(e: crate::infrastructure::ports::RepoError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

// Every body rejection is a client error, including payloads that parse as
// JSON but miss or mistype a field.
impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        ApiError::BadRequest(e.body_text())
    }
}
