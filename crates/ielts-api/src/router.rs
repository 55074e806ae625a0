use axum::{Router, http::StatusCode, routing::get};

use crate::{error::ApiError, recommendation, review, state::ApiState, streak};

pub fn router() -> Router<ApiState> {
    Router::new()
        .route("/health", get(health))
        .merge(recommendation::routes())
        .merge(streak::routes())
        .merge(review::routes())
        .fallback(handler_404)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn handler_404() -> ApiError {
    ApiError::NotFound("The requested resource was not found".to_string())
}
