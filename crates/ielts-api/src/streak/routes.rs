use axum::{
    Router,
    extract::State,
    routing::{get, post},
};
use chrono::Utc;
use ielts_engine::{StreakRecord, StreakState, StreakStore};
use uuid::Uuid;

use crate::{ApiState, error::ApiError, extract::Path, metrics, response::ApiResponse};

pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/streak/{user_id}", get(get_streak))
        .route("/streak/{user_id}/activity", post(record_activity))
}

async fn get_streak(
    State(state): State<ApiState>,
    Path(user_id): Path<Uuid>,
) -> Result<ApiResponse<StreakState>, ApiError> {
    let streak = state
        .store
        .find_streak(user_id)
        .await?
        .ok_or_else(|| ApiError::user_not_found(user_id))?;

    Ok(ApiResponse::ok("Streak retrieved", streak))
}

/// Record a learning activity now. Repeating it on the same day is a no-op.
async fn record_activity(
    State(state): State<ApiState>,
    Path(user_id): Path<Uuid>,
) -> Result<ApiResponse<StreakRecord>, ApiError> {
    let record =
        ielts_engine::record_activity(&state.store, user_id, Utc::now(), state.streak_offset)
            .await?
            .ok_or_else(|| ApiError::user_not_found(user_id))?;

    metrics::record_streak_transition(record.transition);

    Ok(ApiResponse::ok("Activity recorded", record))
}
