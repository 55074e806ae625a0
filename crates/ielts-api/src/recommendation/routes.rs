use axum::{
    Router,
    extract::State,
    routing::get,
};
use ielts_engine::TestSummary;
use rand::{SeedableRng, rngs::StdRng};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    ApiState,
    error::ApiError,
    extract::{Path, Query},
    metrics,
    response::ApiResponse,
    validation,
};

pub fn routes() -> Router<ApiState> {
    Router::new().route("/recommendations/{user_id}", get(get_recommendations))
}

#[derive(Debug, Deserialize)]
struct RecommendationQuery {
    limit: Option<usize>,
}

async fn get_recommendations(
    State(state): State<ApiState>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<RecommendationQuery>,
) -> Result<ApiResponse<Vec<TestSummary>>, ApiError> {
    let limit = validation::resolve_limit(query.limit, state.recommendation_max_limit)?;

    let mut rng = StdRng::from_entropy();
    let tests = ielts_engine::recommend(&state.store, user_id, limit, &mut rng).await?;

    metrics::record_recommendations_served(tests.len());
    tracing::debug!(%user_id, limit, served = tests.len(), "recommendations served");

    Ok(ApiResponse::ok("Recommendations retrieved", tests))
}
