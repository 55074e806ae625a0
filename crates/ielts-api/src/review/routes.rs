use axum::{Router, extract::State, routing::post};
use chrono::Utc;
use ielts_db::repositories::{user, vocabulary};
use ielts_engine::{
    StoreError,
    progress::{XpProgress, review_word},
};

use super::model::{ReviewRequest, ReviewSummary};
use crate::{
    ApiState, error::ApiError, extract::Json, metrics, response::ApiResponse, validation,
};

pub fn routes() -> Router<ApiState> {
    Router::new().route("/review/vocabulary", post(submit_review))
}

/// Grade a batch of vocabulary answers and credit the XP in one transaction.
///
/// The learning streak is bumped afterwards on a best-effort basis.
async fn submit_review(
    State(state): State<ApiState>,
    Json(payload): Json<ReviewRequest>,
) -> Result<ApiResponse<ReviewSummary>, ApiError> {
    validation::validate_payload(&payload)?;

    let user_id = payload.user_id;
    let now = Utc::now();

    let mut tx = state.pool.begin().await.map_err(ApiError::Database)?;

    let current = user::lock_xp(&mut *tx, user_id)
        .await?
        .ok_or_else(|| ApiError::user_not_found(user_id))?;
    let level = current
        .level()
        .map_err(|e| ApiError::Store(StoreError::new(e)))?;

    let mut xp_gained = 0;
    let mut reviewed = 0;
    let mut skipped = 0;
    let mut graded = Vec::with_capacity(payload.answers.len());

    for answer in &payload.answers {
        let Some(word) = vocabulary::lock_for_review(&mut *tx, answer.vocabulary_id, user_id).await?
        else {
            tracing::warn!(
                %user_id,
                vocabulary_id = %answer.vocabulary_id,
                "skipping review of unknown vocabulary"
            );
            skipped += 1;
            continue;
        };

        let review = review_word(
            answer.is_correct,
            word.correct_streak,
            word.last_reviewed_at,
            now,
            state.streak_offset,
        );
        vocabulary::apply_review(&mut *tx, word.id, review.correct_streak, review.xp_gained, now)
            .await?;

        graded.push(answer.is_correct);
        xp_gained += review.xp_gained;
        reviewed += 1;
    }

    let progress = XpProgress {
        xp: current.xp,
        level,
        xp_to_next: current.xp_to_next,
    }
    .gain(xp_gained);

    user::update_xp(
        &mut *tx,
        user_id,
        progress.xp,
        progress.level.as_str(),
        progress.xp_to_next,
    )
    .await?;
    tx.commit().await.map_err(ApiError::Database)?;

    for correct in graded {
        metrics::record_review_answer(correct);
    }

    if progress.level != level {
        tracing::info!(%user_id, from = %level, to = %progress.level, "user levelled up");
    }

    ielts_engine::record_activity_best_effort(&state.store, user_id, now, state.streak_offset)
        .await;

    Ok(ApiResponse::ok(
        "Review recorded",
        ReviewSummary {
            xp: progress.xp,
            level: progress.level,
            xp_to_next: progress.xp_to_next,
            xp_gained,
            reviewed,
            skipped,
        },
    ))
}
