//! Study endpoints

use std::sync::PoisonError;

use axum::{
    extract::{Query, State},
    Json,
};
use flashdeck_core::session;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::decks::ensure_deck;
use crate::AppState;

/// GET /api/study/next
///
/// Runs due selection and the shuffle against the stored cards on every
/// call, so a card reviewed a moment ago is judged by its new due date.
pub async fn next(
    State(state): State<AppState>,
    Query(query): Query<StudyQuery>,
) -> Result<Json<SessionDraw>> {
    if let Some(deck_id) = query.deck_id {
        ensure_deck(&state, deck_id).await?;
    }

    let cards = state.db.get_cards(query.deck_id).await?;
    let today = state.clock.today();

    let drawn = {
        let mut rng = state.rng.lock().unwrap_or_else(PoisonError::into_inner);
        session::draw(&cards, today, &mut *rng)
    };

    tracing::debug!(
        deck_id = ?query.deck_id,
        candidates = cards.len(),
        due = drawn.due_count,
        "Drew next study card"
    );

    Ok(Json(drawn))
}

/// POST /api/study/review
pub async fn review(
    State(state): State<AppState>,
    Json(payload): Json<SubmitReviewRequest>,
) -> Result<Json<SubmitReviewResponse>> {
    let now = state.clock.now();
    let (updated, log) = state
        .db
        .review_card(payload.card_id, payload.is_correct, now)
        .await?
        .ok_or_else(|| ApiError::NotFound("Card not found".to_string()))?;

    tracing::info!(
        card_id = %updated.id,
        review_id = %log.id,
        correct = payload.is_correct,
        repetitions = updated.repetitions,
        interval = updated.interval,
        ease = updated.ease,
        "Recorded review"
    );

    Ok(Json(SubmitReviewResponse {
        next_due: updated.next_review_date,
        card: updated,
    }))
}
