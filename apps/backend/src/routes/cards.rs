//! Card endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::decks::ensure_deck;
use crate::AppState;

/// GET /api/decks/:id/cards
pub async fn list(
    State(state): State<AppState>,
    Path(deck_id): Path<Uuid>,
) -> Result<Json<CardListResponse>> {
    ensure_deck(&state, deck_id).await?;
    let cards = state.db.get_cards(Some(deck_id)).await?;
    Ok(Json(CardListResponse { cards }))
}

/// POST /api/decks/:id/cards
pub async fn create(
    State(state): State<AppState>,
    Path(deck_id): Path<Uuid>,
    Json(payload): Json<CreateCardRequest>,
) -> Result<(StatusCode, Json<Card>)> {
    ensure_deck(&state, deck_id).await?;

    let draft = CardDraft {
        front: payload.front,
        back: payload.back,
        deck_id,
    };
    draft.validate()?;

    let now = state.clock.now();
    let card = Card::new(Uuid::new_v4(), draft, now);
    state.db.insert_card(&card, now).await?;

    tracing::info!(card_id = %card.id, %deck_id, "Created card");
    Ok((StatusCode::CREATED, Json(card)))
}

/// PUT /api/cards/:id
pub async fn update(
    State(state): State<AppState>,
    Path(card_id): Path<Uuid>,
    Json(edit): Json<CardEdit>,
) -> Result<Json<Card>> {
    let mut card = find_card(&state, card_id).await?;

    if let Some(target) = edit.deck_id {
        if state.db.get_deck(target).await?.is_none() {
            return Err(ApiError::BadRequest(format!("Deck {} does not exist", target)));
        }
    }

    card.apply_edit(edit)?;
    state.db.update_card_content(&card).await?;

    Ok(Json(card))
}

/// DELETE /api/cards/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(card_id): Path<Uuid>,
) -> Result<StatusCode> {
    if !state.db.delete_card(card_id).await? {
        return Err(ApiError::NotFound("Card not found".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/cards/:id/reviews
pub async fn reviews(
    State(state): State<AppState>,
    Path(card_id): Path<Uuid>,
) -> Result<Json<ReviewHistoryResponse>> {
    find_card(&state, card_id).await?;
    let reviews = state.db.get_reviews(card_id).await?;
    Ok(Json(ReviewHistoryResponse { reviews }))
}

pub(crate) async fn find_card(state: &AppState, card_id: Uuid) -> Result<Card> {
    state
        .db
        .get_card(card_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Card not found".to_string()))
}
