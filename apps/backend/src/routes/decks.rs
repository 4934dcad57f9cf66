//! Deck endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// GET /api/decks
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<DeckListQuery>,
) -> Result<Json<DeckListResponse>> {
    let decks = state.db.get_all_decks().await?;
    let cards = state.db.get_cards(None).await?;
    let today = state.clock.today();

    let mut overviews: Vec<DeckOverview> = decks
        .into_iter()
        .map(|deck| {
            let deck_cards: Vec<Card> = cards
                .iter()
                .filter(|card| card.deck_id == deck.id)
                .cloned()
                .collect();
            DeckOverview {
                stats: DeckSummary::collect(&deck_cards, today),
                deck,
            }
        })
        .collect();

    sort_decks(&mut overviews, query.sort.unwrap_or_default());
    Ok(Json(DeckListResponse { decks: overviews }))
}

/// POST /api/decks
pub async fn create(
    State(state): State<AppState>,
    Json(draft): Json<DeckDraft>,
) -> Result<(StatusCode, Json<Deck>)> {
    draft.validate()?;
    let deck = Deck::new(Uuid::new_v4(), draft, state.clock.now());
    state.db.insert_deck(&deck).await?;

    tracing::info!(deck_id = %deck.id, name = %deck.name, "Created deck");
    Ok((StatusCode::CREATED, Json(deck)))
}

/// PUT /api/decks/:id
pub async fn update(
    State(state): State<AppState>,
    Path(deck_id): Path<Uuid>,
    Json(draft): Json<DeckDraft>,
) -> Result<Json<Deck>> {
    let mut deck = ensure_deck(&state, deck_id).await?;
    deck.apply_draft(draft, state.clock.now())?;
    state.db.update_deck(&deck).await?;

    Ok(Json(deck))
}

/// DELETE /api/decks/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(deck_id): Path<Uuid>,
) -> Result<StatusCode> {
    if !state.db.delete_deck(deck_id).await? {
        return Err(ApiError::NotFound("Deck not found".to_string()));
    }

    tracing::info!(%deck_id, "Deleted deck and its cards");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/decks/:id/stats
pub async fn stats(
    State(state): State<AppState>,
    Path(deck_id): Path<Uuid>,
) -> Result<Json<DeckSummary>> {
    ensure_deck(&state, deck_id).await?;
    let cards = state.db.get_cards(Some(deck_id)).await?;
    Ok(Json(DeckSummary::collect(&cards, state.clock.today())))
}

/// Fail with 404 unless the deck exists.
pub(crate) async fn ensure_deck(state: &AppState, deck_id: Uuid) -> Result<Deck> {
    state
        .db
        .get_deck(deck_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Deck not found".to_string()))
}

fn sort_decks(decks: &mut [DeckOverview], sort: DeckSort) {
    match sort {
        DeckSort::Name => decks.sort_by_key(|d| d.deck.name.to_lowercase()),
        DeckSort::Due => decks.sort_by(|a, b| {
            b.stats
                .due_today
                .cmp(&a.stats.due_today)
                .then_with(|| a.deck.name.to_lowercase().cmp(&b.deck.name.to_lowercase()))
        }),
        DeckSort::Created => decks.sort_by(|a, b| b.deck.created_at.cmp(&a.deck.created_at)),
    }
}
