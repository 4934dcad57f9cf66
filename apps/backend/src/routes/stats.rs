//! Statistics endpoint

use axum::{
    extract::{Query, State},
    Json,
};

use crate::error::Result;
use crate::models::*;
use crate::routes::decks::ensure_deck;
use crate::AppState;

/// GET /api/stats
pub async fn overview(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<ReviewStats>> {
    if let Some(deck_id) = query.deck_id {
        ensure_deck(&state, deck_id).await?;
    }

    let cards = state.db.get_cards(query.deck_id).await?;
    Ok(Json(ReviewStats::collect(&cards, state.clock.today())))
}
