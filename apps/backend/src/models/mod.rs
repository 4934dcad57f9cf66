//! Database models and API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// Re-export shared types from flashdeck-core
pub use flashdeck_core::{
    Card, CardDraft, CardEdit, Deck, DeckDraft, DeckSummary, ReviewStats, SessionDraw,
};

// === Database Entity Types ===

/// Deck stored in SQLite
#[derive(Debug, Clone, FromRow)]
pub struct DbDeck {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DbDeck {
    pub fn to_core_deck(&self) -> Deck {
        Deck {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Card stored in SQLite, scheduling columns included
#[derive(Debug, Clone, FromRow)]
pub struct DbCard {
    pub id: Uuid,
    pub deck_id: Uuid,
    pub front: String,
    pub back: String,
    pub repetitions: i64,
    pub interval_days: i64,
    pub ease: f64,
    pub next_review_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl DbCard {
    /// Convert to the core card. Out-of-range integers are clamped into the
    /// core's unsigned fields; the review updater normalizes the rest.
    pub fn to_core_card(&self) -> Card {
        Card {
            id: self.id,
            front: self.front.clone(),
            back: self.back.clone(),
            deck_id: self.deck_id,
            repetitions: clamp_u32(self.repetitions),
            interval: clamp_u32(self.interval_days),
            ease: self.ease,
            next_review_date: self.next_review_date,
        }
    }
}

fn clamp_u32(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

/// One entry of the review log
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbReview {
    pub id: Uuid,
    pub card_id: Uuid,
    pub reviewed_at: DateTime<Utc>,
    pub was_correct: bool,
    pub repetitions_after: i64,
    pub interval_before: i64,
    pub interval_after: i64,
    pub ease_before: f64,
    pub ease_after: f64,
}

impl DbReview {
    /// Log entry for the transition `before` -> `after`.
    pub fn record(before: &Card, after: &Card, was_correct: bool, reviewed_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            card_id: after.id,
            reviewed_at,
            was_correct,
            repetitions_after: i64::from(after.repetitions),
            interval_before: i64::from(before.interval),
            interval_after: i64::from(after.interval),
            ease_before: before.ease,
            ease_after: after.ease,
        }
    }
}

// === API Request/Response Types ===

// Deck types
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeckSort {
    #[default]
    Name,
    Due,
    Created,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeckListQuery {
    pub sort: Option<DeckSort>,
}

/// Deck with its card counts
#[derive(Debug, Serialize, Deserialize)]
pub struct DeckOverview {
    #[serde(flatten)]
    pub deck: Deck,
    pub stats: DeckSummary,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeckListResponse {
    pub decks: Vec<DeckOverview>,
}

// Card types
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateCardRequest {
    pub front: String,
    pub back: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CardListResponse {
    pub cards: Vec<Card>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReviewHistoryResponse {
    pub reviews: Vec<DbReview>,
}

// Study types
#[derive(Debug, Serialize, Deserialize)]
pub struct StudyQuery {
    pub deck_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitReviewRequest {
    pub card_id: Uuid,
    pub is_correct: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitReviewResponse {
    pub card: Card,
    pub next_due: DateTime<Utc>,
}

// Stats types
#[derive(Debug, Serialize, Deserialize)]
pub struct StatsQuery {
    pub deck_id: Option<Uuid>,
}
