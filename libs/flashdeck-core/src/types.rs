//! Core types for the flashcard scheduler.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, ValidationError};

/// Ease given to a new card and restored on a lapse.
pub const INITIAL_EASE: f64 = 2.5;

/// Floor for the ease factor.
pub const MINIMUM_EASE: f64 = 1.3;

/// Ease gained on every correct review.
pub const EASE_STEP: f64 = 0.1;

/// Interval in days of a new or lapsed card.
pub const INITIAL_INTERVAL: u32 = 1;

/// Streak length at which a card counts as mastered.
pub const MASTERY_THRESHOLD: u32 = 5;

/// A single reviewable fact with its scheduling state.
///
/// `repetitions`, `interval`, `ease` and `next_review_date` are written by
/// the review updater only; `front`, `back` and `deck_id` change through
/// [`Card::apply_edit`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: Uuid,
    pub front: String,
    pub back: String,
    pub deck_id: Uuid,
    /// Consecutive correct reviews since the last lapse.
    pub repetitions: u32,
    /// Days until the next review, always >= 1.
    pub interval: u32,
    /// Interval growth factor, always >= [`MINIMUM_EASE`].
    pub ease: f64,
    pub next_review_date: DateTime<Utc>,
}

impl Card {
    /// Create a card in the initial scheduling state, due at `now`.
    pub fn new(id: Uuid, draft: CardDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            front: draft.front,
            back: draft.back,
            deck_id: draft.deck_id,
            repetitions: 0,
            interval: INITIAL_INTERVAL,
            ease: INITIAL_EASE,
            next_review_date: now,
        }
    }

    /// Whether the current streak has reached [`MASTERY_THRESHOLD`].
    pub fn is_mastered(&self) -> bool {
        self.repetitions >= MASTERY_THRESHOLD
    }

    /// Apply a content edit. Scheduling state is left untouched.
    pub fn apply_edit(&mut self, edit: CardEdit) -> Result<()> {
        edit.validate()?;
        if let Some(front) = edit.front {
            self.front = front;
        }
        if let Some(back) = edit.back {
            self.back = back;
        }
        if let Some(deck_id) = edit.deck_id {
            self.deck_id = deck_id;
        }
        Ok(())
    }
}

/// Content for a card that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDraft {
    pub front: String,
    pub back: String,
    pub deck_id: Uuid,
}

impl CardDraft {
    /// Reject drafts with a blank front or back.
    pub fn validate(&self) -> Result<()> {
        if self.front.trim().is_empty() {
            return Err(ValidationError::EmptyFront);
        }
        if self.back.trim().is_empty() {
            return Err(ValidationError::EmptyBack);
        }
        Ok(())
    }
}

/// Partial update of a card's content. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardEdit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub front: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deck_id: Option<Uuid>,
}

impl CardEdit {
    pub fn validate(&self) -> Result<()> {
        if self.front.as_deref().is_some_and(|f| f.trim().is_empty()) {
            return Err(ValidationError::EmptyFront);
        }
        if self.back.as_deref().is_some_and(|b| b.trim().is_empty()) {
            return Err(ValidationError::EmptyBack);
        }
        Ok(())
    }
}

/// A named grouping of cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Deck {
    pub fn new(id: Uuid, draft: DeckDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace name and description, bumping `updated_at`.
    pub fn apply_draft(&mut self, draft: DeckDraft, now: DateTime<Utc>) -> Result<()> {
        draft.validate()?;
        self.name = draft.name;
        self.description = draft.description;
        self.updated_at = now;
        Ok(())
    }
}

/// Content for creating or renaming a deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl DeckDraft {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyDeckName);
        }
        Ok(())
    }
}
