//! SQLite database operations

use std::str::FromStr;

use chrono::{DateTime, Utc};
use flashdeck_core::update_card_review;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;

const CARD_COLUMNS: &str = "id, deck_id, front, back, repetitions, interval_days, ease, \
                            next_review_date, created_at";

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if needed) the SQLite database at `database_url`
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        // every connection to `:memory:` is its own database, so keep exactly one alive
        let pool = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(5)
                .connect_with(options)
                .await?
        };

        Ok(Self { pool })
    }

    /// Fresh private in-memory database
    pub async fn connect_in_memory() -> Result<Self> {
        Self::connect("sqlite::memory:").await
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ApiError::Migration(e.to_string()))?;
        Ok(())
    }

    // === Deck Repository ===

    pub async fn insert_deck(&self, deck: &Deck) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO decks (id, name, description, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(deck.id)
        .bind(&deck.name)
        .bind(&deck.description)
        .bind(deck.created_at)
        .bind(deck.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn get_deck(&self, deck_id: Uuid) -> Result<Option<Deck>> {
        let deck = sqlx::query_as::<_, DbDeck>(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM decks
            WHERE id = ?
            "#,
        )
        .bind(deck_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(deck.map(|d| d.to_core_deck()))
    }

    /// All decks in creation order
    pub async fn get_all_decks(&self) -> Result<Vec<Deck>> {
        let decks = sqlx::query_as::<_, DbDeck>(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM decks
            ORDER BY created_at, rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(decks.iter().map(DbDeck::to_core_deck).collect())
    }

    pub async fn count_decks(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM decks")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Overwrite name, description and updated_at
    pub async fn update_deck(&self, deck: &Deck) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE decks
            SET name = ?, description = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&deck.name)
        .bind(&deck.description)
        .bind(deck.updated_at)
        .bind(deck.id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a deck together with its cards and their review log
    pub async fn delete_deck(&self, deck_id: Uuid) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        // Delete in order due to foreign keys
        sqlx::query(
            r#"
            DELETE FROM reviews
            WHERE card_id IN (SELECT id FROM cards WHERE deck_id = ?)
            "#,
        )
        .bind(deck_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM cards WHERE deck_id = ?")
            .bind(deck_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM decks WHERE id = ?")
            .bind(deck_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    // === Card Repository ===

    pub async fn insert_card(&self, card: &Card, created_at: DateTime<Utc>) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO cards (id, deck_id, front, back, repetitions, interval_days, ease,
                               next_review_date, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(card.id)
        .bind(card.deck_id)
        .bind(&card.front)
        .bind(&card.back)
        .bind(i64::from(card.repetitions))
        .bind(i64::from(card.interval))
        .bind(card.ease)
        .bind(card.next_review_date)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn get_card(&self, card_id: Uuid) -> Result<Option<Card>> {
        let card = sqlx::query_as::<_, DbCard>(&format!(
            "SELECT {CARD_COLUMNS} FROM cards WHERE id = ?"
        ))
        .bind(card_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(card.map(|c| c.to_core_card()))
    }

    /// Cards in insertion order, optionally limited to one deck
    pub async fn get_cards(&self, deck_id: Option<Uuid>) -> Result<Vec<Card>> {
        let cards = match deck_id {
            Some(deck_id) => {
                sqlx::query_as::<_, DbCard>(&format!(
                    "SELECT {CARD_COLUMNS} FROM cards WHERE deck_id = ? ORDER BY rowid"
                ))
                .bind(deck_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, DbCard>(&format!(
                    "SELECT {CARD_COLUMNS} FROM cards ORDER BY rowid"
                ))
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(cards.iter().map(DbCard::to_core_card).collect())
    }

    /// Write front, back and deck. Scheduling columns are left alone.
    pub async fn update_card_content(&self, card: &Card) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE cards
            SET front = ?, back = ?, deck_id = ?
            WHERE id = ?
            "#,
        )
        .bind(&card.front)
        .bind(&card.back)
        .bind(card.deck_id)
        .bind(card.id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_card(&self, card_id: Uuid) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM reviews WHERE card_id = ?")
            .bind(card_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM cards WHERE id = ?")
            .bind(card_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    // === Review Repository ===

    /// Apply one review to a stored card and log it, in a single transaction.
    ///
    /// Returns `None` when the card does not exist. Overlapping reviews of
    /// the same card run one after the other, each seeing the state the
    /// previous one wrote.
    pub async fn review_card(
        &self,
        card_id: Uuid,
        is_correct: bool,
        now: DateTime<Utc>,
    ) -> Result<Option<(Card, DbReview)>> {
        let mut tx = self.pool.begin().await?;

        // Write first so the transaction holds SQLite's write lock before it reads
        let claimed = sqlx::query("UPDATE cards SET id = id WHERE id = ?")
            .bind(card_id)
            .execute(&mut *tx)
            .await?;
        if claimed.rows_affected() == 0 {
            return Ok(None);
        }

        let card = sqlx::query_as::<_, DbCard>(&format!(
            "SELECT {CARD_COLUMNS} FROM cards WHERE id = ?"
        ))
        .bind(card_id)
        .fetch_one(&mut *tx)
        .await?
        .to_core_card();

        let updated = update_card_review(&card, is_correct, now);
        let review = DbReview::record(&card, &updated, is_correct, now);

        sqlx::query(
            r#"
            UPDATE cards
            SET repetitions = ?, interval_days = ?, ease = ?, next_review_date = ?
            WHERE id = ?
            "#,
        )
        .bind(i64::from(updated.repetitions))
        .bind(i64::from(updated.interval))
        .bind(updated.ease)
        .bind(updated.next_review_date)
        .bind(updated.id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO reviews (id, card_id, reviewed_at, was_correct, repetitions_after,
                                 interval_before, interval_after, ease_before, ease_after)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(review.id)
        .bind(review.card_id)
        .bind(review.reviewed_at)
        .bind(review.was_correct)
        .bind(review.repetitions_after)
        .bind(review.interval_before)
        .bind(review.interval_after)
        .bind(review.ease_before)
        .bind(review.ease_after)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some((updated, review)))
    }

    /// Review log for a card in the order it was written
    pub async fn get_reviews(&self, card_id: Uuid) -> Result<Vec<DbReview>> {
        let reviews = sqlx::query_as::<_, DbReview>(
            r#"
            SELECT id, card_id, reviewed_at, was_correct, repetitions_after,
                   interval_before, interval_after, ease_before, ease_after
            FROM reviews
            WHERE card_id = ?
            ORDER BY rowid
            "#,
        )
        .bind(card_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reviews)
    }
}
