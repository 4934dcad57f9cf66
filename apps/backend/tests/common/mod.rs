//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext for setting up an app over a private in-memory database
//! - A fixed clock the tests move by hand
//! - Helper functions for creating test data directly in the store

#![allow(dead_code)]

pub mod fixtures;

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;
use chrono::{DateTime, Utc};
use flashdeck_core::{Card, CardDraft, Clock, Deck, DeckDraft, FixedClock};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

use flashdeck_backend::db::Database;
use flashdeck_backend::{build_router, AppState};

/// Test context containing the database, the clock and the router.
pub struct TestContext {
    pub db: Arc<Database>,
    pub clock: Arc<FixedClock>,
    app: Router,
}

impl TestContext {
    /// Create a new test context with an empty, migrated database.
    pub async fn new() -> Self {
        let db = Database::connect_in_memory()
            .await
            .expect("Failed to open in-memory database");

        db.run_migrations()
            .await
            .expect("Failed to run migrations");

        let db = Arc::new(db);
        let clock = Arc::new(FixedClock::new(fixtures::start_time()));
        let state = AppState::new(db.clone(), clock.clone(), ChaCha8Rng::seed_from_u64(7));
        let app = build_router(state);

        Self { db, clock, app }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).expect("Failed to start test server")
    }

    /// Insert a deck stamped with the current test time.
    pub async fn create_deck(&self, name: &str) -> Deck {
        let deck = Deck::new(
            Uuid::new_v4(),
            DeckDraft {
                name: name.to_string(),
                description: String::new(),
            },
            self.clock.now(),
        );
        self.db
            .insert_deck(&deck)
            .await
            .expect("Failed to insert test deck");
        deck
    }

    /// Insert a new card, due now.
    pub async fn create_card(&self, deck_id: Uuid, front: &str) -> Card {
        self.create_card_due(deck_id, front, self.clock.now()).await
    }

    /// Insert a new card with an explicit due instant.
    pub async fn create_card_due(&self, deck_id: Uuid, front: &str, due: DateTime<Utc>) -> Card {
        let mut card = Card::new(
            Uuid::new_v4(),
            CardDraft {
                front: front.to_string(),
                back: format!("{} (answer)", front),
                deck_id,
            },
            self.clock.now(),
        );
        card.next_review_date = due;
        self.db
            .insert_card(&card, self.clock.now())
            .await
            .expect("Failed to insert test card");
        card
    }
}
