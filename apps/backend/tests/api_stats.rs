//! Statistics API tests.

mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::{Duration, NaiveDate};
use flashdeck_core::ReviewStats;
use pretty_assertions::assert_eq;
use uuid::Uuid;

use common::fixtures;
use common::TestContext;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Test stats over an empty store.
#[tokio::test]
async fn test_stats_empty() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();

    let response = server.get("/api/stats").await;

    response.assert_status_ok();
    let stats: ReviewStats = response.json();
    assert_eq!(stats.total_cards, 0);
    assert_eq!(stats.due_today, 0);
    assert_eq!(stats.mastered_cards, 0);

    let dates: Vec<NaiveDate> = stats.reviews_by_day.iter().map(|d| d.date).collect();
    assert_eq!(
        dates,
        vec![
            date(2024, 2, 26),
            date(2024, 2, 27),
            date(2024, 2, 28),
            date(2024, 2, 29),
            date(2024, 3, 1),
            date(2024, 3, 2),
            date(2024, 3, 3),
        ]
    );
    assert!(stats.reviews_by_day.iter().all(|d| d.count == 0));
}

/// Test five correct answers in a row master a card.
#[tokio::test]
async fn test_stats_mastered_cards() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let deck = ctx.create_deck("Mastery").await;
    let learned = ctx.create_card(deck.id, "learned").await;
    ctx.create_card(deck.id, "pending").await;

    for round in 0..5 {
        let stats: ReviewStats = server.get("/api/stats").await.json();
        assert_eq!(stats.mastered_cards, 0, "mastered before round {}", round);

        server
            .post("/api/study/review")
            .json(&fixtures::review_request(learned.id, true))
            .await
            .assert_status_ok();
    }

    let stats: ReviewStats = server.get("/api/stats").await.json();
    assert_eq!(stats.total_cards, 2);
    assert_eq!(stats.mastered_cards, 1);
    assert_eq!(stats.due_today, 1);

    let summary: serde_json::Value = server
        .get(&format!("/api/decks/{}/stats", deck.id))
        .await
        .json();
    assert_eq!(summary["mastered_cards"], 1);
    assert_eq!(summary["progress"], 50);

    // one lapse and it is no longer mastered
    server
        .post("/api/study/review")
        .json(&fixtures::review_request(learned.id, false))
        .await
        .assert_status_ok();
    let stats: ReviewStats = server.get("/api/stats").await.json();
    assert_eq!(stats.mastered_cards, 0);
}

/// Test cards are bucketed by the day they were scheduled for.
#[tokio::test]
async fn test_stats_reviews_by_day() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let deck = ctx.create_deck("Window").await;
    let start = fixtures::start_time();

    ctx.create_card_due(deck.id, "yesterday", start - Duration::days(1)).await;
    ctx.create_card_due(deck.id, "yesterday too", start - Duration::hours(34)).await;
    ctx.create_card_due(deck.id, "three days ago", start - Duration::days(3)).await;
    ctx.create_card_due(deck.id, "too old", start - Duration::days(10)).await;
    ctx.create_card(deck.id, "today").await;

    let stats: ReviewStats = server.get("/api/stats").await.json();

    let counts: Vec<usize> = stats.reviews_by_day.iter().map(|d| d.count).collect();
    assert_eq!(counts, vec![0, 0, 0, 0, 1, 0, 2]);
    assert_eq!(stats.total_cards, 5);
    assert_eq!(stats.due_today, 5);
}

/// Test the deck filter and an unknown deck.
#[tokio::test]
async fn test_stats_for_deck() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let small = ctx.create_deck("Small").await;
    let large = ctx.create_deck("Large").await;
    ctx.create_card(small.id, "one").await;
    for front in ["a", "b", "c"] {
        ctx.create_card(large.id, front).await;
    }

    let response = server
        .get("/api/stats")
        .add_query_param("deck_id", small.id)
        .await;
    response.assert_status_ok();
    let stats: ReviewStats = response.json();
    assert_eq!(stats.total_cards, 1);
    assert_eq!(stats.due_today, 1);

    let stats: ReviewStats = server.get("/api/stats").await.json();
    assert_eq!(stats.total_cards, 4);

    let response = server
        .get("/api/stats")
        .add_query_param("deck_id", Uuid::new_v4())
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}
