//! Test fixtures and factory functions for request bodies.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;
use uuid::Uuid;

/// Instant every test clock starts at (a Monday morning, UTC).
pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 4, 10, 0, 0).unwrap()
}

/// Create a deck request body.
pub fn deck_request(name: &str, description: &str) -> serde_json::Value {
    json!({ "name": name, "description": description })
}

/// Create a card request body.
pub fn card_request(front: &str, back: &str) -> serde_json::Value {
    json!({ "front": front, "back": back })
}

/// Create a card edit request body; `None` fields are left out.
pub fn edit_request(
    front: Option<&str>,
    back: Option<&str>,
    deck_id: Option<Uuid>,
) -> serde_json::Value {
    let mut obj = serde_json::Map::new();
    if let Some(f) = front {
        obj.insert("front".to_string(), json!(f));
    }
    if let Some(b) = back {
        obj.insert("back".to_string(), json!(b));
    }
    if let Some(d) = deck_id {
        obj.insert("deck_id".to_string(), json!(d));
    }
    serde_json::Value::Object(obj)
}

/// Create a submit review request body.
pub fn review_request(card_id: Uuid, is_correct: bool) -> serde_json::Value {
    json!({ "card_id": card_id, "is_correct": is_correct })
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}
