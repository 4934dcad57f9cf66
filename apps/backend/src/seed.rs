//! First-run demo content.

use flashdeck_core::{Card, CardDraft, Clock, Deck, DeckDraft};
use uuid::Uuid;

use crate::db::Database;
use crate::error::Result;

const SAMPLE_DECKS: &[(&str, &str, &[(&str, &str)])] = &[
    (
        "Spanish Basics",
        "Essential Spanish vocabulary for beginners",
        &[
            ("hola", "hello"),
            ("gracias", "thank you"),
            ("por favor", "please"),
            ("el perro", "the dog"),
            ("la casa", "the house"),
        ],
    ),
    (
        "JavaScript Fundamentals",
        "Core JavaScript concepts and syntax",
        &[
            ("What does `===` compare?", "Value and type, without coercion"),
            ("Which keyword declares a block-scoped constant?", "const"),
            ("What does `typeof null` return?", "\"object\""),
            ("What is a closure?", "A function together with the scope it was created in"),
            ("What does `Array.prototype.map` return?", "A new array of transformed elements"),
        ],
    ),
    (
        "React Hooks",
        "Modern React hooks and their usage",
        &[
            ("Which hook holds local component state?", "useState"),
            ("Which hook runs side effects after render?", "useEffect"),
            ("Which hook memoizes a computed value?", "useMemo"),
            ("Which hook reads a context value?", "useContext"),
            ("Which hook keeps a mutable value across renders?", "useRef"),
        ],
    ),
];

/// Populate an empty store with the demo decks.
///
/// Returns `false` without touching anything when a deck already exists.
pub async fn seed_sample_decks(db: &Database, clock: &dyn Clock) -> Result<bool> {
    if db.count_decks().await? > 0 {
        return Ok(false);
    }

    let now = clock.now();
    for (name, description, cards) in SAMPLE_DECKS {
        let deck = Deck::new(
            Uuid::new_v4(),
            DeckDraft {
                name: name.to_string(),
                description: description.to_string(),
            },
            now,
        );
        db.insert_deck(&deck).await?;

        for (front, back) in cards.iter() {
            let card = Card::new(
                Uuid::new_v4(),
                CardDraft {
                    front: front.to_string(),
                    back: back.to_string(),
                    deck_id: deck.id,
                },
                now,
            );
            db.insert_card(&card, now).await?;
        }
    }

    tracing::info!(decks = SAMPLE_DECKS.len(), "Seeded sample decks");
    Ok(true)
}
