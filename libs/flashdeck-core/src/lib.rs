//! Scheduling core shared by the flashdeck apps.
//!
//! Provides:
//! - Card and deck types with their scheduling state
//! - The review updater (simplified SM-2, binary outcome)
//! - Due selection with calendar-day granularity
//! - Fisher–Yates session shuffling over an injected random source
//! - Session draws and aggregate statistics

pub mod algorithm;
pub mod clock;
pub mod due;
pub mod error;
pub mod session;
pub mod shuffle;
pub mod stats;
pub mod types;

pub use algorithm::{update_card_review, Sm2};
pub use clock::{Clock, FixedClock, SystemClock};
pub use due::{count_due, get_due_cards, is_due, StudyDay};
pub use error::{Result, ValidationError};
pub use session::{draw, next_card, SessionDraw};
pub use shuffle::shuffle_array;
pub use stats::{DayCount, DeckSummary, ReviewStats};
pub use types::{
    Card, CardDraft, CardEdit, Deck, DeckDraft, EASE_STEP, INITIAL_EASE, INITIAL_INTERVAL,
    MASTERY_THRESHOLD, MINIMUM_EASE,
};
