//! Simplified SM-2 review updater.
//!
//! Outcomes are binary. A lapse throws away the whole streak, interval and
//! ease; a correct answer raises ease by a fixed step and multiplies the
//! interval by the raised ease.

use chrono::{DateTime, Duration, Utc};

use crate::types::{Card, EASE_STEP, INITIAL_EASE, INITIAL_INTERVAL, MINIMUM_EASE};

/// SM-2 parameters. `Default` gives the stock values.
#[derive(Debug, Clone, PartialEq)]
pub struct Sm2 {
    pub initial_ease: f64,
    pub minimum_ease: f64,
    pub ease_step: f64,
    pub initial_interval: u32,
}

impl Default for Sm2 {
    fn default() -> Self {
        Self {
            initial_ease: INITIAL_EASE,
            minimum_ease: MINIMUM_EASE,
            ease_step: EASE_STEP,
            initial_interval: INITIAL_INTERVAL,
        }
    }
}

impl Sm2 {
    /// Produce the next state of `card` after a review answered at `now`.
    ///
    /// The input is not modified. The due date is always counted from `now`,
    /// never from the card's previous due date.
    pub fn schedule(&self, card: &Card, is_correct: bool, now: DateTime<Utc>) -> Card {
        let (repetitions, interval, ease) = if is_correct {
            let (interval, ease) = self.normalized(card);
            let ease = (ease + self.ease_step).max(self.minimum_ease);
            let interval = ((f64::from(interval) * ease).round() as u32).max(1);
            (card.repetitions.saturating_add(1), interval, ease)
        } else {
            (0, self.initial_interval.max(1), self.initial_ease)
        };

        Card {
            repetitions,
            interval,
            ease,
            next_review_date: due_after(now, interval),
            ..card.clone()
        }
    }

    /// Pull stored state back inside the invariants before applying the
    /// update: non-finite ease restarts at the initial ease, low ease is
    /// floored, a zero interval becomes one day.
    fn normalized(&self, card: &Card) -> (u32, f64) {
        let ease = if card.ease.is_finite() {
            card.ease.max(self.minimum_ease)
        } else {
            self.initial_ease
        };
        (card.interval.max(1), ease)
    }
}

/// Review `card` with the default parameters.
pub fn update_card_review(card: &Card, is_correct: bool, now: DateTime<Utc>) -> Card {
    Sm2::default().schedule(card, is_correct, now)
}

// Saturates at the end of chrono's range; long streaks overflow it.
fn due_after(now: DateTime<Utc>, interval_days: u32) -> DateTime<Utc> {
    Duration::try_days(i64::from(interval_days))
        .and_then(|span| now.checked_add_signed(span))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
