//! Aggregate statistics over card state.
//!
//! Nothing here feeds back into scheduling.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::due::{count_due, StudyDay};
use crate::types::Card;

/// Length of the trailing window reported by [`ReviewStats::reviews_by_day`].
pub const REVIEW_WINDOW_DAYS: u64 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCount {
    pub date: NaiveDate,
    pub count: usize,
}

/// Collection-wide statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewStats {
    pub total_cards: usize,
    pub due_today: usize,
    pub mastered_cards: usize,
    /// Cards scheduled on each of the seven days before today, oldest first.
    pub reviews_by_day: Vec<DayCount>,
}

impl ReviewStats {
    pub fn collect(cards: &[Card], today: StudyDay) -> Self {
        Self {
            total_cards: cards.len(),
            due_today: count_due(cards, today),
            mastered_cards: count_mastered(cards),
            reviews_by_day: reviews_by_day(cards, today),
        }
    }
}

/// Per-deck summary shown next to each deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckSummary {
    pub total_cards: usize,
    pub due_today: usize,
    pub mastered_cards: usize,
    /// Mastered share of the deck as a whole percentage.
    pub progress: u8,
}

impl DeckSummary {
    pub fn collect(cards: &[Card], today: StudyDay) -> Self {
        let total_cards = cards.len();
        let mastered_cards = count_mastered(cards);
        let progress = if total_cards == 0 {
            0
        } else {
            (mastered_cards as f64 / total_cards as f64 * 100.0).round() as u8
        };

        Self {
            total_cards,
            due_today: count_due(cards, today),
            mastered_cards,
            progress,
        }
    }
}

fn count_mastered(cards: &[Card]) -> usize {
    cards.iter().filter(|card| card.is_mastered()).count()
}

fn reviews_by_day(cards: &[Card], today: StudyDay) -> Vec<DayCount> {
    let mut window: Vec<DayCount> = (1..=REVIEW_WINDOW_DAYS)
        .rev()
        .filter_map(|back| today.date().checked_sub_days(Days::new(back)))
        .map(|date| DayCount { date, count: 0 })
        .collect();

    for card in cards {
        let day = today.day_of(card.next_review_date);
        if let Some(bucket) = window.iter_mut().find(|bucket| bucket.date == day) {
            bucket.count += 1;
        }
    }

    window
}
