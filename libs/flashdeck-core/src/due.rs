//! Due selection.
//!
//! A card is due when the calendar day of its `next_review_date` is today
//! or earlier. Times of day are ignored on both sides: a card due at 23:59
//! today is due now, a card due at 00:01 tomorrow is not.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

use crate::types::Card;

/// A calendar day in the learner's timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StudyDay {
    date: NaiveDate,
    offset: FixedOffset,
}

impl StudyDay {
    pub fn new(date: NaiveDate, offset: FixedOffset) -> Self {
        Self { date, offset }
    }

    /// The day containing `instant` at the given offset.
    pub fn of(instant: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self::new(instant.with_timezone(&offset).date_naive(), offset)
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Truncate `instant` to a calendar date in this day's timezone.
    pub fn day_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset).date_naive()
    }
}

pub fn is_due(card: &Card, today: StudyDay) -> bool {
    today.day_of(card.next_review_date) <= today.date()
}

/// Cards due on or before `today`, in their original order.
pub fn get_due_cards(cards: &[Card], today: StudyDay) -> Vec<Card> {
    cards
        .iter()
        .filter(|card| is_due(card, today))
        .cloned()
        .collect()
}

pub fn count_due(cards: &[Card], today: StudyDay) -> usize {
    cards.iter().filter(|card| is_due(card, today)).count()
}
