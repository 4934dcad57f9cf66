//! Session selection: due cards, shuffled, first one wins.
//!
//! Every draw starts again from the collection it is given. Callers pass
//! the persisted cards after each review instead of reusing an older
//! shuffled list, so a card that was just pushed into the future drops out.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::due::{get_due_cards, StudyDay};
use crate::shuffle::shuffle_array;
use crate::types::Card;

/// Outcome of one draw from a card collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionDraw {
    /// Card to present next, `None` when nothing is due.
    pub card: Option<Card>,
    pub due_count: usize,
}

pub fn draw<R: Rng + ?Sized>(cards: &[Card], today: StudyDay, rng: &mut R) -> SessionDraw {
    let due = get_due_cards(cards, today);
    let due_count = due.len();
    let card = shuffle_array(&due, rng).into_iter().next();
    SessionDraw { card, due_count }
}

pub fn next_card<R: Rng + ?Sized>(cards: &[Card], today: StudyDay, rng: &mut R) -> Option<Card> {
    draw(cards, today, rng).card
}
