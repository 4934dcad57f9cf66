//! Spaced repetition scheduling.

pub mod sm2;

pub use sm2::{update_card_review, Sm2};
