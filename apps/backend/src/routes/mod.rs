//! HTTP handlers

pub mod cards;
pub mod decks;
pub mod stats;
pub mod study;
