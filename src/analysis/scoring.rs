//! Folds FSRS difficulty and SM-2 ease factors onto one 0-100 difficulty axis
//! (0 = easiest, 100 = hardest).
//!
//! The two scales are not equivalent. FSRS difficulty is mapped linearly from its
//! 1-10 range and ease is interpolated between two calibration points, assuming both
//! are monotonic in difficulty.

use crate::core::{
    CardRecord,
    Metric,
};

pub const BASE_EASE: f64 = 2.50; // Ease of a card never answered "hard" or "again"
pub const MIN_EASE: f64 = 1.30; // Floor enforced by SM-2

pub const FSRS_MIN_DIFFICULTY: f64 = 1.0;
pub const FSRS_MAX_DIFFICULTY: f64 = 10.0;

/// Raw difficulty signal of a card, before normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DifficultySignal {
    /// FSRS memory-state difficulty, any sign.
    Fsrs(f64),
    /// SM-2 ease factor as a real number (e.g. 2.5).
    Ease(f64),
    Ineligible,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardDifficulty {
    pub difficulty: f64,
    pub metric: Metric,
}

/// Picks the card's signal. A memory state always wins, even a non-positive one:
/// such cards are ineligible rather than scored by ease.
pub fn classify(card: &CardRecord) -> DifficultySignal {
    match (card.memory_state, card.ease_factor) {
        (Some(state), _) => DifficultySignal::Fsrs(state.difficulty),
        (None, factor) if factor > 0 => DifficultySignal::Ease(factor as f64 / 1000.0),
        (None, _) => DifficultySignal::Ineligible,
    }
}

impl DifficultySignal {
    pub fn normalize(self) -> Option<CardDifficulty> {
        match self {
            DifficultySignal::Fsrs(d) if d > 0.0 => Some(CardDifficulty {
                difficulty: fsrs_to_difficulty(d),
                metric: Metric::Fsrs,
            }),
            DifficultySignal::Fsrs(_) => None,
            DifficultySignal::Ease(e) => {
                Some(CardDifficulty { difficulty: ease_to_difficulty(e), metric: Metric::Ease })
            }
            DifficultySignal::Ineligible => None,
        }
    }
}

pub fn score_card(card: &CardRecord) -> Option<CardDifficulty> {
    classify(card).normalize()
}

pub fn fsrs_to_difficulty(d: f64) -> f64 {
    let scaled = (d - FSRS_MIN_DIFFICULTY) / (FSRS_MAX_DIFFICULTY - FSRS_MIN_DIFFICULTY) * 100.0;
    scaled.clamp(0.0, 100.0)
}

pub fn ease_to_difficulty(ease_factor: f64) -> f64 {
    if ease_factor >= BASE_EASE {
        return 0.0;
    }
    if ease_factor <= MIN_EASE {
        return 100.0;
    }
    (BASE_EASE - ease_factor) / (BASE_EASE - MIN_EASE) * 100.0
}
