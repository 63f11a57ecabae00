use serde::{
    Deserialize,
    Serialize,
};

/// FSRS memory state as stored on a card. Only present for cards scheduled by FSRS.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MemoryState {
    pub stability: f64,
    pub difficulty: f64,
}

/// The scheduling metadata of one card, with the tags of its note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    pub card_id: u64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub memory_state: Option<MemoryState>,
    #[serde(default)]
    pub ease_factor: u32, // SM-2 factor in permille, 0 when unset
    #[serde(default)]
    pub suspended: bool,
    #[serde(default)]
    pub is_new: bool,
}

impl CardRecord {
    pub fn new(card_id: u64, tags: Vec<String>) -> Self {
        Self {
            card_id,
            tags,
            memory_state: None,
            ease_factor: 0,
            suspended: false,
            is_new: false,
        }
    }

    pub fn with_fsrs_difficulty(mut self, difficulty: f64) -> Self {
        self.memory_state = Some(MemoryState { stability: 0.0, difficulty });
        self
    }

    pub fn with_ease_factor(mut self, ease_factor: u32) -> Self {
        self.ease_factor = ease_factor;
        self
    }

    pub fn suspended(mut self) -> Self {
        self.suspended = true;
        self
    }

    pub fn unstudied(mut self) -> Self {
        self.is_new = true;
        self
    }
}

/// Which scheduler produced a card's difficulty value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    Fsrs,
    Ease,
}

impl Metric {
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Fsrs => "FSRS",
            Metric::Ease => "Ease-Based",
        }
    }
}

/// One ranked sub-tag group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagDifficulty {
    pub tag: String,
    pub key: String,
    pub difficulty: f64,
    pub card_count: usize,
    pub metric_used: String,
}
