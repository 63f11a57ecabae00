use serde::{
    Deserialize,
    Serialize,
};

use crate::core::MemoryState;

/// Queue value AnkiConnect reports for suspended cards.
pub const QUEUE_SUSPENDED: i32 = -1;
/// Card type value for cards that were never studied.
pub const TYPE_NEW: i32 = 0;

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub result: Option<T>,
    pub error: Option<String>,
}

/// Entry of a `cardsInfo` response. AnkiConnect answers `{}` for ids it cannot find,
/// so every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardInfo {
    pub card_id: Option<u64>,
    pub note: Option<u64>,
    #[serde(default)]
    pub factor: u32,
    #[serde(default)]
    pub queue: i32,
    #[serde(rename = "type", default)]
    pub card_type: i32,
    #[serde(default)]
    pub memory_state: Option<MemoryState>,
}

impl CardInfo {
    pub fn is_suspended(&self) -> bool {
        self.queue == QUEUE_SUSPENDED
    }

    pub fn is_new(&self) -> bool {
        self.card_type == TYPE_NEW
    }
}

/// Entry of a `notesInfo` response, `{}` for unknown notes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteInfo {
    pub note_id: Option<u64>,
    #[serde(default)]
    pub tags: Vec<String>,
}
