use std::{
    collections::{
        BTreeSet,
        HashMap,
    },
    sync::Once,
    thread::sleep,
    time::{
        Duration,
        Instant,
    },
};

use super::{
    api::AnkiConnect,
    source::{
        CardCollection,
        CardLookup,
        TagQuery,
    },
    types::{
        CardInfo,
        NoteInfo,
    },
};
use crate::core::{
    CardRecord,
    TagDifficultyError,
};

static MEMORY_STATE_WARNING: Once = Once::new();

impl CardCollection for AnkiConnect {
    fn all_tags(&self) -> Result<Vec<String>, TagDifficultyError> {
        let start = Instant::now();
        let tags = self.get_tags()?;
        log::info!("getTags request: {} tags ({:.2}s)", tags.len(), start.elapsed().as_secs_f32());
        Ok(tags)
    }

    fn find_cards(&self, query: &TagQuery) -> Result<Vec<u64>, TagDifficultyError> {
        let search = query.to_search();
        let start = Instant::now();
        let card_ids = self.find_card_ids(&search)?;
        log::info!(
            "findCards request '{}': {} cards ({:.2}s)",
            search,
            card_ids.len(),
            start.elapsed().as_secs_f32()
        );
        Ok(card_ids)
    }

    fn cards(&self, card_ids: &[u64]) -> Result<Vec<CardLookup>, TagDifficultyError> {
        let cards_start = Instant::now();
        let cards = self.cards_info(card_ids)?;
        log::info!(
            "cardsInfo request: {} cards ({:.2}s)",
            cards.len(),
            cards_start.elapsed().as_secs_f32()
        );
        if lacks_memory_state(&cards) {
            MEMORY_STATE_WARNING.call_once(|| {
                log::warn!(
                    "cardsInfo returned no memoryState; FSRS cards will be scored by ease factor"
                );
            });
        }

        let note_ids: Vec<u64> =
            cards.iter().filter_map(|c| c.note).collect::<BTreeSet<_>>().into_iter().collect();

        let notes_start = Instant::now();
        let notes = self.notes_info(&note_ids)?;
        log::info!(
            "notesInfo request: {} notes ({:.2}s)",
            notes.len(),
            notes_start.elapsed().as_secs_f32()
        );

        Ok(join_cards_and_notes(card_ids, cards, notes))
    }
}

/// True when a batch has resolved cards but none of them carries an FSRS memory state.
pub fn lacks_memory_state(cards: &[CardInfo]) -> bool {
    let mut resolved = cards.iter().filter(|card| card.card_id.is_some()).peekable();
    resolved.peek().is_some() && resolved.all(|card| card.memory_state.is_none())
}

/// Pairs each requested card with its note. AnkiConnect returns `cardsInfo` entries in
/// request order, with empty objects for ids it could not resolve.
pub fn join_cards_and_notes(
    card_ids: &[u64],
    cards: Vec<CardInfo>,
    notes: Vec<NoteInfo>,
) -> Vec<CardLookup> {
    let notes_by_id: HashMap<u64, NoteInfo> =
        notes.into_iter().filter_map(|note| note.note_id.map(|id| (id, note))).collect();

    let mut cards_by_id: HashMap<u64, CardInfo> =
        cards.into_iter().filter_map(|card| card.card_id.map(|id| (id, card))).collect();

    card_ids
        .iter()
        .map(|&card_id| {
            let Some(card) = cards_by_id.remove(&card_id) else {
                return CardLookup::Missing { card_id, reason: "card not found".to_string() };
            };
            let Some(note) = card.note.and_then(|note_id| notes_by_id.get(&note_id)) else {
                return CardLookup::Missing { card_id, reason: "note not found".to_string() };
            };
            CardLookup::Found(CardRecord {
                card_id,
                tags: note.tags.clone(),
                memory_state: card.memory_state,
                ease_factor: card.factor,
                suspended: card.is_suspended(),
                is_new: card.is_new(),
            })
        })
        .collect()
}

pub fn wait_awake(
    anki: &AnkiConnect,
    wait_time: u64,
    max_attempts: u32,
) -> Result<u32, TagDifficultyError> {
    let mut last_error = None;
    for attempt in 1..=max_attempts {
        match anki.version() {
            Ok(version) => {
                log::info!("AnkiConnect is online. Version: {}", version);
                return Ok(version);
            }
            Err(err) => {
                log::warn!(
                    "AnkiConnect attempt {} of {} failed. Retrying in {} seconds... Error: {}",
                    attempt,
                    max_attempts,
                    wait_time,
                    err
                );
                last_error = Some(err);
                if attempt < max_attempts {
                    sleep(Duration::from_secs(wait_time));
                }
            }
        }
    }
    Err(last_error.unwrap_or_else(|| {
        TagDifficultyError::Custom(format!("AnkiConnect at {} is not reachable", anki.url()))
    }))
}
