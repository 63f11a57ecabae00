use std::{
    collections::{
        BTreeSet,
        HashMap,
    },
    fs,
    path::Path,
};

use serde::{
    Deserialize,
    Serialize,
};

use super::source::{
    CardCollection,
    CardLookup,
    TagQuery,
};
use crate::core::{
    utils::TagPath,
    CardRecord,
    TagDifficultyError,
};

/// A collection held in memory, e.g. exported from Anki for offline analysis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectionSnapshot {
    pub cards: Vec<CardRecord>,
}

impl CollectionSnapshot {
    pub fn new(cards: Vec<CardRecord>) -> Self {
        Self { cards }
    }

    pub fn load(path: &Path) -> Result<Self, TagDifficultyError> {
        let json = fs::read_to_string(path)?;
        let snapshot: Self = serde_json::from_str(&json)?;
        log::info!("Loaded {} cards from {}", snapshot.cards.len(), path.display());
        Ok(snapshot)
    }

    pub fn save(&self, path: &Path) -> Result<(), TagDifficultyError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Snapshot saved to: {}", path.display());
        Ok(())
    }

    /// Captures every card matching `query` from another collection.
    pub fn capture<C: CardCollection + ?Sized>(
        collection: &C,
        query: &TagQuery,
    ) -> Result<Self, TagDifficultyError> {
        let card_ids = collection.find_cards(query)?;
        let cards = collection
            .cards(&card_ids)?
            .into_iter()
            .filter_map(|lookup| match lookup {
                CardLookup::Found(card) => Some(card),
                CardLookup::Missing { card_id, reason } => {
                    log::debug!("Not capturing card {}: {}", card_id, reason);
                    None
                }
            })
            .collect();
        Ok(Self { cards })
    }
}

impl CardCollection for CollectionSnapshot {
    fn all_tags(&self) -> Result<Vec<String>, TagDifficultyError> {
        let tags: BTreeSet<&String> = self.cards.iter().flat_map(|card| card.tags.iter()).collect();
        Ok(tags.into_iter().cloned().collect())
    }

    fn find_cards(&self, query: &TagQuery) -> Result<Vec<u64>, TagDifficultyError> {
        let mut card_ids: Vec<u64> = self
            .cards
            .iter()
            .filter(|card| query.include_suspended || !card.suspended)
            .filter(|card| card.tags.iter().any(|tag| tag.is_under(&query.tag)))
            .map(|card| card.card_id)
            .collect();
        card_ids.sort_unstable();
        card_ids.dedup();
        Ok(card_ids)
    }

    fn cards(&self, card_ids: &[u64]) -> Result<Vec<CardLookup>, TagDifficultyError> {
        let by_id: HashMap<u64, &CardRecord> =
            self.cards.iter().map(|card| (card.card_id, card)).collect();

        Ok(card_ids
            .iter()
            .map(|&card_id| match by_id.get(&card_id) {
                Some(card) => CardLookup::Found((*card).clone()),
                None => CardLookup::Missing { card_id, reason: "card not found".to_string() },
            })
            .collect())
    }
}
