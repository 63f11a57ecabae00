use crate::core::{
    utils::TAG_SEPARATOR,
    CardRecord,
    TagDifficultyError,
};

/// Card retrieval scoped to a tag subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagQuery {
    pub tag: String,
    pub include_suspended: bool,
}

impl TagQuery {
    /// Cards tagged with `tag` or any tag below it, suspended cards excluded.
    pub fn under(tag: &str) -> Self {
        Self { tag: tag.to_string(), include_suspended: false }
    }

    /// Anki search syntax for this query.
    pub fn to_search(&self) -> String {
        let tag = escape_search_term(&self.tag);
        let tag_search = format!("tag:\"{tag}\" or tag:\"{tag}{TAG_SEPARATOR}*\"");
        if self.include_suspended {
            format!("({tag_search})")
        } else {
            format!("({tag_search}) -is:suspended")
        }
    }
}

/// Escapes the characters Anki search treats specially inside a quoted term, so a tag
/// only ever matches itself.
pub(crate) fn escape_search_term(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '"' | '*' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Outcome of materializing a single card.
#[derive(Debug, Clone, PartialEq)]
pub enum CardLookup {
    Found(CardRecord),
    Missing { card_id: u64, reason: String },
}

/// Read-only access to a card collection.
///
/// `find_cards` and `cards` failing as a whole means the store is unusable and aborts
/// the request. Individual cards that cannot be read come back as [`CardLookup::Missing`].
pub trait CardCollection {
    fn all_tags(&self) -> Result<Vec<String>, TagDifficultyError>;

    fn find_cards(&self, query: &TagQuery) -> Result<Vec<u64>, TagDifficultyError>;

    fn cards(&self, card_ids: &[u64]) -> Result<Vec<CardLookup>, TagDifficultyError>;
}
