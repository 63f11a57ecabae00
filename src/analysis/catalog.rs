use std::collections::BTreeSet;

use crate::{
    anki::CardCollection,
    core::{
        utils::{
            tag_components,
            TAG_SEPARATOR,
        },
        TagDifficultyError,
    },
};

pub const DEFAULT_MAX_DEPTH: usize = 3;

/// Every proper ancestor path of the given tags, up to `max_depth` segments deep,
/// de-duplicated and sorted. A tag never lists itself.
pub fn parent_tags<I, S>(tags: I, max_depth: usize) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parents = BTreeSet::new();
    for tag in tags {
        let components = tag_components(tag.as_ref());
        let deepest = max_depth.min(components.len().saturating_sub(1));
        for depth in 1..=deepest {
            parents.insert(components[..depth].join(TAG_SEPARATOR));
        }
    }
    parents.into_iter().collect()
}

pub fn load_parent_tags<C: CardCollection + ?Sized>(
    collection: &C,
    max_depth: usize,
) -> Result<Vec<String>, TagDifficultyError> {
    let tags = collection.all_tags()?;
    let parents = parent_tags(&tags, max_depth);
    log::info!("Found {} parent tags among {} tags", parents.len(), tags.len());
    Ok(parents)
}
