use std::{
    collections::{
        BTreeSet,
        HashMap,
        HashSet,
    },
    time::Instant,
};

use super::scoring::score_card;
use crate::{
    anki::{
        CardCollection,
        CardLookup,
        TagQuery,
    },
    core::{
        utils::{
            median,
            tag_depth,
            truncate_tag,
            TagPath,
        },
        CardRecord,
        TagDifficulty,
        TagDifficultyError,
    },
};

/// Difficulty values collected for one sub-tag group.
#[derive(Debug)]
struct TagGroup {
    tag: String, // first spelling seen
    difficulties: Vec<f64>,
    metrics: BTreeSet<&'static str>,
}

impl TagGroup {
    fn new(tag: String) -> Self {
        Self { tag, difficulties: Vec::new(), metrics: BTreeSet::new() }
    }

    fn into_result(self, key: String) -> Option<TagDifficulty> {
        let difficulty = median(&self.difficulties)?;
        Some(TagDifficulty {
            tag: self.tag,
            key,
            difficulty,
            card_count: self.difficulties.len(),
            metric_used: self.metrics.into_iter().collect::<Vec<_>>().join("/"),
        })
    }
}

/// Ranks the sub-tags one level below a parent tag by median card difficulty.
pub struct TagDifficultyAnalyzer<'a, C: CardCollection + ?Sized> {
    collection: &'a C,
}

impl<'a, C: CardCollection + ?Sized> TagDifficultyAnalyzer<'a, C> {
    pub fn new(collection: &'a C) -> Self {
        Self { collection }
    }

    /// Sorted hardest first, ties by group key. Returns an empty list when no eligible
    /// card sits under `parent_tag`.
    pub fn analyze(&self, parent_tag: &str) -> Result<Vec<TagDifficulty>, TagDifficultyError> {
        let start = Instant::now();

        let mut card_ids = self.collection.find_cards(&TagQuery::under(parent_tag))?;
        if card_ids.is_empty() {
            log::info!("No cards found under '{}'", parent_tag);
            return Ok(Vec::new());
        }
        card_ids.sort_unstable();
        card_ids.dedup();

        let lookups = self.collection.cards(&card_ids)?;
        let results = group_cards(parent_tag, lookups);

        log::info!(
            "Ranked {} sub-tags of '{}' from {} cards ({:.2}s)",
            results.len(),
            parent_tag,
            card_ids.len(),
            start.elapsed().as_secs_f32()
        );
        Ok(results)
    }
}

/// The distinct lowercase group keys of a card, each paired with the spelling that
/// produced it. Tags outside `parent_tag` or too shallow to reach `grouping_depth` are
/// ignored.
fn grouping_keys(card: &CardRecord, parent_tag: &str, grouping_depth: usize) -> Vec<(String, String)> {
    let mut seen = HashSet::new();
    card.tags
        .iter()
        .filter(|tag| tag.is_under(parent_tag))
        .filter_map(|tag| truncate_tag(tag, grouping_depth))
        .filter_map(|group_tag| {
            let key = group_tag.to_lowercase();
            seen.insert(key.clone()).then_some((key, group_tag))
        })
        .collect()
}

pub fn group_cards<I>(parent_tag: &str, lookups: I) -> Vec<TagDifficulty>
where
    I: IntoIterator<Item = CardLookup>,
{
    let grouping_depth = tag_depth(parent_tag) + 1;
    let mut groups: HashMap<String, TagGroup> = HashMap::new();
    let mut skipped = 0usize;

    for lookup in lookups {
        let card = match lookup {
            CardLookup::Found(card) => card,
            CardLookup::Missing { card_id, reason } => {
                log::warn!("Skipping card {}: {}", card_id, reason);
                skipped += 1;
                continue;
            }
        };

        if card.suspended || card.is_new {
            skipped += 1;
            continue;
        }

        let Some(scored) = score_card(&card) else {
            log::debug!("Card {} has no usable difficulty", card.card_id);
            skipped += 1;
            continue;
        };

        for (key, group_tag) in grouping_keys(&card, parent_tag, grouping_depth) {
            let group = groups.entry(key).or_insert_with(|| TagGroup::new(group_tag));
            group.difficulties.push(scored.difficulty);
            group.metrics.insert(scored.metric.label());
        }
    }

    if skipped > 0 {
        log::debug!("{} cards under '{}' were not scored", skipped, parent_tag);
    }

    let mut results: Vec<TagDifficulty> =
        groups.into_iter().filter_map(|(key, group)| group.into_result(key)).collect();

    results.sort_by(|a, b| b.difficulty.total_cmp(&a.difficulty).then_with(|| a.key.cmp(&b.key)));
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anki::CollectionSnapshot;

    const EPSILON: f64 = 1e-6;

    fn tags(tags: &[&str]) -> Vec<String> {
        tags.iter().map(|t| t.to_string()).collect()
    }

    fn analyze(cards: Vec<CardRecord>, parent_tag: &str) -> Vec<TagDifficulty> {
        let snapshot = CollectionSnapshot::new(cards);
        TagDifficultyAnalyzer::new(&snapshot).analyze(parent_tag).unwrap()
    }

    #[test]
    fn test_mixed_metrics_example() {
        let results = analyze(
            vec![
                CardRecord::new(1, tags(&["Math::Algebra"])).with_fsrs_difficulty(5.5),
                CardRecord::new(2, tags(&["Math::Algebra"])).with_ease_factor(1800),
                CardRecord::new(3, tags(&["Math::Geometry"])).with_fsrs_difficulty(1.0),
            ],
            "Math",
        );

        assert_eq!(results.len(), 2);

        assert_eq!(results[0].tag, "Math::Algebra");
        assert_eq!(results[0].key, "math::algebra");
        assert!((results[0].difficulty - 54.166_666_7).abs() < EPSILON);
        assert_eq!(results[0].card_count, 2);
        assert_eq!(results[0].metric_used, "Ease-Based/FSRS");

        assert_eq!(results[1].tag, "Math::Geometry");
        assert_eq!(results[1].difficulty, 0.0);
        assert_eq!(results[1].card_count, 1);
        assert_eq!(results[1].metric_used, "FSRS");
    }

    #[test]
    fn test_empty_results() {
        assert!(analyze(Vec::new(), "Math").is_empty());
        assert!(analyze(
            vec![CardRecord::new(1, tags(&["Bio::Cells"])).with_ease_factor(2000)],
            "Math"
        )
        .is_empty());
    }

    #[test]
    fn test_multi_tagged_card_counts_once_per_group() {
        let results = analyze(
            vec![CardRecord::new(
                1,
                tags(&["Math::Algebra", "Math::Geometry", "math::algebra::Linear", "MATH::ALGEBRA"]),
            )
            .with_fsrs_difficulty(10.0)],
            "Math",
        );

        assert_eq!(results.len(), 2);
        for row in &results {
            assert_eq!(row.card_count, 1);
            assert_eq!(row.difficulty, 100.0);
        }
    }

    #[test]
    fn test_case_insensitive_grouping() {
        let results = analyze(
            vec![
                CardRecord::new(1, tags(&["Foo::Bar"])).with_ease_factor(2500),
                CardRecord::new(2, tags(&["foo::bar"])).with_ease_factor(1300),
                CardRecord::new(3, tags(&["FOO::BAR::Baz"])).with_ease_factor(1900),
            ],
            "foo",
        );

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].tag, "Foo::Bar");
        assert_eq!(results[0].key, "foo::bar");
        assert_eq!(results[0].card_count, 3);
        assert!((results[0].difficulty - 50.0).abs() < EPSILON);
        assert_eq!(results[0].metric_used, "Ease-Based");
    }

    #[test]
    fn test_depth_bound() {
        let results = analyze(
            vec![
                CardRecord::new(1, tags(&["A::B"])).with_fsrs_difficulty(9.0),
                CardRecord::new(2, tags(&["A::B::C::D"])).with_fsrs_difficulty(3.0),
            ],
            "A::B",
        );

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].tag, "A::B::C");
        assert_eq!(results[0].card_count, 1);
    }

    #[test]
    fn test_sibling_prefix_is_not_a_child() {
        let results = analyze(
            vec![CardRecord::new(1, tags(&["Math::Algebra", "Mathematics::Proofs"]))
                .with_ease_factor(2000)],
            "Math",
        );

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].key, "math::algebra");
    }

    #[test]
    fn test_ineligible_and_suspended_cards_are_excluded() {
        let results = analyze(
            vec![
                CardRecord::new(1, tags(&["Math::Algebra"])).with_fsrs_difficulty(0.0),
                CardRecord::new(2, tags(&["Math::Algebra"])),
                CardRecord::new(3, tags(&["Math::Algebra"])).with_ease_factor(1300).suspended(),
                CardRecord::new(4, tags(&["Math::Algebra"])).with_ease_factor(2200),
            ],
            "Math",
        );

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].card_count, 1);
        assert!((results[0].difficulty - 25.0).abs() < EPSILON);
    }

    #[test]
    fn test_new_cards_are_excluded() {
        let results = analyze(
            vec![
                CardRecord::new(1, tags(&["Math::Algebra"])).with_ease_factor(2500).unstudied(),
                CardRecord::new(2, tags(&["Math::Algebra"])).with_ease_factor(1300),
            ],
            "Math",
        );

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].card_count, 1);
        assert_eq!(results[0].difficulty, 100.0);
    }

    #[test]
    fn test_clamped_fsrs_values_stay_in_range() {
        let results = analyze(
            vec![
                CardRecord::new(1, tags(&["Math::Algebra"])).with_fsrs_difficulty(0.5),
                CardRecord::new(2, tags(&["Math::Algebra"])).with_fsrs_difficulty(0.5),
                CardRecord::new(3, tags(&["Math::Calculus"])).with_fsrs_difficulty(12.0),
            ],
            "MATH",
        );

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].tag, "Math::Calculus");
        assert_eq!(results[0].difficulty, 100.0);
        assert_eq!(results[1].tag, "Math::Algebra");
        assert_eq!(results[1].difficulty, 0.0);
        assert_eq!(results[1].card_count, 2);
    }

    /// Collection whose store is unavailable for one of the two retrieval calls.
    struct UnavailableStore {
        fail_search: bool,
    }

    impl CardCollection for UnavailableStore {
        fn all_tags(&self) -> Result<Vec<String>, TagDifficultyError> {
            Ok(Vec::new())
        }

        fn find_cards(&self, _query: &TagQuery) -> Result<Vec<u64>, TagDifficultyError> {
            if self.fail_search {
                return Err(TagDifficultyError::Custom("store down".to_string()));
            }
            Ok(vec![1, 2])
        }

        fn cards(&self, _card_ids: &[u64]) -> Result<Vec<CardLookup>, TagDifficultyError> {
            Err(TagDifficultyError::Custom("store down".to_string()))
        }
    }

    #[test]
    fn test_store_failure_aborts_analysis() {
        for fail_search in [true, false] {
            let store = UnavailableStore { fail_search };
            match TagDifficultyAnalyzer::new(&store).analyze("Math") {
                Err(TagDifficultyError::Custom(message)) => assert_eq!(message, "store down"),
                other => panic!("Expected store error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_missing_cards_do_not_abort() {
        let card = CardRecord::new(7, tags(&["Math::Algebra"])).with_ease_factor(1900);
        let results = group_cards(
            "Math",
            vec![
                CardLookup::Missing { card_id: 6, reason: "note not found".to_string() },
                CardLookup::Found(card),
            ],
        );

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].card_count, 1);
    }

    #[test]
    fn test_even_median_and_ordering() {
        let results = analyze(
            vec![
                CardRecord::new(1, tags(&["Lang::JP"])).with_fsrs_difficulty(1.0),
                CardRecord::new(2, tags(&["Lang::JP"])).with_fsrs_difficulty(10.0),
                CardRecord::new(3, tags(&["Lang::DE"])).with_fsrs_difficulty(10.0),
                CardRecord::new(4, tags(&["Lang::Zh"])).with_fsrs_difficulty(5.5),
                CardRecord::new(5, tags(&["Lang::Es"])).with_ease_factor(2500),
            ],
            "Lang",
        );

        let order: Vec<&str> = results.iter().map(|r| r.tag.as_str()).collect();
        // Lang::JP and Lang::Zh tie at 50; keys break the tie.
        assert_eq!(order, vec!["Lang::DE", "Lang::JP", "Lang::Zh", "Lang::Es"]);
        assert_eq!(results[1].difficulty, 50.0);
    }

    #[test]
    fn test_repeated_analysis_is_identical() {
        let snapshot = CollectionSnapshot::new(vec![
            CardRecord::new(1, tags(&["S::b"])).with_ease_factor(2000),
            CardRecord::new(2, tags(&["S::a"])).with_ease_factor(2000),
            CardRecord::new(3, tags(&["S::c", "S::a"])).with_fsrs_difficulty(4.0),
        ]);
        let analyzer = TagDifficultyAnalyzer::new(&snapshot);

        let first = analyzer.analyze("S").unwrap();
        let second = analyzer.analyze("S").unwrap();
        assert_eq!(first, second);
    }
}
