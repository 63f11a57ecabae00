pub mod aggregator;
pub mod catalog;
pub mod scoring;

pub use aggregator::TagDifficultyAnalyzer;
pub use catalog::{
    load_parent_tags,
    parent_tags,
    DEFAULT_MAX_DEPTH,
};
pub use scoring::{
    score_card,
    CardDifficulty,
    DifficultySignal,
};
