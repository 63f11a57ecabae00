pub mod errors;
pub mod models;
pub mod utils;

pub use errors::TagDifficultyError;
pub use models::{
    CardRecord,
    MemoryState,
    Metric,
    TagDifficulty,
};
