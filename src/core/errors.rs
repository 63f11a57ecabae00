use thiserror::Error;

#[derive(Error, Debug)]
pub enum TagDifficultyError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Reqwest error: {0}")]
    Reqwest(Box<reqwest::Error>),

    #[error("AnkiConnect error in '{action}': {message}")]
    AnkiConnect { action: String, message: String },

    #[error("AnkiConnect returned no result for '{0}'")]
    EmptyResponse(String),

    #[error("Invalid settings: {0}")]
    Settings(String),

    #[error("TagDifficultyError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for TagDifficultyError {
    fn from(error: std::io::Error) -> Self {
        TagDifficultyError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for TagDifficultyError {
    fn from(error: reqwest::Error) -> Self {
        TagDifficultyError::Reqwest(Box::new(error))
    }
}
