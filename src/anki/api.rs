use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;

use super::types::{
    ApiResponse,
    CardInfo,
    NoteInfo,
};
use crate::core::TagDifficultyError;

pub const DEFAULT_ANKI_CONNECT_URL: &str = "http://localhost:8765/";
const API_VERSION: u32 = 6;

/// Blocking AnkiConnect client.
pub struct AnkiConnect {
    client: Client,
    url: String,
}

impl AnkiConnect {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, TagDifficultyError> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            TagDifficultyError::Custom(format!("HTTP client build failed: {e}"))
        })?;
        Ok(Self { client, url: url.to_string() })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn make_request<T: for<'de> Deserialize<'de>>(
        &self,
        action: &str,
        params: Option<serde_json::Value>,
    ) -> Result<T, TagDifficultyError> {
        let mut body = serde_json::Map::new();
        body.insert("action".to_string(), serde_json::Value::String(action.to_string()));
        body.insert("version".to_string(), serde_json::Value::Number(API_VERSION.into()));

        if let Some(params) = params {
            body.insert("params".to_string(), params);
        }

        let response: ApiResponse<T> =
            self.client.post(&self.url).json(&body).send()?.error_for_status()?.json()?;

        unwrap_response(action, response)
    }

    //Will just use to check if ankiconnect is online
    pub fn version(&self) -> Result<u32, TagDifficultyError> {
        self.make_request("version", None)
    }

    pub fn get_tags(&self) -> Result<Vec<String>, TagDifficultyError> {
        self.make_request("getTags", None)
    }

    pub fn find_card_ids(&self, query: &str) -> Result<Vec<u64>, TagDifficultyError> {
        let params = serde_json::json!({ "query": query });
        self.make_request("findCards", Some(params))
    }

    pub fn cards_info(&self, card_ids: &[u64]) -> Result<Vec<CardInfo>, TagDifficultyError> {
        let params = serde_json::json!({ "cards": card_ids });
        self.make_request("cardsInfo", Some(params))
    }

    pub fn notes_info(&self, note_ids: &[u64]) -> Result<Vec<NoteInfo>, TagDifficultyError> {
        let params = serde_json::json!({ "notes": note_ids });
        self.make_request("notesInfo", Some(params))
    }
}

fn unwrap_response<T>(action: &str, response: ApiResponse<T>) -> Result<T, TagDifficultyError> {
    if let Some(message) = response.error {
        log::warn!("AnkiConnect '{}' failed: {}", action, message);
        return Err(TagDifficultyError::AnkiConnect { action: action.to_string(), message });
    }
    response.result.ok_or_else(|| TagDifficultyError::EmptyResponse(action.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwrap_response() {
        let ok: ApiResponse<Vec<u64>> = serde_json::from_str(r#"{"result": [1, 2], "error": null}"#).unwrap();
        assert_eq!(unwrap_response("findCards", ok).unwrap(), vec![1, 2]);

        let failed: ApiResponse<Vec<u64>> =
            serde_json::from_str(r#"{"result": null, "error": "collection is not available"}"#)
                .unwrap();
        match unwrap_response("findCards", failed) {
            Err(TagDifficultyError::AnkiConnect { action, message }) => {
                assert_eq!(action, "findCards");
                assert_eq!(message, "collection is not available");
            }
            other => panic!("Expected AnkiConnect error, got {:?}", other),
        }

        let empty: ApiResponse<u32> = serde_json::from_str(r#"{"result": null, "error": null}"#).unwrap();
        assert!(matches!(
            unwrap_response("version", empty),
            Err(TagDifficultyError::EmptyResponse(_))
        ));
    }
}
