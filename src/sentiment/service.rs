use super::prompt::{build_prompt, extract_label};
use crate::{Error, Result, llm::InferenceClient};
use std::sync::Arc;
use tracing::{info, warn};

const LOGGED_TEXT_CHARS: usize = 50;

/// Classifies text by relaying it to an inference backend.
pub struct SentimentService {
    client: Arc<dyn InferenceClient>,
}

impl SentimentService {
    pub fn new(client: Arc<dyn InferenceClient>) -> Self {
        Self { client }
    }

    /// Returns the sentiment label for `text`. Blank input is rejected
    /// before any call is made; otherwise exactly one call is issued.
    pub async fn classify(&self, text: &str) -> Result<String> {
        if text.trim().is_empty() {
            warn!("Rejected empty text");
            return Err(Error::EmptyText);
        }

        let preview: String = text.chars().take(LOGGED_TEXT_CHARS).collect();
        info!("Received text for analysis: {}...", preview);

        let result = self.client.generate(&build_prompt(text)).await?;

        let Some(sentiment) = extract_label(&result.response) else {
            warn!(
                "Ollama returned an empty response field. Full response: {:?}",
                result
            );
            return Err(Error::EmptyResponse);
        };

        info!("Extracted sentiment: {}", sentiment);
        Ok(sentiment.to_string())
    }
}
