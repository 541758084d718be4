use super::types::*;
use crate::{Error, Result, config::OllamaConfig};
use async_trait::async_trait;
use tracing::{debug, error, info};

#[async_trait]
pub trait InferenceClient: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<GenerateResponse>;
}

pub struct OllamaClient {
    client: reqwest::Client,
    generate_url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(config: OllamaConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            generate_url: config.generate_url(),
            model: config.model,
        })
    }

    pub fn generate_url(&self) -> &str {
        &self.generate_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn unreachable(&self) -> Error {
        error!("Could not connect to Ollama at {}", self.generate_url);
        Error::OllamaUnreachable {
            url: self.generate_url.clone(),
        }
    }

    /// Classifies a failure before any response head arrived. Connection
    /// failures win over timeouts when reqwest reports both, and a
    /// connection dropped before the response counts as unreachable.
    fn send_error(&self, e: reqwest::Error) -> Error {
        if e.is_connect() {
            self.unreachable()
        } else if e.is_timeout() {
            error!("Request to Ollama timed out");
            Error::OllamaTimeout
        } else if e.is_request() {
            error!("Ollama closed the connection: {}", e);
            self.unreachable()
        } else {
            error!("Error during request to Ollama: {}", e);
            Error::Network(e)
        }
    }

    /// Classifies a failure while reading the body of a received response.
    fn body_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            error!("Request to Ollama timed out");
            Error::OllamaTimeout
        } else {
            error!("Error reading Ollama response body: {}", e);
            Error::Network(e)
        }
    }
}

#[async_trait]
impl InferenceClient for OllamaClient {
    async fn generate(&self, prompt: &str) -> Result<GenerateResponse> {
        let request = GenerateRequest::new(&self.model, prompt);
        info!("Sending request to Ollama with payload: {:?}", request);

        let response = self
            .client
            .post(&self.generate_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.send_error(e))?;

        let status = response.status();
        info!(
            "Received response from Ollama with status code: {}",
            status.as_u16()
        );

        let status_error = response.error_for_status_ref().err();
        if let Some(e) = status_error {
            error!("Error during request to Ollama: {}", e);
            let body = response.text().await.unwrap_or_default();
            error!("Ollama Response Status Code: {}", status.as_u16());
            error!("Ollama Response Text: {}", body);
            return Err(Error::OllamaStatus(e.to_string()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.body_error(e))?;
        debug!("Ollama returned {} bytes", body.len());

        let parsed: GenerateResponse = serde_json::from_str(&body).map_err(|e| {
            error!(
                "Failed to decode JSON response from Ollama. Status Code: {}: {}",
                status.as_u16(),
                e
            );
            error!("Ollama Response Text: {}", body);
            Error::InvalidResponse
        })?;

        info!("Successfully parsed JSON response: {:?}", parsed);
        Ok(parsed)
    }
}
