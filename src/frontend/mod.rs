//! Client side of the analyzer: posts text to the relay and turns whatever
//! comes back into something printable. No failure escapes as an error.

use crate::{Result, config::FrontendConfig};
use reqwest::StatusCode;
use serde_json::Value;
use std::fmt;
use tracing::{debug, warn};

const PREVIEW_CHARS: usize = 100;

pub const TIMEOUT_MESSAGE: &str = "The model is taking too long to respond. This might happen when the model is loading for the first time. Please try again with a shorter text or wait a moment and try again.";

/// What the form shows after an analysis attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Sentiment(String),
    Failure(String),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sentiment(label) => write!(f, "Predicted Sentiment:\n{}", label),
            Self::Failure(message) => f.write_str(message),
        }
    }
}

pub struct BackendClient {
    client: reqwest::Client,
    analyze_url: String,
    port: Option<u16>,
}

impl BackendClient {
    pub fn new(config: &FrontendConfig) -> Result<Self> {
        let base = reqwest::Url::parse(&config.backend_url).map_err(|e| {
            crate::Error::config(format!(
                "Invalid backend URL {}: {}",
                config.backend_url, e
            ))
        })?;

        Ok(Self {
            client: reqwest::Client::new(),
            analyze_url: format!("{}/analyze/", config.backend_url.trim_end_matches('/')),
            port: base.port_or_known_default(),
        })
    }

    pub fn analyze_url(&self) -> &str {
        &self.analyze_url
    }

    pub async fn analyze(&self, text: &str) -> Outcome {
        debug!("Posting {} chars to {}", text.chars().count(), self.analyze_url);

        let response = match self
            .client
            .post(&self.analyze_url)
            .form(&[("text", text)])
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return self.transport_failure(e),
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return self.transport_failure(e),
        };

        render(status, &body)
    }

    fn transport_failure(&self, e: reqwest::Error) -> Outcome {
        warn!("Request to backend failed: {}", e);
        if e.is_connect() {
            let port = self
                .port
                .map(|p| p.to_string())
                .unwrap_or_else(|| "unknown".to_string());
            Outcome::Failure(format!(
                "Error: Cannot connect to the backend server. Please make sure the backend server is running on port {}.",
                port
            ))
        } else {
            Outcome::Failure(format!("Error: Request to backend failed: {}", e))
        }
    }
}

/// Maps a relay reply to what the form displays.
pub fn render(status: StatusCode, body: &str) -> Outcome {
    match status {
        StatusCode::OK => match serde_json::from_str::<Value>(body) {
            Ok(json) => {
                let sentiment = match json.get("sentiment") {
                    Some(Value::String(label)) => label.clone(),
                    Some(other) => other.to_string(),
                    None => "Error".to_string(),
                };
                Outcome::Sentiment(sentiment)
            }
            Err(_) => Outcome::Failure(format!(
                "Error: Received invalid response from backend. Response text: {}...",
                preview(body)
            )),
        },
        StatusCode::GATEWAY_TIMEOUT => Outcome::Failure(TIMEOUT_MESSAGE.to_string()),
        _ => Outcome::Failure(format!(
            "Error: Backend returned status code {}. Response: {}...",
            status.as_u16(),
            preview(body)
        )),
    }
}

fn preview(body: &str) -> String {
    body.chars().take(PREVIEW_CHARS).collect()
}
