use axum::http::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Text cannot be empty")]
    EmptyText,

    #[error("Invalid form submission: {0}")]
    InvalidForm(String),

    #[error("Could not connect to Ollama service. Make sure Ollama is running.")]
    OllamaUnreachable { url: String },

    #[error("Request to Ollama timed out")]
    OllamaTimeout,

    #[error("Error communicating with Ollama: {0}")]
    OllamaStatus(String),

    #[error("Invalid response format from Ollama")]
    InvalidResponse,

    #[error("Ollama returned empty response")]
    EmptyResponse,

    #[error("Error communicating with Ollama: {0}")]
    Network(#[from] reqwest::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// HTTP status the relay answers with when a request fails with this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::EmptyText => StatusCode::BAD_REQUEST,
            Self::InvalidForm(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::OllamaUnreachable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::OllamaTimeout => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the failure was caused by the caller rather than upstream.
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}
