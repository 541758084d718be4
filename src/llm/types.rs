use serde::{Deserialize, Serialize};

/// Body of `POST /api/generate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub stream: bool,
}

/// Non-streaming reply from `/api/generate`. Only `response` is used; a
/// missing field reads as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub done: bool,
}

impl GenerateRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            stream: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_request_disables_streaming() {
        let request = GenerateRequest::new("mistral", "Classify this");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"model": "mistral", "prompt": "Classify this", "stream": false})
        );
    }

    #[test]
    fn test_response_ignores_extra_fields() {
        let body = json!({
            "model": "mistral",
            "created_at": "2024-01-01T00:00:00Z",
            "response": " Positive.",
            "done": true,
            "eval_count": 3
        });

        let response: GenerateResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.response, " Positive.");
        assert!(response.done);
    }

    #[test]
    fn test_response_missing_field_is_empty() {
        let response: GenerateResponse = serde_json::from_str(r#"{"done": true}"#).unwrap();
        assert_eq!(response.response, "");
    }
}
