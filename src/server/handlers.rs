use super::types::{AnalyzeForm, AnalyzeResponse, ErrorResponse};
use crate::{Error, Result, sentiment::SentimentService};
use axum::{
    Form,
    extract::{State, rejection::FormRejection},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<SentimentService>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Missing fields and wrong content types are answered like any other
/// error, with a JSON `detail`.
pub async fn analyze(
    State(state): State<AppState>,
    form: std::result::Result<Form<AnalyzeForm>, FormRejection>,
) -> std::result::Result<Json<AnalyzeResponse>, ApiError> {
    match classify_form(&state, form).await {
        Ok(sentiment) => {
            info!("Returning sentiment: {}", sentiment);
            Ok(Json(AnalyzeResponse { sentiment }))
        }
        Err(e) => {
            let status = e.status_code();
            if e.is_client_error() {
                warn!("Rejected analyze request ({}): {}", status.as_u16(), e);
            } else {
                error!("Failed to analyze text ({}): {}", status.as_u16(), e);
            }
            Err((
                status,
                Json(ErrorResponse {
                    detail: e.to_string(),
                }),
            ))
        }
    }
}

async fn classify_form(
    state: &AppState,
    form: std::result::Result<Form<AnalyzeForm>, FormRejection>,
) -> Result<String> {
    let Form(form) = form.map_err(|rejection| Error::InvalidForm(rejection.body_text()))?;
    state.service.classify(&form.text).await
}
