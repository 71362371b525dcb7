use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::application::services::{DownloadFormat, GenerationOutcome};
use crate::domain::{GenerationKind, ItemCount, SessionId};
use crate::presentation::state::AppState;

use super::error_response::ErrorResponse;
use super::views::{GenerationResponse, SessionView};

const UPLOAD_FIELD: &str = "file";

#[derive(Serialize)]
pub struct CreateSessionResponse {
    pub session_id: String,
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub kind: GenerationKind,
    pub count: Option<i64>,
}

fn parse_session_id(raw: &str) -> Result<SessionId, Response> {
    raw.parse::<SessionId>()
        .map_err(|_| ErrorResponse::bad_request(format!("Invalid session ID: {}", raw)))
}

fn generation_response(outcome: GenerationOutcome) -> Response {
    (
        StatusCode::OK,
        Json(GenerationResponse {
            session: SessionView::from_session(&outcome.session),
            cached: outcome.cached,
            warnings: outcome.warnings,
        }),
    )
        .into_response()
}

#[tracing::instrument(skip(state))]
pub async fn create_session_handler(State(state): State<AppState>) -> Response {
    match state.controller.create_session().await {
        Ok(id) => (
            StatusCode::CREATED,
            Json(CreateSessionResponse {
                session_id: id.to_string(),
            }),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

#[tracing::instrument(skip(state))]
pub async fn get_session_handler(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Response {
    let id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.controller.get(id).await {
        Ok(session) => (StatusCode::OK, Json(SessionView::from_session(&session))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Accepts a multipart body with a `file` field, stores it and extracts its text.
#[tracing::instrument(skip(state, multipart))]
pub async fn upload_document_handler(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    mut multipart: Multipart,
) -> Response {
    let id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let field = loop {
        match multipart.next_field().await {
            Ok(Some(f)) if f.name() == Some(UPLOAD_FIELD) => break f,
            Ok(Some(_)) => continue,
            Ok(None) => {
                tracing::warn!("Upload request with no file field");
                return ErrorResponse::bad_request("No file uploaded");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return ErrorResponse::bad_request(format!("Failed to read multipart: {}", e));
            }
        }
    };

    let filename = match field.file_name() {
        Some(name) if !name.trim().is_empty() => name.to_string(),
        _ => return ErrorResponse::bad_request("Uploaded file has no name"),
    };

    let data = match field.bytes().await {
        Ok(d) => d,
        Err(e) => {
            tracing::error!(error = %e, "Failed to read file bytes");
            return ErrorResponse::bad_request(format!("Failed to read file: {}", e));
        }
    };

    tracing::debug!(filename = %filename, bytes = data.len(), "File data received");

    match state.controller.upload(id, &filename, data).await {
        Ok(session) => (StatusCode::OK, Json(SessionView::from_session(&session))).into_response(),
        Err(e) => e.into_response(),
    }
}

#[tracing::instrument(skip(state))]
pub async fn generate_handler(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(request): Json<GenerateRequest>,
) -> Response {
    let id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let count = ItemCount::clamped(
        request
            .count
            .unwrap_or(state.settings.generation.default_count as i64),
    );

    match state.controller.generate(id, request.kind, count).await {
        Ok(outcome) => generation_response(outcome),
        Err(e) => e.into_response(),
    }
}

#[tracing::instrument(skip(state))]
pub async fn regenerate_handler(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Response {
    let id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.controller.regenerate(id).await {
        Ok(outcome) => generation_response(outcome),
        Err(e) => e.into_response(),
    }
}

#[tracing::instrument(skip(state))]
pub async fn download_handler(
    State(state): State<AppState>,
    Path((session_id, format)): Path<(String, String)>,
) -> Response {
    let id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let format = match format.parse::<DownloadFormat>() {
        Ok(f) => f,
        Err(message) => return ErrorResponse::bad_request(message),
    };

    match state.controller.download(id, format).await {
        Ok(download) => {
            let disposition = format!(
                "attachment; filename=\"{}\"",
                download.filename.replace('"', "")
            );
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, download.content_type.to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                download.data,
            )
                .into_response()
        }
        Err(e) => e.into_response(),
    }
}
