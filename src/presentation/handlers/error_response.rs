use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::ports::LlmClientError;
use crate::application::services::SessionError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: &'static str,
    pub retryable: bool,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(Self {
                error: message.into(),
                kind: "bad_request",
                retryable: false,
            }),
        )
            .into_response()
    }
}

pub fn status_for(error: &SessionError) -> StatusCode {
    match error {
        SessionError::SessionNotFound(_) => StatusCode::NOT_FOUND,
        SessionError::UnsupportedFormat(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        SessionError::ExtractionFailure(_) => StatusCode::UNPROCESSABLE_ENTITY,
        SessionError::ServiceError(LlmClientError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
        SessionError::ServiceError(_) => StatusCode::BAD_GATEWAY,
        SessionError::RenderFailure(_) => StatusCode::UNPROCESSABLE_ENTITY,
        SessionError::InvalidState(_) | SessionError::SessionBusy | SessionError::NoResult => {
            StatusCode::CONFLICT
        }
        SessionError::ArtifactUnavailable(_) => StatusCode::NOT_FOUND,
        SessionError::Storage(_) | SessionError::Repository(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        if status.is_server_error() {
            tracing::error!(error = %self, kind = self.kind(), "Request failed");
        } else {
            tracing::warn!(error = %self, kind = self.kind(), "Request rejected");
        }

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
                kind: self.kind(),
                retryable: self.is_retryable(),
            }),
        )
            .into_response()
    }
}
