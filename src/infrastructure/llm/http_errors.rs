use reqwest::StatusCode;

use crate::application::ports::LlmClientError;

pub(crate) fn status_error(status: StatusCode, body: String) -> LlmClientError {
    let detail = format!("HTTP {}: {}", status, body);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmClientError::Unauthorized(detail),
        StatusCode::TOO_MANY_REQUESTS => LlmClientError::RateLimited,
        s if s.is_server_error() => LlmClientError::ServerError(detail),
        _ => LlmClientError::InvalidRequest(detail),
    }
}

pub(crate) fn transport_error(error: reqwest::Error, timeout_secs: u64) -> LlmClientError {
    if error.is_timeout() {
        LlmClientError::Timeout(timeout_secs)
    } else {
        LlmClientError::Network(error.to_string())
    }
}
