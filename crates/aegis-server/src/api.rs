//! Error mapping and response helpers shared by the route handlers.

use aegis_translate::TranslateError;
use aegis_voice::{AudioStream, VoiceError};
use axum::{
    body::{Body, Bytes},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Media type of every audio response.
pub const AUDIO_MPEG: &str = "audio/mpeg";

/// API error type mapping to HTTP status codes.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required field is missing.
    #[error("invalid input: {0}")]
    BadRequest(String),
    /// A vendor credential is not configured.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// A vendor call failed or returned unusable content.
    #[error("upstream error: {0}")]
    Upstream(String),
    #[error("internal server error: {0}")]
    InternalServerError(String),
}

impl ApiError {
    fn parts(self) -> (StatusCode, String) {
        match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Configuration(msg)
            | ApiError::Upstream(msg)
            | ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        }
    }

    /// Logs the failure against `route` at a level matching its cause.
    pub fn log(&self, route: &'static str) {
        match self {
            ApiError::BadRequest(_) => {
                tracing::debug!(route, error = %self, "rejected request")
            }
            ApiError::Configuration(_) => {
                tracing::warn!(route, error = %self, "route not configured")
            }
            ApiError::Upstream(_) | ApiError::InternalServerError(_) => {
                tracing::error!(route, error = %self, "request failed")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.parts();

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

impl From<VoiceError> for ApiError {
    fn from(err: VoiceError) -> Self {
        match err {
            VoiceError::Config(msg) => ApiError::Configuration(msg),
            VoiceError::Upstream(msg) => ApiError::Upstream(msg),
            other @ (VoiceError::NoVoices | VoiceError::Http(_)) => {
                ApiError::Upstream(other.to_string())
            }
        }
    }
}

impl From<TranslateError> for ApiError {
    fn from(err: TranslateError) -> Self {
        match err {
            TranslateError::Config(msg) => ApiError::Configuration(msg),
            TranslateError::Upstream(msg) => ApiError::Upstream(msg),
            other @ (TranslateError::EmptyTranslation | TranslateError::Http(_)) => {
                ApiError::Upstream(other.to_string())
            }
        }
    }
}

/// Parses a JSON request body.
///
/// Malformed or absent JSON is reported as a 500 with the parser's message,
/// the same way as any other failure past routing.
pub fn parse_json_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    serde_json::from_slice(body)
        .map_err(|e| ApiError::InternalServerError(format!("invalid JSON body: {}", e)))
}

/// Wraps fully-read audio in an `audio/mpeg` response.
pub fn audio_response(audio: Bytes) -> Response {
    ([(header::CONTENT_TYPE, AUDIO_MPEG)], audio).into_response()
}

/// Streams vendor audio through as an `audio/mpeg` response.
pub fn streamed_audio_response(audio: AudioStream) -> Response {
    let mut response = Body::from_stream(audio.into_stream()).into_response();
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(AUDIO_MPEG));
    response
}
