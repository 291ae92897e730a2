//! Plain text-to-speech handler used by the dashboard summary.

use crate::{
    api::{audio_response, parse_json_body, ApiError},
    AppState,
};
use aegis_types::{non_empty, TextToSpeechRequest};
use axum::{body::Bytes, extract::Extension, response::Response};
use std::sync::Arc;

/// Handler for `POST /api/text-to-speech`.
///
/// Synthesizes with the configured default voice and returns `audio/mpeg`.
pub async fn text_to_speech_handler(
    Extension(state): Extension<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    text_to_speech(&state, &body)
        .await
        .inspect_err(|e| e.log("POST /api/text-to-speech"))
}

async fn text_to_speech(state: &AppState, body: &Bytes) -> Result<Response, ApiError> {
    let request: TextToSpeechRequest = parse_json_body(body)?;
    let text = non_empty(request.text.as_deref())
        .ok_or_else(|| ApiError::BadRequest("Text is required".to_string()))?;
    let voice = state.voice()?;

    let audio = voice.text_to_speech(text).await?;
    tracing::debug!(
        bytes = audio.len(),
        language = request.language.as_deref().unwrap_or("-"),
        "text-to-speech complete"
    );
    Ok(audio_response(audio))
}
