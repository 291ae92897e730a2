//! Translate-and-speak handler.
//!
//! Translates the caller's text with the text-generation vendor, then
//! synthesizes the translation with the voice vendor's streaming endpoint.

use crate::{
    api::{parse_json_body, streamed_audio_response, ApiError},
    AppState,
};
use aegis_types::{non_empty, resolve_effective_voice, TranslationRequest};
use aegis_voice::VoiceError;
use axum::{body::Bytes, extract::Extension, response::Response};
use std::sync::Arc;

/// Handler for `POST /api/translate-and-speak`.
pub async fn translate_and_speak_handler(
    Extension(state): Extension<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    translate_and_speak(&state, &body)
        .await
        .inspect_err(|e| e.log("POST /api/translate-and-speak"))
}

async fn translate_and_speak(state: &AppState, body: &Bytes) -> Result<Response, ApiError> {
    let request: TranslationRequest = parse_json_body(body)?;
    let (text, target_language) = match (
        non_empty(request.text.as_deref()),
        non_empty(request.target_language.as_deref()),
    ) {
        (Some(text), Some(lang)) => (text, lang),
        _ => {
            return Err(ApiError::BadRequest(
                "Missing required parameters: text and targetLanguage".to_string(),
            ))
        }
    };
    // Both credentials are checked before any vendor is called.
    let translator = state.translator()?;
    let voice = state.voice()?;

    let translated = translator.translate(text, target_language).await?;

    let voices = voice.list_voices().await?;
    let voice_id = resolve_effective_voice(request.voice_id.as_deref(), &voices)
        .ok_or(VoiceError::NoVoices)?;
    tracing::info!(
        target_language,
        voice_id,
        "synthesizing translated text"
    );

    let audio = voice.stream_text_to_speech(voice_id, &translated).await?;
    Ok(streamed_audio_response(audio))
}
