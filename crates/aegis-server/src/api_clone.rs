//! Voice sample conversion handler.
//!
//! Takes a recorded sample and converts it, through the vendor's
//! speech-to-speech endpoint, into the first voice the vendor lists.

use crate::{
    api::{streamed_audio_response, ApiError},
    AppState,
};
use aegis_voice::{VoiceError, VoiceSample};
use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, Extension, Multipart},
    response::Response,
};
use std::sync::Arc;

/// Handler for `POST /api/clone-voice` (multipart fields `audio` and `name`).
pub async fn clone_voice_handler(
    Extension(state): Extension<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    clone_voice(&state, multipart)
        .await
        .inspect_err(|e| e.log("POST /api/clone-voice"))
}

async fn clone_voice(
    state: &AppState,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    let mut multipart = multipart
        .map_err(|e| ApiError::InternalServerError(format!("failed to read form data: {}", e)))?;
    let sample = read_sample(&mut multipart).await?.ok_or_else(|| {
        ApiError::BadRequest("Missing required parameters: audio file and name".to_string())
    })?;
    let voice = state.voice()?;

    let voices = voice.list_voices().await?;
    let target = voices.first().ok_or(VoiceError::NoVoices)?;
    tracing::info!(
        name = %sample.name,
        target_voice = %target.voice_id,
        bytes = sample.audio.len(),
        "converting voice sample"
    );

    let audio = voice
        .stream_speech_to_speech(&target.voice_id, sample)
        .await?;
    Ok(streamed_audio_response(audio))
}

/// Collects the `audio` and `name` fields.
///
/// Returns `None` if either is absent or empty. Other fields are ignored.
async fn read_sample(multipart: &mut Multipart) -> Result<Option<VoiceSample>, ApiError> {
    let mut audio: Option<(Bytes, Option<String>, Option<String>)> = None;
    let mut name: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InternalServerError(format!("failed to read form data: {}", e)))?
    {
        let field_name = field.name().map(str::to_string);
        match field_name.as_deref() {
            Some("audio") => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await.map_err(|e| {
                    ApiError::InternalServerError(format!("failed to read audio: {}", e))
                })?;
                audio = Some((data, file_name, content_type));
            }
            Some("name") => {
                let text = field.text().await.map_err(|e| {
                    ApiError::InternalServerError(format!("failed to read name: {}", e))
                })?;
                name = Some(text);
            }
            _ => {}
        }
    }

    let sample = match (audio, name) {
        (Some((audio, file_name, content_type)), Some(name))
            if !audio.is_empty() && !name.is_empty() =>
        {
            Some(VoiceSample {
                audio,
                name,
                file_name,
                content_type,
            })
        }
        _ => None,
    };
    Ok(sample)
}
