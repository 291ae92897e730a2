use crate::agent::CreateAgentPayload;
use crate::config::VoiceConfig;
use crate::error::{detail_message, detail_text, raw_text, VoiceError};
use aegis_types::{AgentConfig, VoiceList};
use bytes::Bytes;
use futures_util::Stream;
use reqwest::header::ACCEPT;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Response, Url};
use serde::Serialize;

const API_KEY_HEADER: &str = "xi-api-key";
const AUDIO_MPEG: &str = "audio/mpeg";
const APPLICATION_JSON: &str = "application/json";

/// Voice settings sent with every text-to-speech request.
#[derive(Debug, Clone, Copy, Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
}

const SPEECH_VOICE_SETTINGS: VoiceSettings = VoiceSettings {
    stability: 0.5,
    similarity_boost: 0.5,
};

#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettings,
}

/// An uploaded audio sample to be converted.
#[derive(Debug, Clone)]
pub struct VoiceSample {
    pub audio: Bytes,
    /// Display name supplied with the upload.
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
}

/// A successful audio response from the vendor, not yet read.
#[derive(Debug)]
pub struct AudioStream {
    response: Response,
}

impl AudioStream {
    /// Yields the audio bytes as they arrive from the vendor.
    pub fn into_stream(
        self,
    ) -> impl Stream<Item = Result<Bytes, reqwest::Error>> + Send + 'static {
        self.response.bytes_stream()
    }

    /// Reads the whole body into memory.
    pub async fn bytes(self) -> Result<Bytes, VoiceError> {
        Ok(self.response.bytes().await?)
    }
}

/// Client for the voice vendor.
///
/// Holds no per-request state; one instance is shared by all handlers.
#[derive(Debug, Clone)]
pub struct VoiceClient {
    config: VoiceConfig,
    base_url: Url,
    http: reqwest::Client,
}

impl VoiceClient {
    /// Creates a client from validated configuration.
    ///
    /// The base URL scheme is checked at startup; this only fails if the URL
    /// does not parse or the credential is blank.
    pub fn new(config: VoiceConfig) -> Result<Self, VoiceError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            VoiceError::Config(format!("invalid base URL {:?}: {}", config.base_url, e))
        })?;
        if !config.is_configured() {
            return Err(VoiceError::Config("voice API key is empty".to_string()));
        }
        let http = reqwest::Client::builder()
            .user_agent(concat!("aegis-voice/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            config,
            base_url,
            http,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, VoiceError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                VoiceError::Config(format!("base URL cannot be a base: {}", self.base_url))
            })?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    /// Provisions a conversational agent and returns the vendor's record.
    pub async fn create_agent(&self, agent: &AgentConfig) -> Result<serde_json::Value, VoiceError> {
        let payload = CreateAgentPayload::new(agent, &self.config.agent_tts_model_id);
        let response = self
            .http
            .post(self.endpoint(&["v1", "convai", "agents", "create"])?)
            .header(API_KEY_HEADER, &self.config.api_key)
            .header(ACCEPT, APPLICATION_JSON)
            .json(&payload)
            .send()
            .await?;

        let response = ensure_success(response, detail_text, "Failed to create agent").await?;
        let record: serde_json::Value = response.json().await?;
        tracing::debug!(name = %payload.name, "voice vendor created agent");
        Ok(record)
    }

    /// Fetches an existing agent by id.
    pub async fn get_agent(&self, agent_id: &str) -> Result<serde_json::Value, VoiceError> {
        let response = self
            .http
            .get(self.endpoint(&["v1", "convai", "agents", agent_id])?)
            .header(API_KEY_HEADER, &self.config.api_key)
            .header(ACCEPT, APPLICATION_JSON)
            .send()
            .await?;

        let response = ensure_success(response, detail_text, "Failed to fetch agent").await?;
        Ok(response.json().await?)
    }

    /// Lists the vendor's voices.
    ///
    /// Fetched fresh on every call. An empty listing is an error, so callers
    /// can rely on [`VoiceList::first`] being present.
    pub async fn list_voices(&self) -> Result<VoiceList, VoiceError> {
        let response = self
            .http
            .get(self.endpoint(&["v1", "voices"])?)
            .header(API_KEY_HEADER, &self.config.api_key)
            .header(ACCEPT, APPLICATION_JSON)
            .send()
            .await?;

        let response =
            ensure_success(response, detail_text, "Failed to fetch available voices").await?;
        let voices: VoiceList = response.json().await?;
        if voices.is_empty() {
            return Err(VoiceError::NoVoices);
        }
        tracing::debug!(count = voices.voices.len(), "voice vendor listed voices");
        Ok(voices)
    }

    /// Synthesizes `text` with the configured default voice and returns the
    /// complete MPEG audio.
    pub async fn text_to_speech(&self, text: &str) -> Result<Bytes, VoiceError> {
        let body = SpeechRequest {
            text,
            model_id: &self.config.tts_model_id,
            voice_settings: SPEECH_VOICE_SETTINGS,
        };
        let response = self
            .http
            .post(self.endpoint(&["v1", "text-to-speech", self.config.tts_voice_id.as_str()])?)
            .header(API_KEY_HEADER, &self.config.api_key)
            .header(ACCEPT, AUDIO_MPEG)
            .json(&body)
            .send()
            .await?;

        let response =
            ensure_success(response, detail_message, "Failed to convert text to speech").await?;
        let audio = response.bytes().await?;
        tracing::debug!(bytes = audio.len(), "voice vendor synthesized speech");
        Ok(audio)
    }

    /// Synthesizes `text` with `voice_id` through the streaming endpoint.
    pub async fn stream_text_to_speech(
        &self,
        voice_id: &str,
        text: &str,
    ) -> Result<AudioStream, VoiceError> {
        let body = SpeechRequest {
            text,
            model_id: &self.config.stream_model_id,
            voice_settings: SPEECH_VOICE_SETTINGS,
        };
        let response = self
            .http
            .post(self.endpoint(&["v1", "text-to-speech", voice_id, "stream"])?)
            .header(API_KEY_HEADER, &self.config.api_key)
            .header(ACCEPT, AUDIO_MPEG)
            .json(&body)
            .send()
            .await?;

        let response =
            ensure_success(response, detail_message, "Failed to generate speech").await?;
        Ok(AudioStream { response })
    }

    /// Converts `sample` into `target_voice_id` through the streaming
    /// speech-to-speech endpoint.
    pub async fn stream_speech_to_speech(
        &self,
        target_voice_id: &str,
        sample: VoiceSample,
    ) -> Result<AudioStream, VoiceError> {
        let length = sample.audio.len() as u64;
        let mut audio = Part::stream_with_length(Body::from(sample.audio), length)
            .file_name(sample.file_name.unwrap_or_else(|| "audio".to_string()));
        if let Some(content_type) = sample.content_type.as_deref() {
            audio = audio.mime_str(content_type)?;
        }

        let form = Form::new()
            .part("audio", audio)
            .text("model_id", self.config.sts_model_id.clone())
            .text("output_format", self.config.sts_output_format.clone());

        let response = self
            .http
            .post(self.endpoint(&["v1", "speech-to-speech", target_voice_id, "stream"])?)
            .header(API_KEY_HEADER, &self.config.api_key)
            .header(ACCEPT, AUDIO_MPEG)
            .multipart(form)
            .send()
            .await?;

        let response = ensure_success(response, raw_text, "Failed to convert speech").await?;
        Ok(AudioStream { response })
    }
}

/// Passes a success response through, or turns the error body into
/// [`VoiceError::Upstream`] using `extract`, falling back to `fallback`.
async fn ensure_success(
    response: Response,
    extract: fn(&[u8]) -> Option<String>,
    fallback: &str,
) -> Result<Response, VoiceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.bytes().await.unwrap_or_default();
    let message = extract(&body).unwrap_or_else(|| fallback.to_string());
    tracing::warn!(%status, error = %message, "voice vendor returned an error");
    Err(VoiceError::Upstream(message))
}
