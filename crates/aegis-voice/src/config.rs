use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_BASE_URL: &str = "https://api.elevenlabs.io";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_tts_voice_id() -> String {
    "21m00Tcm4TlvDq8ikWAM".to_string()
}

fn default_tts_model_id() -> String {
    "eleven_monolingual_v1".to_string()
}

fn default_stream_model_id() -> String {
    "eleven_multilingual_v1".to_string()
}

fn default_sts_model_id() -> String {
    "eleven_multilingual_sts_v2".to_string()
}

fn default_sts_output_format() -> String {
    "mp3_44100_128".to_string()
}

fn default_agent_tts_model_id() -> String {
    "eleven_turbo_v2".to_string()
}

/// Settings for the voice vendor.
#[derive(Clone, Serialize, Deserialize)]
pub struct VoiceConfig {
    /// Vendor credential sent as `xi-api-key`. Blank means "not configured".
    #[serde(default, skip_serializing)]
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Voice used by the plain text-to-speech route.
    #[serde(default = "default_tts_voice_id")]
    pub tts_voice_id: String,
    #[serde(default = "default_tts_model_id")]
    pub tts_model_id: String,
    /// Model for the streaming text-to-speech endpoint.
    #[serde(default = "default_stream_model_id")]
    pub stream_model_id: String,
    #[serde(default = "default_sts_model_id")]
    pub sts_model_id: String,
    /// Codec requested from speech-to-speech conversion.
    #[serde(default = "default_sts_output_format")]
    pub sts_output_format: String,
    /// TTS model written into newly provisioned agents.
    #[serde(default = "default_agent_tts_model_id")]
    pub agent_tts_model_id: String,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            tts_voice_id: default_tts_voice_id(),
            tts_model_id: default_tts_model_id(),
            stream_model_id: default_stream_model_id(),
            sts_model_id: default_sts_model_id(),
            sts_output_format: default_sts_output_format(),
            agent_tts_model_id: default_agent_tts_model_id(),
        }
    }
}

impl fmt::Debug for VoiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VoiceConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("tts_voice_id", &self.tts_voice_id)
            .field("tts_model_id", &self.tts_model_id)
            .field("stream_model_id", &self.stream_model_id)
            .field("sts_model_id", &self.sts_model_id)
            .field("sts_output_format", &self.sts_output_format)
            .field("agent_tts_model_id", &self.agent_tts_model_id)
            .finish()
    }
}

impl VoiceConfig {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Whether a non-blank credential is present.
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}
