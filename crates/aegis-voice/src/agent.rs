//! Payload for provisioning a medical-translation conversational agent.
//!
//! The vendor agent is created with a fixed conversation setup; only the
//! display name, allowed languages and specialization come from the caller.

use aegis_types::AgentConfig;
use serde::Serialize;

const FIRST_MESSAGE: &str =
    "Hello, I'm your medical instruction translator. How can I help you today?";

const ASR_KEYWORDS: &[&str] = &["medication", "dosage", "treatment", "symptoms", "diagnosis"];

const AUDIO_FORMAT: &str = "pcm_16000";

/// Builds the agent display name, e.g. `Dr. Grey - Medical Translator`.
pub(crate) fn agent_display_name(doctor_name: Option<&str>) -> String {
    format!("Dr. {} - Medical Translator", doctor_name.unwrap_or_default())
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateAgentPayload {
    pub name: String,
    pub conversation_config: ConversationConfig,
    pub platform_settings: PlatformSettings,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConversationConfig {
    pub agent: AgentSettings,
    pub asr: AsrSettings,
    pub turn: TurnSettings,
    pub tts: AgentTtsSettings,
}

#[derive(Debug, Clone, Serialize)]
pub struct AgentSettings {
    pub first_message: &'static str,
    pub language: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct AsrSettings {
    pub quality: &'static str,
    pub provider: &'static str,
    pub user_input_audio_format: &'static str,
    pub keywords: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct TurnSettings {
    pub turn_timeout: f64,
    pub mode: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct AgentTtsSettings {
    pub model_id: String,
    /// Placeholder until a cloned voice is attached to the agent.
    pub voice_id: &'static str,
    pub agent_output_audio_format: &'static str,
    pub optimize_streaming_latency: u8,
    pub stability: f64,
    pub similarity_boost: f64,
    pub pronunciation_dictionary_locators: Vec<PronunciationDictionaryLocator>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PronunciationDictionaryLocator {
    pub pronunciation_dictionary_id: &'static str,
    pub version_id: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlatformSettings {
    pub allowed_languages: Option<Vec<String>>,
    pub medical_specialization: Option<String>,
    pub translation_memory: bool,
    pub store_conversations: bool,
}

impl CreateAgentPayload {
    /// Merges the caller's fields into the fixed agent configuration.
    pub fn new(agent: &AgentConfig, tts_model_id: &str) -> Self {
        Self {
            name: agent_display_name(agent.doctor_name.as_deref()),
            conversation_config: ConversationConfig {
                agent: AgentSettings {
                    first_message: FIRST_MESSAGE,
                    language: "en",
                },
                asr: AsrSettings {
                    quality: "high",
                    provider: "elevenlabs",
                    user_input_audio_format: AUDIO_FORMAT,
                    keywords: ASR_KEYWORDS,
                },
                turn: TurnSettings {
                    turn_timeout: 1.1,
                    mode: "silence",
                },
                tts: AgentTtsSettings {
                    model_id: tts_model_id.to_string(),
                    voice_id: aegis_types::DEFAULT_VOICE_SENTINEL,
                    agent_output_audio_format: AUDIO_FORMAT,
                    optimize_streaming_latency: 1,
                    stability: 1.1,
                    similarity_boost: 1.1,
                    pronunciation_dictionary_locators: vec![PronunciationDictionaryLocator {
                        pronunciation_dictionary_id: "medical_terms",
                        version_id: "latest",
                    }],
                },
            },
            platform_settings: PlatformSettings {
                allowed_languages: agent.languages.clone(),
                medical_specialization: agent.specialization.clone(),
                translation_memory: true,
                store_conversations: true,
            },
        }
    }
}
