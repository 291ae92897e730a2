//! Request and response payloads shared across the Aegis crates.
//!
//! Every type here is transient: it is built from a single inbound request or
//! a single vendor response and dropped when that request completes. Nothing
//! is persisted or cached between requests.

pub mod voice;

pub use voice::{resolve_effective_voice, VendorVoice, VoiceList, DEFAULT_VOICE_SENTINEL};

use serde::{Deserialize, Serialize};

/// Caller-supplied fields for provisioning a conversational agent.
///
/// The fields are optional on the wire. The provisioning route forwards
/// whatever it receives; the pages are responsible for requiring them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentConfig {
    /// Display name of the doctor the agent translates for.
    #[serde(default)]
    pub doctor_name: Option<String>,
    /// Medical specialization, forwarded verbatim to the vendor.
    #[serde(default)]
    pub specialization: Option<String>,
    /// Ordered language codes the agent may speak.
    #[serde(default)]
    pub languages: Option<Vec<String>>,
}

/// Query string for `GET /api/agent`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgentQuery {
    #[serde(rename = "agentId")]
    pub agent_id: Option<String>,
}

/// Body of `POST /api/text-to-speech`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextToSpeechRequest {
    #[serde(default)]
    pub text: Option<String>,
    /// Sent by the dashboard page but not used for synthesis.
    #[serde(default)]
    pub language: Option<String>,
}

/// Body of `POST /api/translate-and-speak`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRequest {
    #[serde(default)]
    pub voice_id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub target_language: Option<String>,
}

/// Returns the value if it is present and not empty.
///
/// Required fields are checked with this so that `""` and a missing key are
/// rejected the same way.
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
