//! Voice vendor listing types and effective-voice resolution.

use serde::{Deserialize, Serialize};

/// Voice id a caller sends to ask for the vendor's first listed voice.
pub const DEFAULT_VOICE_SENTINEL: &str = "default";

/// A single entry from the vendor's voice listing.
///
/// Only `voice_id` is interpreted; every other vendor field is carried along
/// untouched in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorVoice {
    pub voice_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Response body of the vendor's `GET /v1/voices`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VoiceList {
    #[serde(default)]
    pub voices: Vec<VendorVoice>,
}

impl VoiceList {
    /// The conversion/synthesis target used when no specific voice is asked for.
    ///
    /// Always the first listed entry; there is no ranking.
    pub fn first(&self) -> Option<&VendorVoice> {
        self.voices.first()
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }
}

/// Resolves the voice id actually used for synthesis.
///
/// `"default"` (or no id at all) selects the first listed voice; any other id,
/// the empty string included, is used verbatim even if it is not listed. Returns `None`
/// only when the default was requested and the listing is empty.
pub fn resolve_effective_voice<'a>(
    requested: Option<&'a str>,
    voices: &'a VoiceList,
) -> Option<&'a str> {
    match requested {
        None | Some(DEFAULT_VOICE_SENTINEL) => {
            voices.first().map(|voice| voice.voice_id.as_str())
        }
        Some(id) => Some(id),
    }
}
