use thiserror::Error;

#[derive(Error, Debug)]
pub enum VoiceError {
    #[error("voice vendor request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The vendor answered with a non-success status. Holds the vendor's
    /// message, or a generic one if the body carried none.
    #[error("{0}")]
    Upstream(String),

    #[error("No voices available")]
    NoVoices,

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Extracts `detail` from a vendor error body.
///
/// The vendor reports `detail` either as a plain string or as an object with a
/// `message` field; both are accepted.
pub(crate) fn detail_text(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Object(obj) => message_field(obj),
        _ => None,
    }
}

/// Extracts `detail.message` only, as reported by the speech endpoints.
pub(crate) fn detail_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    message_field(value.get("detail")?.as_object()?)
}

/// Uses the raw body text as the message.
pub(crate) fn raw_text(body: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(body);
    if text.trim().is_empty() {
        None
    } else {
        Some(text.into_owned())
    }
}

fn message_field(obj: &serde_json::Map<String, serde_json::Value>) -> Option<String> {
    obj.get("message")
        .and_then(|m| m.as_str())
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}
