use crate::config::TranslationConfig;
use crate::error::TranslateError;
use reqwest::Url;
use serde::{Deserialize, Serialize};

/// Builds the single-turn prompt sent to the vendor.
pub fn translation_prompt(text: &str, target_language: &str) -> String {
    format!(
        "Translate the following text to {}: \"{}\"",
        target_language, text
    )
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client for the text-generation vendor.
#[derive(Debug, Clone)]
pub struct TranslationClient {
    config: TranslationConfig,
    completions_url: Url,
    http: reqwest::Client,
}

impl TranslationClient {
    /// Creates a client from validated configuration.
    ///
    /// The base URL scheme is checked at startup; this only fails if the URL
    /// does not parse or the credential is blank.
    pub fn new(config: TranslationConfig) -> Result<Self, TranslateError> {
        let mut completions_url = Url::parse(&config.base_url).map_err(|e| {
            TranslateError::Config(format!("invalid base URL {:?}: {}", config.base_url, e))
        })?;
        completions_url
            .path_segments_mut()
            .map_err(|_| {
                TranslateError::Config(format!("base URL cannot be a base: {}", config.base_url))
            })?
            .pop_if_empty()
            .extend(["chat", "completions"]);

        if !config.is_configured() {
            return Err(TranslateError::Config(
                "translation API key is empty".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("aegis-translate/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            config,
            completions_url,
            http,
        })
    }

    /// Sends `prompt` as a single user message and returns the completion text.
    ///
    /// A blank completion is [`TranslateError::EmptyTranslation`].
    pub async fn complete(&self, prompt: &str) -> Result<String, TranslateError> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .http
            .post(self.completions_url.clone())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let message =
                vendor_message(&raw).unwrap_or_else(|| "Failed to translate text".to_string());
            tracing::warn!(%status, error = %message, "translation vendor returned an error");
            return Err(TranslateError::Upstream(message));
        }

        let parsed: ChatResponse = response.json().await?;
        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(TranslateError::EmptyTranslation)?;

        tracing::debug!(
            chars = text.len(),
            model = %self.config.model,
            "translation vendor completed"
        );
        Ok(text)
    }

    /// Translates `text` into `target_language`.
    pub async fn translate(
        &self,
        text: &str,
        target_language: &str,
    ) -> Result<String, TranslateError> {
        self.complete(&translation_prompt(text, target_language)).await
    }
}

/// Pulls a human-readable message out of an OpenAI-style error body
/// (`{"error":{"message":..}}`), or uses the raw text if it is not JSON.
fn vendor_message(raw: &str) -> Option<String> {
    if raw.trim().is_empty() {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(value) => value
            .pointer("/error/message")
            .or_else(|| value.get("detail"))
            .or_else(|| value.get("error"))
            .and_then(|v| v.as_str())
            .filter(|m| !m.is_empty())
            .map(str::to_string),
        Err(_) => Some(raw.trim().to_string()),
    }
}
