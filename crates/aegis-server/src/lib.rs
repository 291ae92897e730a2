//! Aegis Command server library logic.
//!
//! Hosts the route handlers behind the dashboard pages. Each handler is a
//! stateless, linear chain of vendor calls; the only shared state is the pair
//! of vendor clients built once at startup.

pub mod api;
pub mod api_agent;
pub mod api_clone;
pub mod api_speech;
pub mod api_translate;
pub mod config;

use aegis_translate::TranslationClient;
use aegis_voice::VoiceClient;
use api::ApiError;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Extension, Json, Router,
};
use config::{Config, ConfigError, LimitsConfig};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Voice vendor client; `None` when no credential is configured.
    pub voice: Option<Arc<VoiceClient>>,
    /// Text-generation vendor client; `None` when no credential is configured.
    pub translator: Option<Arc<TranslationClient>>,
    /// Request body ceilings.
    pub limits: LimitsConfig,
}

impl AppState {
    /// Builds the vendor clients from validated configuration.
    ///
    /// A blank credential leaves the matching client unset and is logged; the
    /// routes that need it then answer with a configuration error.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;

        let voice = if config.voice.is_configured() {
            let client = VoiceClient::new(config.voice.clone()).map_err(|e| ConfigError::Client {
                vendor: "voice",
                reason: e.to_string(),
            })?;
            Some(Arc::new(client))
        } else {
            tracing::warn!("voice API key is not configured; voice routes will fail");
            None
        };

        let translator = if config.translation.is_configured() {
            let client = TranslationClient::new(config.translation.clone()).map_err(|e| {
                ConfigError::Client {
                    vendor: "translation",
                    reason: e.to_string(),
                }
            })?;
            Some(Arc::new(client))
        } else {
            tracing::warn!("translation API key is not configured; translate-and-speak will fail");
            None
        };

        Ok(Self {
            voice,
            translator,
            limits: config.limits,
        })
    }

    /// The voice client, or a configuration error if it is not set up.
    pub fn voice(&self) -> Result<&VoiceClient, ApiError> {
        self.voice
            .as_deref()
            .ok_or_else(|| ApiError::Configuration("Voice API key is not configured".to_string()))
    }

    /// The translation client, or a configuration error if it is not set up.
    pub fn translator(&self) -> Result<&TranslationClient, ApiError> {
        self.translator.as_deref().ok_or_else(|| {
            ApiError::Configuration("Translation API key is not configured".to_string())
        })
    }
}

/// Health check handler.
async fn health(Extension(state): Extension<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "voiceConfigured": state.voice.is_some(),
        "translationConfigured": state.translator.is_some(),
    }))
}

/// Builds the application router with all routes.
pub fn app(state: AppState) -> Router {
    // The voice sample upload gets its own, larger ceiling.
    let upload_routes = Router::new()
        .route("/api/clone-voice", post(api_clone::clone_voice_handler))
        .layer(DefaultBodyLimit::max(state.limits.max_audio_upload_bytes));

    Router::new()
        .route("/health", get(health))
        .route(
            "/api/agent",
            post(api_agent::create_agent_handler).get(api_agent::get_agent_handler),
        )
        .route(
            "/api/text-to-speech",
            post(api_speech::text_to_speech_handler),
        )
        .route(
            "/api/translate-and-speak",
            post(api_translate::translate_and_speak_handler),
        )
        .merge(upload_routes)
        .layer(DefaultBodyLimit::max(state.limits.max_request_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(Extension(Arc::new(state)))
}
