#![allow(dead_code)]

use aegis_server::{
    app,
    config::{Config, LimitsConfig},
    AppState,
};
use axum::{
    body::{Body, Bytes},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt; // for oneshot

pub const VOICE_KEY: &str = "xi-test-key";
pub const TRANSLATION_KEY: &str = "pplx-test-key";

/// Builds the router against mock vendors. `None` leaves that credential blank.
pub fn build_app(
    voice: &mockito::ServerGuard,
    voice_key: Option<&str>,
    translation: &mockito::ServerGuard,
    translation_key: Option<&str>,
) -> Router {
    build_app_with_config(
        voice,
        voice_key,
        translation,
        translation_key,
        Config::default(),
    )
}

/// Like [`build_app`], starting from `config` instead of the defaults.
pub fn build_app_with_config(
    voice: &mockito::ServerGuard,
    voice_key: Option<&str>,
    translation: &mockito::ServerGuard,
    translation_key: Option<&str>,
    mut config: Config,
) -> Router {
    config.voice.base_url = voice.url();
    config.voice.api_key = voice_key.unwrap_or_default().to_string();
    config.translation.base_url = translation.url();
    config.translation.api_key = translation_key.unwrap_or_default().to_string();

    let state = AppState::from_config(&config).unwrap();
    app(state)
}

pub struct Vendors {
    pub voice: mockito::ServerGuard,
    pub translation: mockito::ServerGuard,
}

impl Vendors {
    pub async fn start() -> Self {
        Self {
            voice: mockito::Server::new_async().await,
            translation: mockito::Server::new_async().await,
        }
    }

    pub fn app(&self) -> Router {
        build_app(
            &self.voice,
            Some(VOICE_KEY),
            &self.translation,
            Some(TRANSLATION_KEY),
        )
    }

    pub fn app_without_voice(&self) -> Router {
        build_app(&self.voice, None, &self.translation, Some(TRANSLATION_KEY))
    }

    pub fn app_without_translation(&self) -> Router {
        build_app(&self.voice, Some(VOICE_KEY), &self.translation, None)
    }

    /// Router with small body ceilings so limit tests stay cheap.
    pub fn app_with_limits(&self, limits: LimitsConfig) -> Router {
        let config = Config {
            limits,
            ..Config::default()
        };
        build_app_with_config(
            &self.voice,
            Some(VOICE_KEY),
            &self.translation,
            Some(TRANSLATION_KEY),
            config,
        )
    }

    /// Mocks `GET /v1/voices` returning the given ids in order.
    pub async fn mock_voices(&mut self, ids: &[&str]) -> mockito::Mock {
        let voices: Vec<Value> = ids
            .iter()
            .map(|id| serde_json::json!({ "voice_id": id, "name": format!("Voice {}", id) }))
            .collect();
        self.voice
            .mock("GET", "/v1/voices")
            .match_header("xi-api-key", VOICE_KEY)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(serde_json::json!({ "voices": voices }).to_string())
            .create_async()
            .await
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn content_type(&self) -> &str {
        self.headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }
}

pub async fn send(app: Router, req: Request<Body>) -> TestResponse {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    TestResponse {
        status,
        headers,
        body,
    }
}

pub fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub const BOUNDARY: &str = "aegis-test-boundary";

/// Encodes a `multipart/form-data` body with optional `audio` and `name` parts.
pub fn multipart_body(audio: Option<&[u8]>, name: Option<&str>) -> Vec<u8> {
    let mut body = Vec::new();
    if let Some(audio) = audio {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"audio\"; filename=\"sample.webm\"\r\nContent-Type: audio/webm\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(audio);
        body.extend_from_slice(b"\r\n");
    }
    if let Some(name) = name {
        body.extend_from_slice(
            format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"name\"\r\n\r\n{name}\r\n")
                .as_bytes(),
        );
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_request(audio: Option<&[u8]>, name: Option<&str>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/clone-voice")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(audio, name)))
        .unwrap()
}
