use aegis_types::AgentConfig;
use aegis_voice::{VoiceClient, VoiceConfig, VoiceError, VoiceSample};
use futures_util::StreamExt;
use mockito::Matcher;
use serde_json::json;

fn client_for(server: &mockito::Server) -> VoiceClient {
    VoiceClient::new(VoiceConfig::new("test-key", server.url())).unwrap()
}

#[tokio::test]
async fn test_create_agent_posts_fixed_configuration() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/convai/agents/create")
        .match_header("xi-api-key", "test-key")
        .match_body(Matcher::PartialJson(json!({
            "name": "Dr. Grey - Medical Translator",
            "platform_settings": {
                "allowed_languages": ["en", "es"],
                "medical_specialization": "cardiology"
            }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"agent_id":"agent-123"}"#)
        .create_async()
        .await;

    let agent = AgentConfig {
        doctor_name: Some("Grey".to_string()),
        specialization: Some("cardiology".to_string()),
        languages: Some(vec!["en".to_string(), "es".to_string()]),
    };
    let record = client_for(&server).create_agent(&agent).await.unwrap();

    assert_eq!(record["agent_id"], "agent-123");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_create_agent_surfaces_vendor_detail() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/convai/agents/create")
        .with_status(422)
        .with_body(r#"{"detail":"Invalid language code"}"#)
        .create_async()
        .await;

    let err = client_for(&server)
        .create_agent(&AgentConfig::default())
        .await
        .unwrap_err();

    match err {
        VoiceError::Upstream(msg) => assert_eq!(msg, "Invalid language code"),
        other => panic!("expected Upstream error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_get_agent_falls_back_to_generic_message() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/v1/convai/agents/missing")
        .with_status(404)
        .with_body("not json")
        .create_async()
        .await;

    let err = client_for(&server).get_agent("missing").await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to fetch agent");
}

#[tokio::test]
async fn test_list_voices_rejects_empty_listing() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/v1/voices")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"voices":[]}"#)
        .create_async()
        .await;

    let err = client_for(&server).list_voices().await.unwrap_err();
    assert!(matches!(err, VoiceError::NoVoices));
    assert_eq!(err.to_string(), "No voices available");
}

#[tokio::test]
async fn test_list_voices_keeps_vendor_order() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/v1/voices")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"voices":[{"voice_id":"first"},{"voice_id":"second"}]}"#)
        .create_async()
        .await;

    let voices = client_for(&server).list_voices().await.unwrap();
    assert_eq!(voices.first().unwrap().voice_id, "first");
    assert_eq!(voices.voices.len(), 2);
}

#[tokio::test]
async fn test_text_to_speech_uses_default_voice() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/text-to-speech/21m00Tcm4TlvDq8ikWAM")
        .match_header("accept", "audio/mpeg")
        .match_body(Matcher::PartialJson(json!({
            "text": "Rest and fluids",
            "model_id": "eleven_monolingual_v1",
            "voice_settings": { "stability": 0.5, "similarity_boost": 0.5 }
        })))
        .with_status(200)
        .with_header("content-type", "audio/mpeg")
        .with_body(b"ID3-audio")
        .create_async()
        .await;

    let audio = client_for(&server)
        .text_to_speech("Rest and fluids")
        .await
        .unwrap();

    assert_eq!(&audio[..], b"ID3-audio");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_text_to_speech_reads_detail_message() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/text-to-speech/21m00Tcm4TlvDq8ikWAM")
        .with_status(401)
        .with_body(r#"{"detail":{"status":"invalid_api_key","message":"Invalid API key"}}"#)
        .create_async()
        .await;

    let err = client_for(&server).text_to_speech("hi").await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid API key");
}

#[tokio::test]
async fn test_stream_text_to_speech_streams_body() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/text-to-speech/voice-9/stream")
        .match_body(Matcher::PartialJson(json!({
            "text": "Tome dos tabletas",
            "model_id": "eleven_multilingual_v1"
        })))
        .with_status(200)
        .with_body(b"mpeg-bytes")
        .create_async()
        .await;

    let audio = client_for(&server)
        .stream_text_to_speech("voice-9", "Tome dos tabletas")
        .await
        .unwrap();

    let mut stream = Box::pin(audio.into_stream());
    let mut collected = Vec::new();
    while let Some(chunk) = stream.next().await {
        collected.extend_from_slice(&chunk.unwrap());
    }
    assert_eq!(collected, b"mpeg-bytes");
}

#[tokio::test]
async fn test_speech_to_speech_sends_multipart_sample() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/speech-to-speech/target-voice/stream")
        .match_header(
            "content-type",
            Matcher::Regex("^multipart/form-data; boundary=".to_string()),
        )
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="audio"; filename="sample.webm""#.to_string()),
            Matcher::Regex("eleven_multilingual_sts_v2".to_string()),
            Matcher::Regex("mp3_44100_128".to_string()),
        ]))
        .with_status(200)
        .with_body(b"converted")
        .create_async()
        .await;

    let sample = VoiceSample {
        audio: bytes::Bytes::from_static(b"webm-audio"),
        name: "Dr. Grey".to_string(),
        file_name: Some("sample.webm".to_string()),
        content_type: Some("audio/webm".to_string()),
    };
    let audio = client_for(&server)
        .stream_speech_to_speech("target-voice", sample)
        .await
        .unwrap();

    assert_eq!(&audio.bytes().await.unwrap()[..], b"converted");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_speech_to_speech_returns_raw_error_text() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/speech-to-speech/target-voice/stream")
        .with_status(400)
        .with_body("audio too short")
        .create_async()
        .await;

    let sample = VoiceSample {
        audio: bytes::Bytes::from_static(b"x"),
        name: "n".to_string(),
        file_name: None,
        content_type: None,
    };
    let err = client_for(&server)
        .stream_speech_to_speech("target-voice", sample)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "audio too short");
}
