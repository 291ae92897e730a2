//! Client for the voice vendor's REST API.
//!
//! Covers the four capabilities the Aegis routes rely on: conversational
//! agent provisioning, voice listing, text-to-speech (buffered and streamed)
//! and speech-to-speech conversion. Every call is a single outbound request
//! with no retry; a non-success status is turned into [`VoiceError::Upstream`]
//! carrying the vendor's own message where one is present.

pub mod agent;
pub mod client;
pub mod config;
pub mod error;

pub use agent::CreateAgentPayload;
pub use client::{AudioStream, VoiceClient, VoiceSample};
pub use config::VoiceConfig;
pub use error::VoiceError;
