//! Translation through an OpenAI-compatible text-generation vendor.
//!
//! A translation is one chat-completion call with a fixed prompt template.
//! An empty completion is treated as a failed translation and is not retried.

pub mod client;
pub mod config;
pub mod error;

pub use client::{translation_prompt, TranslationClient};
pub use config::TranslationConfig;
pub use error::TranslateError;
