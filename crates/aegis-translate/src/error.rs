use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("translation vendor request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status; holds the vendor's message or a generic one.
    #[error("{0}")]
    Upstream(String),

    #[error("Failed to translate text")]
    EmptyTranslation,

    #[error("Invalid configuration: {0}")]
    Config(String),
}
