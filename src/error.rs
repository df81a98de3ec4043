use std::path::PathBuf;
use thiserror::Error;

/// Message shown to end users for any failure past validation and setup.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to generate image. The model may have refused the request due to safety policies or other issues.";

/// Problems with the caller's input, detected before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select and upload at least one garment.")]
    NoGarments,
    #[error("Unknown garment type '{0}'. Pick a label from the garment catalog.")]
    UnknownGarment(String),
    #[error("Invalid {kind} '{value}'")]
    InvalidOption { kind: &'static str, value: String },
    #[error("Unsupported image file '{}': expected png, jpg, jpeg, webp, gif or heic", .0.display())]
    UnsupportedFile(PathBuf),
}

#[derive(Debug, Error)]
pub enum TryOnError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Generation failure: {0}")]
    GenerationFailure(String),
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("A generation is already in progress")]
    Busy,
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TryOnError {
    /// Text safe to show an end user. Generation and transport details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            TryOnError::Validation(err) => err.to_string(),
            TryOnError::Config(msg) => msg.clone(),
            TryOnError::Busy => "Please wait for the current image to finish generating.".into(),
            TryOnError::GenerationFailure(_)
            | TryOnError::Transport(_)
            | TryOnError::Serialization(_)
            | TryOnError::Io(_) => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, TryOnError::Validation(_))
    }
}

impl From<reqwest::Error> for TryOnError {
    fn from(err: reqwest::Error) -> Self {
        TryOnError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for TryOnError {
    fn from(err: serde_json::Error) -> Self {
        TryOnError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TryOnError>;
