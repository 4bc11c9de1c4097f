//! Error types for Byline.

use thiserror::Error;

/// Library-level error type for Byline operations.
#[derive(Error, Debug)]
pub enum BylineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Agent error: {0}")]
    Agent(String),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("MCP error: {0}")]
    Mcp(String),

    #[error("Artifact already exists: {0}. Pass overwrite=true to replace it.")]
    ArtifactExists(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for Byline operations.
pub type Result<T> = std::result::Result<T, BylineError>;
