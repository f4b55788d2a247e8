//! Error types for the document chat CLI.

use thiserror::Error;

/// Errors raised while extracting text from uploaded documents.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("failed to read document '{name}': {source}")]
    ReadError {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("document '{name}' is not a valid PDF: {reason}")]
    MalformedDocument { name: String, reason: String },
}

/// Errors related to the embedding provider.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("no API key found in {0}")]
    MissingApiKey(String),

    #[error("failed to connect to embedding provider: {0}")]
    ConnectionError(String),

    #[error("embedding request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("embedding provider error: {0}")]
    ProviderError(String),

    #[error("invalid embedding response: {0}")]
    InvalidResponse(String),

    #[error("inconsistent embedding dimension: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("embedding timeout")]
    Timeout,
}

/// Errors related to the chat-completion provider.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("no API key found in {0}")]
    MissingApiKey(String),

    #[error("completion request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("completion provider error: {0}")]
    ProviderError(String),

    #[error("invalid completion response: {0}")]
    InvalidResponse(String),

    #[error("completion timeout")]
    Timeout,
}

/// Errors raised by a question turn.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("no documents have been processed yet")]
    NotReady,

    #[error("retrieval failed: {0}")]
    Retrieval(#[from] EmbeddingError),

    #[error("answer generation failed: {0}")]
    Completion(#[from] CompletionError),
}

/// Errors raised by a process action (extract, chunk, embed, index).
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),
}

/// Errors related to configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),

    #[error("path error: {0}")]
    PathError(String),

    #[error("validation error: {0}")]
    ValidationError(String),
}
