use thiserror::Error;

/// Top-level error type for Yurei.
#[derive(Debug, Error)]
pub enum YureiError {
    /// Inbound webhook payload did not verify against the channel secret.
    #[error("signature invalid: {0}")]
    SignatureInvalid(String),

    /// The completion API call failed or returned no candidate.
    #[error("generation failed: {0}")]
    GenerationFailure(String),

    /// A required credential or environment value is absent.
    #[error("configuration missing: {0}")]
    ConfigurationMissing(String),

    /// Configuration file could not be read or parsed.
    #[error("config error: {0}")]
    Config(String),

    /// Error from the messaging channel.
    #[error("channel error: {0}")]
    Channel(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
