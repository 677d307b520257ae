use thiserror::Error;

/// Top-level error type for the academy assistant.
///
/// Subsystem crates define their own error types and implement
/// `From<SubsystemError> for AcademyError` so that `?` works across crate
/// boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AcademyError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Speech error: {0}")]
    Speech(String),

    #[error("Chat error: {0}")]
    Chat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for AcademyError {
    fn from(err: toml::de::Error) -> Self {
        AcademyError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for AcademyError {
    fn from(err: toml::ser::Error) -> Self {
        AcademyError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for AcademyError {
    fn from(err: serde_json::Error) -> Self {
        AcademyError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for academy operations.
pub type Result<T> = std::result::Result<T, AcademyError>;
