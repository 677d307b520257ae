//! Error types for the speech adapters.

use academy_core::error::AcademyError;

/// Errors from the speech input and output adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpeechError {
    #[error("speech recognition is not supported on this host")]
    Unsupported,
    #[error("a recognition session is already active")]
    AlreadyListening,
    #[error("no recognition session is active")]
    NotListening,
    #[error("invalid state transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },
    #[error("speech host error: {0}")]
    Host(String),
}

impl From<SpeechError> for AcademyError {
    fn from(err: SpeechError) -> Self {
        AcademyError::Speech(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speech_error_display() {
        assert_eq!(
            SpeechError::Unsupported.to_string(),
            "speech recognition is not supported on this host"
        );
        assert_eq!(
            SpeechError::AlreadyListening.to_string(),
            "a recognition session is already active"
        );
        assert_eq!(
            SpeechError::NotListening.to_string(),
            "no recognition session is active"
        );
        let err = SpeechError::InvalidTransition {
            from: "Idle".to_string(),
            to: "Idle".to_string(),
        };
        assert_eq!(err.to_string(), "invalid state transition: Idle -> Idle");
        assert_eq!(
            SpeechError::Host("mic busy".to_string()).to_string(),
            "speech host error: mic busy"
        );
    }

    #[test]
    fn test_speech_error_into_academy_error() {
        let err: AcademyError = SpeechError::Unsupported.into();
        assert!(matches!(err, AcademyError::Speech(_)));
        assert!(err.to_string().contains("not supported"));
    }
}
