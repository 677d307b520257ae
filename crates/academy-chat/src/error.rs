//! Error types for the conversational engine.

use academy_core::error::AcademyError;
use academy_speech::SpeechError;

/// Errors from the chat engine.
///
/// `EmptyMessage` and `Busy` are rejections: the surface did not change.
/// `Lookup` never reaches a caller of `send`; the dispatcher turns it into
/// an apology turn.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("message cannot be empty")]
    EmptyMessage,
    #[error("a response is already pending")]
    Busy,
    #[error("lookup error: {0}")]
    Lookup(String),
    #[error("export error: {0}")]
    Export(String),
    #[error(transparent)]
    Speech(#[from] SpeechError),
}

impl From<ChatError> for AcademyError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::Speech(e) => e.into(),
            other => AcademyError::Chat(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_error_display() {
        assert_eq!(ChatError::EmptyMessage.to_string(), "message cannot be empty");
        assert_eq!(ChatError::Busy.to_string(), "a response is already pending");
        assert_eq!(
            ChatError::Lookup("table missing".to_string()).to_string(),
            "lookup error: table missing"
        );
        assert_eq!(
            ChatError::Speech(SpeechError::Unsupported).to_string(),
            "speech recognition is not supported on this host"
        );
    }

    #[test]
    fn test_chat_error_from_speech_error() {
        let err: ChatError = SpeechError::AlreadyListening.into();
        assert!(matches!(err, ChatError::Speech(SpeechError::AlreadyListening)));
    }

    #[test]
    fn test_chat_error_into_academy_error() {
        let err: AcademyError = ChatError::Busy.into();
        assert!(matches!(err, AcademyError::Chat(_)));

        let err: AcademyError = ChatError::Speech(SpeechError::Unsupported).into();
        assert!(matches!(err, AcademyError::Speech(_)));
    }
}
