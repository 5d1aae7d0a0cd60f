use thiserror::Error;

/// Failures surfaced by the fetch pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("proxy responded with HTTP {0}")]
    Status(u16),

    /// The proxy answered but carried no upstream document.
    #[error("proxy returned an empty payload")]
    EmptyPayload,

    #[error("failed to decode quiz document: {0}")]
    Decode(String),

    /// The quiz exists but has nothing to show; usually private or deleted.
    #[error("quiz has no questions")]
    EmptyQuiz,

    #[error("request was cancelled")]
    Cancelled,
}

impl FetchError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Whether another attempt could plausibly succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::Status(_) | Self::EmptyPayload | Self::Decode(_)
        )
    }

    /// Message shown to the user, or `None` when the failure should be
    /// discarded silently.
    #[must_use]
    pub fn user_message(&self) -> Option<String> {
        match self {
            Self::EmptyQuiz => Some("quiz is empty or private".to_string()),
            Self::Cancelled => None,
            Self::Transport(_) | Self::Status(_) | Self::EmptyPayload | Self::Decode(_) => {
                Some("access error, try again".to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_quiz_and_cancellation_are_terminal() {
        assert!(!FetchError::EmptyQuiz.is_retryable());
        assert!(!FetchError::Cancelled.is_retryable());
        assert!(FetchError::EmptyPayload.is_retryable());
        assert!(FetchError::Status(502).is_retryable());
    }

    #[test]
    fn cancellation_has_no_user_message() {
        assert_eq!(FetchError::Cancelled.user_message(), None);
        assert_eq!(
            FetchError::EmptyQuiz.user_message().as_deref(),
            Some("quiz is empty or private")
        );
        assert_eq!(
            FetchError::transport("dns").user_message().as_deref(),
            Some("access error, try again")
        );
    }
}
