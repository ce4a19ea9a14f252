use thiserror::Error;

/// Failures that can occur while answering a chat message
///
/// None of these are fatal: the loader substitutes a fallback knowledge base
/// and the engine renders everything else as an assistant line.
#[derive(Debug, Error)]
pub enum ChatError {
    /// Knowledge base unreachable or unparsable
    #[error("failed to load knowledge base from {location}: {reason}")]
    LoadFailure { location: String, reason: String },

    /// Remote endpoint answered with a non-2xx status
    #[error("{message}")]
    ServerFailure { status: u16, message: String },

    /// Remote endpoint answered 2xx with a body that is not the expected JSON
    #[error("Invalid JSON response from server ({0})")]
    ResponseParseFailure(String),

    /// The request never produced a response
    #[error("could not reach the chat server: {0}")]
    Transport(String),

    /// Unusable base URL, endpoint or knowledge location
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ChatError {
    /// Text rendered as the assistant line for this failure
    pub fn user_message(&self) -> String {
        format!("Error: {}", self)
    }

    /// HTTP status of a server failure
    pub fn status(&self) -> Option<u16> {
        match self {
            ChatError::ServerFailure { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_failure_renders_server_message() {
        let err = ChatError::ServerFailure {
            status: 500,
            message: "Oops".to_string(),
        };
        assert_eq!(err.user_message(), "Error: Oops");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_parse_failure_mentions_invalid_json() {
        let err = ChatError::ResponseParseFailure("expected value at line 1 column 1".to_string());
        assert!(err.user_message().contains("Invalid JSON"));
        assert_eq!(err.status(), None);
    }
}
