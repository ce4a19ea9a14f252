//! Core types for the folio chatbot
//!
//! This crate provides the conversation, wire and error types shared by the
//! other folio crates.

use serde::{Deserialize, Serialize};

pub mod error;

pub use error::ChatError;

// ============================================================================
// Constants
// ============================================================================

/// Default base URL of the site serving the chat endpoint and knowledge base
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Default path of the remote chat endpoint
pub const DEFAULT_CHAT_ENDPOINT: &str = "/api/chat";

/// Default location of the knowledge base document
pub const DEFAULT_KNOWLEDGE_URL: &str = "chatbot-knowledge.json";

/// Reply shown when the server answers successfully but without any text
pub const NO_REPLY_PLACEHOLDER: &str = "I didn't get a response.";

/// Reply used when the knowledge base has no `default` entry
pub const GENERIC_FALLBACK_RESPONSE: &str =
    "I'm not sure how to answer that yet. Try asking about experience, skills or projects.";

/// Default response of the knowledge base substituted when loading fails
pub const KNOWLEDGE_UNAVAILABLE_RESPONSE: &str = concat!(
    "Sorry, my knowledge base is unavailable right now. ",
    "Please use the contact section of the site to get in touch directly."
);

// ============================================================================
// Conversation Types
// ============================================================================

/// Speaker of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One message exchanged in the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub text: String,
}

impl ConversationTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
        }
    }
}

// ============================================================================
// Wire Types
// ============================================================================

/// Body POSTed to the remote chat endpoint
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub question: &'a str,
    pub history: &'a [ConversationTurn],
}

/// Successful response body of the chat endpoint
#[derive(Debug, Default, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub reply: Option<String>,
}

/// Error response body of the chat endpoint
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}
