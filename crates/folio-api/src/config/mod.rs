use std::env;
use std::str::FromStr;
use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};

use folio_types::{ChatError, DEFAULT_BASE_URL, DEFAULT_CHAT_ENDPOINT, DEFAULT_KNOWLEDGE_URL};

pub mod factory;
pub use factory::BackendFactory;

/// Environment variable overriding the chat endpoint
pub const ENV_CHAT_ENDPOINT: &str = "FOLIO_CHAT_ENDPOINT";
pub const ENV_MODE: &str = "FOLIO_MODE";
pub const ENV_BASE_URL: &str = "FOLIO_BASE_URL";
pub const ENV_KNOWLEDGE_URL: &str = "FOLIO_KNOWLEDGE_URL";
pub const ENV_THINKING_DELAY_MS: &str = "FOLIO_THINKING_DELAY_MS";

/// Default pause before a local reply, so the typing indicator is visible
pub const DEFAULT_THINKING_DELAY_MS: u64 = 600;

pub const DEFAULT_WELCOME_MESSAGE: &str =
    "Hi! I'm the portfolio assistant. Ask me anything about experience, skills, or projects!";

pub const DEFAULT_SUGGESTIONS: [&str; 5] = [
    "What's the experience at Meta?",
    "What technologies are used day to day?",
    "Tell me about the projects",
    "How can I get in touch?",
    "What's the education background?",
];

/// How questions are answered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatMode {
    /// Keyword matching against the static knowledge base
    #[default]
    Local,
    /// Forward to the remote chat endpoint
    Remote,
}

impl ChatMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Remote => "remote",
        }
    }
}

impl FromStr for ChatMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" | "offline" | "kb" => Ok(Self::Local),
            "remote" | "server" | "api" => Ok(Self::Remote),
            other => Err(format!("unknown chat mode '{}' (expected local or remote)", other)),
        }
    }
}

impl std::fmt::Display for ChatMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chatbot configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub mode: ChatMode,
    /// Base URL the endpoint path is resolved against
    pub base_url: String,
    /// Chat endpoint path, or an absolute URL
    pub endpoint: String,
    /// Knowledge base location: `http(s)://` URL or filesystem path
    pub knowledge_url: String,
    pub thinking_delay_ms: u64,
    pub welcome_message: String,
    pub suggestions: Vec<String>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            mode: ChatMode::default(),
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoint: DEFAULT_CHAT_ENDPOINT.to_string(),
            knowledge_url: DEFAULT_KNOWLEDGE_URL.to_string(),
            thinking_delay_ms: DEFAULT_THINKING_DELAY_MS,
            welcome_message: DEFAULT_WELCOME_MESSAGE.to_string(),
            suggestions: DEFAULT_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ChatConfig {
    /// Absolute URL of the chat endpoint
    pub fn endpoint_url(&self) -> Result<Url, ChatError> {
        if let Ok(url) = Url::parse(&self.endpoint) {
            return Ok(url);
        }
        let base = Url::parse(&self.base_url).map_err(|e| {
            ChatError::Config(format!("invalid base URL '{}': {}", self.base_url, e))
        })?;
        base.join(&self.endpoint)
            .map_err(|e| ChatError::Config(format!("invalid endpoint '{}': {}", self.endpoint, e)))
    }

    pub fn thinking_delay(&self) -> Duration {
        Duration::from_millis(self.thinking_delay_ms)
    }

    /// Apply `FOLIO_*` overrides from the process environment
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    /// Apply `FOLIO_*` overrides read through `lookup`
    ///
    /// Unparsable values are ignored with a warning.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(mode) = lookup(ENV_MODE) {
            match mode.parse() {
                Ok(mode) => self.mode = mode,
                Err(e) => log::warn!("Ignoring {}: {}", ENV_MODE, e),
            }
        }
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            self.base_url = base_url;
        }
        if let Some(endpoint) = lookup(ENV_CHAT_ENDPOINT) {
            self.endpoint = endpoint;
        }
        if let Some(knowledge_url) = lookup(ENV_KNOWLEDGE_URL) {
            self.knowledge_url = knowledge_url;
        }
        if let Some(delay) = lookup(ENV_THINKING_DELAY_MS) {
            match delay.trim().parse() {
                Ok(ms) => self.thinking_delay_ms = ms,
                Err(e) => log::warn!("Ignoring {}={:?}: {}", ENV_THINKING_DELAY_MS, delay, e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_endpoint_resolves_against_base() {
        let config = ChatConfig::default();
        assert_eq!(
            config.endpoint_url().unwrap().as_str(),
            "http://localhost:5000/api/chat"
        );
    }

    #[test]
    fn test_absolute_endpoint_ignores_base() {
        let config = ChatConfig {
            endpoint: "https://chat.example.com/v2/ask".to_string(),
            base_url: "not a url".to_string(),
            ..ChatConfig::default()
        };
        assert_eq!(
            config.endpoint_url().unwrap().as_str(),
            "https://chat.example.com/v2/ask"
        );
    }

    #[test]
    fn test_invalid_base_is_config_error() {
        let config = ChatConfig {
            base_url: "localhost without scheme".to_string(),
            ..ChatConfig::default()
        };
        assert!(matches!(config.endpoint_url(), Err(ChatError::Config(_))));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ChatConfig::default();
        config.apply_overrides(lookup_from(&[
            (ENV_MODE, "remote"),
            (ENV_CHAT_ENDPOINT, "/portfolio/chat"),
            (ENV_BASE_URL, "https://example.com"),
            (ENV_THINKING_DELAY_MS, "0"),
        ]));

        assert_eq!(config.mode, ChatMode::Remote);
        assert_eq!(config.thinking_delay(), Duration::ZERO);
        assert_eq!(
            config.endpoint_url().unwrap().as_str(),
            "https://example.com/portfolio/chat"
        );
        assert_eq!(config.knowledge_url, DEFAULT_KNOWLEDGE_URL);
    }

    #[test]
    fn test_bad_env_values_are_ignored() {
        let mut config = ChatConfig::default();
        config.apply_overrides(lookup_from(&[
            (ENV_MODE, "telepathy"),
            (ENV_THINKING_DELAY_MS, "soon"),
        ]));
        assert_eq!(config, ChatConfig::default());
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("Remote".parse::<ChatMode>(), Ok(ChatMode::Remote));
        assert_eq!("local".parse::<ChatMode>(), Ok(ChatMode::Local));
        assert!("both".parse::<ChatMode>().is_err());
    }
}
