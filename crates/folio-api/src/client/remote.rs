use async_trait::async_trait;
use reqwest::Url;

use folio_types::{
    ChatError, ChatReply, ChatRequest, ConversationTurn, ErrorBody, NO_REPLY_PLACEHOLDER,
};

use crate::client::ChatBackend;
use crate::config::ChatConfig;

/// Client for the portfolio site's `/api/chat` endpoint
#[derive(Debug, Clone)]
pub struct RemoteChatClient {
    endpoint: Url,
    client: reqwest::Client,
}

impl RemoteChatClient {
    pub fn new(endpoint: Url) -> Self {
        Self::with_client(endpoint, reqwest::Client::new())
    }

    pub fn with_client(endpoint: Url, client: reqwest::Client) -> Self {
        Self { endpoint, client }
    }

    pub fn from_config(config: &ChatConfig) -> Result<Self, ChatError> {
        Ok(Self::new(config.endpoint_url()?))
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// POST the question with its history and extract the reply
    pub async fn ask(
        &self,
        question: &str,
        history: &[ConversationTurn],
    ) -> Result<String, ChatError> {
        let request = ChatRequest { question, history };
        log::debug!(
            "Posting question to {} with {} history turns",
            self.endpoint,
            history.len()
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| ChatError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ChatError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.error)
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            log::error!("Chat endpoint returned {}: {}", status, message);
            return Err(ChatError::ServerFailure {
                status: status.as_u16(),
                message,
            });
        }

        let reply: ChatReply = serde_json::from_str(&body).map_err(|e| {
            log::error!("Chat endpoint returned unparsable body: {}", e);
            ChatError::ResponseParseFailure(e.to_string())
        })?;

        Ok(reply
            .reply
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| NO_REPLY_PLACEHOLDER.to_string()))
    }
}

#[async_trait]
impl ChatBackend for RemoteChatClient {
    async fn reply(
        &self,
        question: &str,
        history: &[ConversationTurn],
    ) -> Result<String, ChatError> {
        self.ask(question, history).await
    }

    fn name(&self) -> &str {
        "remote"
    }
}
