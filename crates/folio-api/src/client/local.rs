use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use folio_knowledge::KnowledgeLoader;
use folio_types::{ChatError, ConversationTurn};

use crate::client::ChatBackend;

/// Answers from the static knowledge base, after a short thinking delay
#[derive(Debug)]
pub struct LocalResponder {
    loader: Arc<KnowledgeLoader>,
    thinking_delay: Duration,
}

impl LocalResponder {
    pub fn new(loader: Arc<KnowledgeLoader>, thinking_delay: Duration) -> Self {
        Self {
            loader,
            thinking_delay,
        }
    }

    pub fn loader(&self) -> &Arc<KnowledgeLoader> {
        &self.loader
    }
}

#[async_trait]
impl ChatBackend for LocalResponder {
    async fn reply(
        &self,
        question: &str,
        _history: &[ConversationTurn],
    ) -> Result<String, ChatError> {
        if !self.thinking_delay.is_zero() {
            tokio::time::sleep(self.thinking_delay).await;
        }
        let base = self.loader.load().await;
        let decision = base.evaluate(question);
        log::debug!("Local match for {:?}: {:?}", question, decision);
        Ok(decision.response().to_string())
    }

    async fn prepare(&self) {
        self.loader.load().await;
    }

    async fn reload(&self) {
        self.loader.reload().await;
    }

    fn name(&self) -> &str {
        "local"
    }
}
