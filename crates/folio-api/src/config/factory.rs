use std::sync::Arc;

use folio_knowledge::{KnowledgeLoader, KnowledgeSource};
use folio_types::ChatError;

use crate::client::{local::LocalResponder, remote::RemoteChatClient, ChatBackend};
use crate::config::{ChatConfig, ChatMode};

/// Backend factory for creating chat backends
pub struct BackendFactory;

impl BackendFactory {
    /// Create the backend selected by `config.mode`
    ///
    /// # Returns
    /// Arc-wrapped backend implementing the ChatBackend trait, or a
    /// configuration error when a location cannot be resolved
    pub fn create(config: &ChatConfig) -> Result<Arc<dyn ChatBackend>, ChatError> {
        match config.mode {
            ChatMode::Local => {
                let source = KnowledgeSource::resolve(&config.knowledge_url)?;
                log::info!("Using local knowledge base at {}", source.describe());
                let loader = Arc::new(KnowledgeLoader::new(source));
                Ok(Arc::new(LocalResponder::new(loader, config.thinking_delay())))
            }
            ChatMode::Remote => {
                let client = RemoteChatClient::from_config(config)?;
                log::info!("Using remote chat endpoint {}", client.endpoint());
                Ok(Arc::new(client))
            }
        }
    }
}
