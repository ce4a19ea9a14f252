use async_trait::async_trait;

use folio_types::{ChatError, ConversationTurn};

pub mod local;
pub mod remote;

/// Something that can answer a chat question
///
/// `history` holds the turns before `question`; the newest user turn is
/// passed separately as `question`.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Produce the reply for `question`
    async fn reply(
        &self,
        question: &str,
        history: &[ConversationTurn],
    ) -> Result<String, ChatError>;

    /// Warm up ahead of the first question
    async fn prepare(&self) {}

    /// Drop cached state and fetch it again
    async fn reload(&self) {}

    /// Short name used in logs
    fn name(&self) -> &str;
}
