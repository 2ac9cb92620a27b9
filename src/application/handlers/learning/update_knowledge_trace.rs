//! UpdateKnowledgeTrace - Command handler deriving and storing a learner's
//! knowledge state from chat history.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::learning::{update_knowledge_trace, KnowledgeState};
use crate::ports::KnowledgeStateRepository;

#[derive(Debug, Clone)]
pub struct UpdateKnowledgeTraceCommand {
    pub user_id: UserId,
    pub chat_history: Vec<String>,
}

pub struct UpdateKnowledgeTraceHandler {
    repository: Arc<dyn KnowledgeStateRepository>,
}

impl UpdateKnowledgeTraceHandler {
    pub fn new(repository: Arc<dyn KnowledgeStateRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: UpdateKnowledgeTraceCommand,
    ) -> Result<KnowledgeState, DomainError> {
        let state = update_knowledge_trace(&cmd.chat_history);
        self.repository.save(&cmd.user_id, &state).await?;
        tracing::debug!(
            user_id = %cmd.user_id,
            messages = cmd.chat_history.len(),
            topics = state.topics.len(),
            "Knowledge trace updated"
        );
        Ok(state)
    }
}
