//! GetKnowledgeState - Query handler for a learner's knowledge state.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::learning::KnowledgeState;
use crate::ports::KnowledgeStateRepository;

#[derive(Debug, Clone)]
pub struct GetKnowledgeStateQuery {
    pub user_id: UserId,
}

pub struct GetKnowledgeStateHandler {
    repository: Arc<dyn KnowledgeStateRepository>,
}

impl GetKnowledgeStateHandler {
    pub fn new(repository: Arc<dyn KnowledgeStateRepository>) -> Self {
        Self { repository }
    }

    /// Returns an empty state when none was stored.
    pub async fn handle(&self, query: GetKnowledgeStateQuery) -> Result<KnowledgeState, DomainError> {
        Ok(self
            .repository
            .find_by_user(&query.user_id)
            .await?
            .unwrap_or_else(|| KnowledgeState::new(Timestamp::now())))
    }
}
