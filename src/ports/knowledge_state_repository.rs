//! KnowledgeStateRepository port.

use async_trait::async_trait;

use crate::domain::{
    foundation::{DomainError, UserId},
    learning::KnowledgeState,
};

/// Durable store of one knowledge state per user, symmetric to the profile store.
#[async_trait]
pub trait KnowledgeStateRepository: Send + Sync {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<KnowledgeState>, DomainError>;

    /// Insert or replace the state for a user.
    async fn save(&self, user_id: &UserId, state: &KnowledgeState) -> Result<(), DomainError>;
}
