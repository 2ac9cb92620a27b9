//! In-memory learning repositories.
//!
//! Process-local storage for tests and local runs. Both repositories can be
//! told to fail every call so error propagation can be exercised.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::learning::{KnowledgeState, LearningStyleProfile};
use crate::ports::{KnowledgeStateRepository, LearningProfileRepository};

/// In-memory storage for learning profiles
#[derive(Debug, Clone, Default)]
pub struct InMemoryLearningProfileRepository {
    profiles: Arc<RwLock<HashMap<UserId, LearningStyleProfile>>>,
    failure: Arc<RwLock<Option<DomainError>>>,
}

impl InMemoryLearningProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository whose every call returns `error`.
    pub fn failing(error: DomainError) -> Self {
        Self {
            profiles: Arc::default(),
            failure: Arc::new(RwLock::new(Some(error))),
        }
    }

    /// Makes every subsequent call return `error`.
    pub async fn fail_with(&self, error: DomainError) {
        *self.failure.write().await = Some(error);
    }

    pub async fn clear_failure(&self) {
        *self.failure.write().await = None;
    }

    pub async fn is_empty(&self) -> bool {
        self.profiles.read().await.is_empty()
    }

    async fn check_failure(&self) -> Result<(), DomainError> {
        match self.failure.read().await.as_ref() {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl LearningProfileRepository for InMemoryLearningProfileRepository {
    async fn find_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<LearningStyleProfile>, DomainError> {
        self.check_failure().await?;
        Ok(self.profiles.read().await.get(user_id).cloned())
    }

    async fn save(
        &self,
        user_id: &UserId,
        profile: &LearningStyleProfile,
    ) -> Result<(), DomainError> {
        self.check_failure().await?;
        self.profiles
            .write()
            .await
            .insert(user_id.clone(), profile.clone());
        Ok(())
    }

    async fn delete(&self, user_id: &UserId) -> Result<(), DomainError> {
        self.check_failure().await?;
        self.profiles.write().await.remove(user_id);
        Ok(())
    }
}

/// In-memory storage for knowledge states
#[derive(Debug, Clone, Default)]
pub struct InMemoryKnowledgeStateRepository {
    states: Arc<RwLock<HashMap<UserId, KnowledgeState>>>,
    failure: Arc<RwLock<Option<DomainError>>>,
}

impl InMemoryKnowledgeStateRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(error: DomainError) -> Self {
        Self {
            states: Arc::default(),
            failure: Arc::new(RwLock::new(Some(error))),
        }
    }

    async fn check_failure(&self) -> Result<(), DomainError> {
        match self.failure.read().await.as_ref() {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl KnowledgeStateRepository for InMemoryKnowledgeStateRepository {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<KnowledgeState>, DomainError> {
        self.check_failure().await?;
        Ok(self.states.read().await.get(user_id).cloned())
    }

    async fn save(&self, user_id: &UserId, state: &KnowledgeState) -> Result<(), DomainError> {
        self.check_failure().await?;
        self.states
            .write()
            .await
            .insert(user_id.clone(), state.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    fn learner() -> UserId {
        UserId::new("learner-1").unwrap()
    }

    #[tokio::test]
    async fn missing_profile_is_none() {
        let repo = InMemoryLearningProfileRepository::new();
        assert!(repo.find_by_user(&learner()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_then_find_returns_identical_profile() {
        let repo = InMemoryLearningProfileRepository::new();
        let mut profile = LearningStyleProfile::default();
        profile.perceptual_mode.visual = 0.123_456_789;
        profile.cognitive_metrics.quiz_scores = vec![33.3, 66.6];

        repo.save(&learner(), &profile).await.unwrap();
        let found = repo.find_by_user(&learner()).await.unwrap().unwrap();

        assert_eq!(found, profile);
    }

    #[tokio::test]
    async fn save_overwrites_previous_profile() {
        let repo = InMemoryLearningProfileRepository::new();
        let mut profile = LearningStyleProfile::default();
        repo.save(&learner(), &profile).await.unwrap();

        profile.social_preference.independent = 0.9;
        repo.save(&learner(), &profile).await.unwrap();

        assert!(!repo.is_empty().await);
        let found = repo.find_by_user(&learner()).await.unwrap().unwrap();
        assert_eq!(found.social_preference.independent, 0.9);
    }

    #[tokio::test]
    async fn delete_removes_profile() {
        let repo = InMemoryLearningProfileRepository::new();
        repo.save(&learner(), &LearningStyleProfile::default())
            .await
            .unwrap();

        repo.delete(&learner()).await.unwrap();

        assert!(repo.is_empty().await);
        repo.delete(&learner()).await.unwrap();
    }

    #[tokio::test]
    async fn forced_failure_propagates() {
        let repo = InMemoryLearningProfileRepository::new();
        repo.fail_with(DomainError::configuration("store offline")).await;

        let err = repo.find_by_user(&learner()).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::ConfigurationError);

        repo.clear_failure().await;
        assert!(repo.find_by_user(&learner()).await.is_ok());
    }

    #[tokio::test]
    async fn knowledge_state_round_trips() {
        let repo = InMemoryKnowledgeStateRepository::new();
        let mut state = KnowledgeState::default();
        state.topics.insert("algebra".to_string(), 0.4);

        repo.save(&learner(), &state).await.unwrap();

        assert_eq!(repo.find_by_user(&learner()).await.unwrap(), Some(state));
    }

    #[tokio::test]
    async fn failing_knowledge_repository_errors() {
        let repo = InMemoryKnowledgeStateRepository::failing(DomainError::database("boom"));
        let err = repo
            .save(&learner(), &KnowledgeState::default())
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::DatabaseError);
    }
}
