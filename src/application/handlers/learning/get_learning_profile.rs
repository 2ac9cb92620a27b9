//! GetLearningProfile - Query handler returning a learner's stored profile.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::learning::{LearningStyleProfile, ProfileMetrics};
use crate::ports::LearningProfileRepository;

#[derive(Debug, Clone)]
pub struct GetLearningProfileQuery {
    pub user_id: UserId,
}

/// The profile and its summary. `stored` is false when nothing was saved yet
/// and a zeroed profile stands in.
#[derive(Debug, Clone)]
pub struct LearningProfileView {
    pub profile: LearningStyleProfile,
    pub metrics: ProfileMetrics,
    pub stored: bool,
}

pub struct GetLearningProfileHandler {
    repository: Arc<dyn LearningProfileRepository>,
}

impl GetLearningProfileHandler {
    pub fn new(repository: Arc<dyn LearningProfileRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: GetLearningProfileQuery,
    ) -> Result<LearningProfileView, DomainError> {
        let (profile, stored) = match self.repository.find_by_user(&query.user_id).await? {
            Some(profile) => (profile, true),
            None => (LearningStyleProfile::new(Timestamp::now()), false),
        };
        Ok(LearningProfileView {
            metrics: ProfileMetrics::from_profile(&profile),
            profile,
            stored,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::learning::InMemoryLearningProfileRepository;
    use crate::domain::learning::Level;

    fn learner() -> UserId {
        UserId::new("u1").unwrap()
    }

    #[tokio::test]
    async fn missing_profile_returns_defaults() {
        let repo = InMemoryLearningProfileRepository::new();
        let handler = GetLearningProfileHandler::new(Arc::new(repo.clone()));

        let view = handler
            .handle(GetLearningProfileQuery { user_id: learner() })
            .await
            .unwrap();

        assert!(!view.stored);
        assert_eq!(view.metrics.current_level, Level::Beginner);
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn stored_profile_is_returned() {
        let repo = InMemoryLearningProfileRepository::new();
        let mut profile = LearningStyleProfile::default();
        profile.cognitive_metrics.intermediate_level = 0.6;
        repo.save(&learner(), &profile).await.unwrap();
        let handler = GetLearningProfileHandler::new(Arc::new(repo));

        let view = handler
            .handle(GetLearningProfileQuery { user_id: learner() })
            .await
            .unwrap();

        assert!(view.stored);
        assert_eq!(view.profile, profile);
        assert_eq!(view.metrics.current_level, Level::Intermediate);
    }
}
