//! DeleteLearningProfile - Command handler removing a learner's profile.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::ports::LearningProfileRepository;

use super::UserLocks;

#[derive(Debug, Clone)]
pub struct DeleteLearningProfileCommand {
    pub user_id: UserId,
}

pub struct DeleteLearningProfileHandler {
    repository: Arc<dyn LearningProfileRepository>,
    locks: Arc<UserLocks>,
}

impl DeleteLearningProfileHandler {
    pub fn new(repository: Arc<dyn LearningProfileRepository>, locks: Arc<UserLocks>) -> Self {
        Self { repository, locks }
    }

    /// Deleting a profile that does not exist is not an error.
    pub async fn handle(&self, cmd: DeleteLearningProfileCommand) -> Result<(), DomainError> {
        let _guard = self.locks.acquire(&cmd.user_id).await;
        self.repository.delete(&cmd.user_id).await?;
        tracing::info!(user_id = %cmd.user_id, "Learning profile deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::learning::InMemoryLearningProfileRepository;
    use crate::domain::learning::LearningStyleProfile;

    #[tokio::test]
    async fn removes_stored_profile() {
        let repo = InMemoryLearningProfileRepository::new();
        let user_id = UserId::new("u1").unwrap();
        repo.save(&user_id, &LearningStyleProfile::default())
            .await
            .unwrap();
        let handler =
            DeleteLearningProfileHandler::new(Arc::new(repo.clone()), Arc::new(UserLocks::new()));

        handler
            .handle(DeleteLearningProfileCommand {
                user_id: user_id.clone(),
            })
            .await
            .unwrap();

        assert!(repo.find_by_user(&user_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn missing_profile_is_fine() {
        let repo = InMemoryLearningProfileRepository::new();
        let handler = DeleteLearningProfileHandler::new(Arc::new(repo), Arc::new(UserLocks::new()));

        let result = handler
            .handle(DeleteLearningProfileCommand {
                user_id: UserId::new("nobody").unwrap(),
            })
            .await;

        assert!(result.is_ok());
    }
}
