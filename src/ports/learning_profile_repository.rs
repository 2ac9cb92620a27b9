//! LearningProfileRepository port for profile persistence.

use async_trait::async_trait;

use crate::domain::{
    foundation::{DomainError, UserId},
    learning::LearningStyleProfile,
};

/// Durable store of one learning profile per user.
///
/// Absence is not an error: `find_by_user` returns `Ok(None)` and callers
/// default-initialize. Writes are whole-document upserts with
/// last-write-wins semantics.
#[async_trait]
pub trait LearningProfileRepository: Send + Sync {
    /// Find the profile stored for a user.
    async fn find_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<LearningStyleProfile>, DomainError>;

    /// Insert or replace the profile for a user.
    async fn save(&self, user_id: &UserId, profile: &LearningStyleProfile)
        -> Result<(), DomainError>;

    /// Remove a user's profile. Deleting a missing profile succeeds.
    async fn delete(&self, user_id: &UserId) -> Result<(), DomainError>;
}
